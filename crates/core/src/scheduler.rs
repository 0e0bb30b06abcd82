//! Scheduler module - cancellable timed tasks owned by a round
//!
//! The engine has two deferred behaviours: the once-per-second round clock
//! and hiding a mismatched pair after a short reveal. Both live here as
//! scheduled tasks on a virtual clock that only moves when the caller
//! advances it, so the engine stays deterministic and testable.
//!
//! Tasks are released one at a time in due order (ties broken by scheduling
//! order). The caller runs each task to completion before asking for the
//! next, which lets a task cancel everything still queued behind it.

use crate::types::TileId;

/// Handle returned when a task is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// Work the engine defers to a later instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// One second of round time has passed.
    ClockTick,
    /// Turn a mismatched pair face-down again.
    HideMismatch { pair: [TileId; 2] },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ScheduledTask {
    id: TaskId,
    kind: TaskKind,
    due_ms: u64,
    period_ms: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    pub fn schedule_once(&mut self, kind: TaskKind, delay_ms: u32) -> TaskId {
        self.push(kind, delay_ms, None)
    }

    /// Schedule a task that fires every `period_ms` until cancelled.
    pub fn schedule_repeating(&mut self, kind: TaskKind, period_ms: u32) -> TaskId {
        self.push(kind, period_ms, Some(period_ms.max(1)))
    }

    fn push(&mut self, kind: TaskKind, delay_ms: u32, period_ms: Option<u32>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            kind,
            due_ms: self.now_ms + delay_ms as u64,
            period_ms,
        });
        id
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Release the earliest task due at or before `until_ms`.
    ///
    /// The clock jumps to the task's due time. Repeating tasks are re-armed
    /// before being returned.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TaskKind> {
        let (index, _) = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id))?;

        let due_ms = self.tasks[index].due_ms;
        self.now_ms = self.now_ms.max(due_ms);

        let kind = self.tasks[index].kind;
        match self.tasks[index].period_ms {
            Some(period) => self.tasks[index].due_ms = due_ms + period as u64,
            None => {
                self.tasks.swap_remove(index);
            }
        }
        Some(kind)
    }

    /// Move the clock forward without releasing anything.
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}
