use serde::{Deserialize, Serialize};

use crate::types::DifficultyId;

/// One completed round as kept on the leaderboard.
///
/// Serialized as `{"score","difficulty","moves","time","date"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    pub difficulty: DifficultyId,
    pub moves: u32,
    /// Elapsed round time in seconds.
    #[serde(rename = "time")]
    pub elapsed_secs: u32,
    /// ISO-8601 timestamp of when the round ended.
    #[serde(rename = "date")]
    pub timestamp: String,
}

impl ScoreEntry {
    pub fn new(
        score: u32,
        difficulty: DifficultyId,
        moves: u32,
        elapsed_secs: u32,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            score,
            difficulty,
            moves,
            elapsed_secs,
            timestamp: timestamp.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let entry = ScoreEntry::new(1250, DifficultyId::Easy, 8, 25, "2026-10-18T09:30:00.000Z");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "score": 1250,
                "difficulty": "easy",
                "moves": 8,
                "time": 25,
                "date": "2026-10-18T09:30:00.000Z"
            })
        );
    }

    #[test]
    fn test_parses_browser_records() {
        let raw = r#"{"score":2190,"difficulty":"hard","moves":20,"time":90,"date":"2024-01-01T00:00:00.000Z"}"#;
        let entry: ScoreEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.difficulty, DifficultyId::Hard);
        assert_eq!(entry.elapsed_secs, 90);
    }
}
