//! Best score record
//!
//! A single persisted field. Stored as `{"highest": N}`.

use serde::{Deserialize, Serialize};

/// The persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    /// Best score ever reached
    pub highest: u64,
}

impl HighScore {
    pub fn new(highest: u64) -> Self {
        Self { highest }
    }

    /// Whether a finished run beats the stored best
    pub fn beaten_by(&self, score: u64) -> bool {
        score > self.highest
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a record. A missing `highest` field is an error, not zero.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_format() {
        assert_eq!(HighScore::new(7).to_json().unwrap(), r#"{"highest":7}"#);
        assert_eq!(
            HighScore::from_json(r#"{ "highest": 12 }"#).unwrap(),
            HighScore::new(12)
        );
    }

    #[test]
    fn test_missing_field_is_corrupt() {
        assert!(HighScore::from_json("{}").is_err());
        assert!(HighScore::from_json(r#"{"highest": -1}"#).is_err());
        assert!(HighScore::from_json("not json").is_err());
    }

    #[test]
    fn test_beaten_only_by_strictly_greater() {
        let best = HighScore::new(3);
        assert!(!best.beaten_by(2));
        assert!(!best.beaten_by(3));
        assert!(best.beaten_by(4));
    }
}
