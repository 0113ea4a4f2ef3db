//! Journal entities: logged ingestions grouped into experiences.
//!
//! This is the storage side the chart consumes. Persistence here is a flat
//! JSON file; no database. The timeline core only reads these records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One logged instance of consuming a substance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ingestion {
    pub substance_name: String,
    /// Route of administration ("oral", "insufflated", ...). Matched
    /// case-insensitively against the reference dataset.
    pub route: String,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub dose: Option<f64>,
    #[serde(default)]
    pub units: Option<String>,
    /// User marked the dose as a guess rather than a measurement.
    #[serde(default)]
    pub is_estimate: bool,
}

/// A named group of ingestions charted together.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    #[serde(default)]
    pub ingestions: Vec<Ingestion>,
}

/// Journal file load failure.
#[derive(Debug)]
pub enum JournalError {
    Io(String),
    Json(String),
}

impl std::fmt::Display for JournalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JournalError::Io(e) => write!(f, "journal IO error: {}", e),
            JournalError::Json(e) => write!(f, "journal JSON error: {}", e),
        }
    }
}

impl std::error::Error for JournalError {}

/// Load all experiences from a journal JSON file.
pub fn load_experiences(path: &Path) -> Result<Vec<Experience>, JournalError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| JournalError::Io(format!("{}: {}", path.display(), e)))?;
    from_json_str(&json)
}

pub fn from_json_str(json: &str) -> Result<Vec<Experience>, JournalError> {
    serde_json::from_str(json).map_err(|e| JournalError::Json(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_journal_json() {
        let json = r#"[
            {
                "title": "Quiet evening",
                "ingestions": [
                    {
                        "substance_name": "Examplamine",
                        "route": "oral",
                        "time": "2025-06-01T20:15:00Z",
                        "dose": 80.0,
                        "units": "mg"
                    },
                    {
                        "substance_name": "Examplamine",
                        "route": "oral",
                        "time": "2025-06-01T22:15:00Z",
                        "is_estimate": true
                    }
                ]
            }
        ]"#;
        let experiences = from_json_str(json).unwrap();
        assert_eq!(experiences.len(), 1);
        let exp = &experiences[0];
        assert_eq!(exp.ingestions.len(), 2);
        assert_eq!(exp.ingestions[0].dose, Some(80.0));
        assert!(exp.ingestions[1].dose.is_none());
        assert!(exp.ingestions[1].is_estimate);
    }
}
