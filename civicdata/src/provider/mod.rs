use crate::error::{CivicError, Result};
use serde_json::{json, Value};
use std::path::PathBuf;

/// Source of a full political dataset. The pipeline only cares about
/// the returned shape; where the data comes from is the provider's
/// business.
pub trait DataProvider {
    fn collect_political_data(&self) -> Result<Value>;
}

/// Built-in placeholder dataset. A stand-in for a real acquisition
/// integration: the values are fixed and illustrative, not live.
#[derive(Debug, Default)]
pub struct StaticProvider;

impl DataProvider for StaticProvider {
    fn collect_political_data(&self) -> Result<Value> {
        Ok(json!({
            "federal": {
                "president": {
                    "name": "Joe Biden",
                    "title": "President of the United States",
                    "party": "Democratic",
                    "term_start": "2021",
                    "term_end": "2025"
                },
                "vice_president": {
                    "name": "Kamala Harris",
                    "title": "Vice President of the United States",
                    "party": "Democratic",
                    "term_start": "2021",
                    "term_end": "2025"
                },
                "speaker": {
                    "name": "Mike Johnson",
                    "title": "Speaker of the House",
                    "party": "Republican",
                    "term_start": "2023"
                }
            },
            "congress": {
                "house": {
                    "total_seats": 435,
                    "current_session": "118th Congress",
                    "term": "2023-2025",
                    "majority_party": "Republican"
                },
                "senate": {
                    "total_seats": 100,
                    "seats_per_state": 2,
                    "current_session": "118th Congress",
                    "term": "2023-2025",
                    "majority_party": "Democratic"
                }
            },
            "states": {
                "AL": {
                    "name": "Alabama",
                    "capital": "Montgomery",
                    "senators": ["Katie Britt", "Tommy Tuberville"],
                    "representatives": 7
                }
            },
            "zip_data": {
                "20500": {
                    "state": "DC",
                    "district": "At-Large",
                    "representative": "Eleanor Holmes Norton"
                }
            }
        }))
    }
}

/// Reads a curated dataset from a JSON file on disk.
#[derive(Debug)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileProvider { path: path.into() }
    }
}

impl DataProvider for FileProvider {
    fn collect_political_data(&self) -> Result<Value> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            CivicError::Provider(format!(
                "Failed to read dataset file {}: {e}",
                self.path.display()
            ))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            CivicError::Provider(format!(
                "Dataset file {} is not valid JSON: {e}",
                self.path.display()
            ))
        })
    }
}
