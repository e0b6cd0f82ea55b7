use crate::clock::{Clock, SystemClock};
use crate::dataset::{iso_utc, VersionInfo};
use crate::error::{CivicError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const DYNAMIC_DATA_FILE: &str = "dynamic_data.json";
pub const STATES_DATA_FILE: &str = "states_data.json";
pub const ZIP_INDEX_FILE: &str = "zip_data_index.json";
pub const VERSION_FILE: &str = "version.json";
pub const ZIP_FILE_PATTERN: &str = "zip_data_{state}.json";

/// Writes validated dataset sections to the output directory as
/// pretty-printed JSON artifacts. ZIP data is split into one file per
/// state so no single download gets unwieldy.
pub struct Generator {
    out_dir: PathBuf,
    clock: Box<dyn Clock>,
}

impl Generator {
    /// Create a generator writing to `out_dir`, creating the directory
    /// if it does not exist. Uses the system clock for timestamps.
    pub fn new(out_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_clock(out_dir, Box::new(SystemClock))
    }

    /// Create a generator with an injected time source.
    pub fn with_clock(out_dir: impl Into<PathBuf>, clock: Box<dyn Clock>) -> Result<Self> {
        let out_dir = out_dir.into();
        std::fs::create_dir_all(&out_dir)?;
        Ok(Generator { out_dir, clock })
    }

    /// Open an output directory for reading existing artifacts without
    /// creating it.
    pub fn open(out_dir: impl Into<PathBuf>) -> Self {
        Generator {
            out_dir: out_dir.into(),
            clock: Box::new(SystemClock),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write the dataset out as separate artifacts: combined
    /// federal+congress data, state data, and per-state ZIP chunks
    /// with an index.
    pub fn generate_political_data(&self, data: &Value) -> Result<()> {
        let root = data
            .as_object()
            .ok_or_else(|| CivicError::Validation("Dataset must be a JSON object".into()))?;

        let mut dynamic = Map::new();
        dynamic.insert("federal".into(), section(root, "federal")?);
        dynamic.insert("congress".into(), section(root, "congress")?);
        dynamic.insert("last_updated".into(), Value::String(self.timestamp()));
        self.write_json(DYNAMIC_DATA_FILE, &Value::Object(dynamic))?;

        let mut states = Map::new();
        states.insert("states".into(), section(root, "states")?);
        states.insert("last_updated".into(), Value::String(self.timestamp()));
        self.write_json(STATES_DATA_FILE, &Value::Object(states))?;

        self.generate_zip_chunks(&section(root, "zip_data")?)
    }

    /// Write the version stamp artifact.
    pub fn generate_version_data(&self, version: &VersionInfo) -> Result<()> {
        self.write_json(VERSION_FILE, version)
    }

    /// Split ZIP entries into one artifact per state, then write an
    /// index listing every state file. Group order (and hence index
    /// order) is first-seen order over the input entries.
    fn generate_zip_chunks(&self, zip_data: &Value) -> Result<()> {
        let entries = zip_data
            .as_object()
            .ok_or_else(|| CivicError::Validation("ZIP section must be an object".into()))?;

        let mut groups: Map<String, Value> = Map::new();
        for (zip_code, record) in entries {
            let state = record
                .get("state")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    CivicError::Validation(format!("ZIP {zip_code} has no state field"))
                })?;
            let group = groups
                .entry(state.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(group) = group {
                group.insert(zip_code.clone(), record.clone());
            }
        }

        for (state, state_zip_data) in &groups {
            let filename = format!("zip_data_{}.json", state.to_lowercase());
            let mut chunk = Map::new();
            chunk.insert("state".into(), Value::String(state.clone()));
            chunk.insert("zip_codes".into(), state_zip_data.clone());
            chunk.insert("last_updated".into(), Value::String(self.timestamp()));
            self.write_json(&filename, &Value::Object(chunk))?;
        }

        let mut index = Map::new();
        index.insert(
            "states".into(),
            Value::Array(groups.keys().map(|s| Value::String(s.clone())).collect()),
        );
        index.insert("file_pattern".into(), Value::String(ZIP_FILE_PATTERN.into()));
        index.insert("last_updated".into(), Value::String(self.timestamp()));
        self.write_json(ZIP_INDEX_FILE, &Value::Object(index))
    }

    /// Read a previously generated artifact. Returns Ok(None) when the
    /// file does not exist yet.
    pub fn read_json(&self, filename: &str) -> Result<Option<Value>> {
        let path = self.out_dir.join(filename);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn timestamp(&self) -> String {
        iso_utc(self.clock.now_utc())
    }

    /// Serialize with 2-space indentation and fully overwrite any
    /// existing file of the same name.
    fn write_json<T: Serialize>(&self, filename: &str, value: &T) -> Result<()> {
        let path = self.out_dir.join(filename);
        let text = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, text).map_err(|source| CivicError::WriteArtifact {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Generated {filename}");
        Ok(())
    }
}

fn section(root: &Map<String, Value>, name: &str) -> Result<Value> {
    root.get(name)
        .cloned()
        .ok_or_else(|| CivicError::Validation(format!("Missing required section: {name}")))
}
