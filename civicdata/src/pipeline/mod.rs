use crate::clock::{Clock, SystemClock};
use crate::dataset::VersionInfo;
use crate::error::{CivicError, Result};
use crate::generator::Generator;
use crate::provider::DataProvider;
use crate::publisher::Publisher;
use crate::validation;

/// One full update run: collect, validate, generate, version, publish.
/// Fails fast -- any stage error aborts the run and nothing downstream
/// executes.
pub struct UpdatePipeline {
    provider: Box<dyn DataProvider>,
    generator: Generator,
    publisher: Box<dyn Publisher>,
    clock: Box<dyn Clock>,
}

impl UpdatePipeline {
    pub fn new(
        provider: Box<dyn DataProvider>,
        generator: Generator,
        publisher: Box<dyn Publisher>,
    ) -> Self {
        Self::with_clock(provider, generator, publisher, Box::new(SystemClock))
    }

    pub fn with_clock(
        provider: Box<dyn DataProvider>,
        generator: Generator,
        publisher: Box<dyn Publisher>,
        clock: Box<dyn Clock>,
    ) -> Self {
        UpdatePipeline {
            provider,
            generator,
            publisher,
            clock,
        }
    }

    pub fn run(&self) -> Result<()> {
        log::info!("Starting data update process");

        log::info!("Collecting political data");
        let data = self.provider.collect_political_data()?;

        log::info!("Validating data");
        if !validation::validate_political_data(&data) {
            return Err(CivicError::Validation("Data validation failed".into()));
        }

        log::info!("Generating JSON files");
        self.generator.generate_political_data(&data)?;

        let now = self.clock.now_utc();
        self.generator.generate_version_data(&VersionInfo::at(now))?;

        let out_dir = self.generator.out_dir();
        if self.publisher.has_changes(out_dir)? {
            let message = format!(
                "Update political data: {}",
                now.format("%Y-%m-%d %H:%M UTC")
            );
            self.publisher.commit_and_push(out_dir, &message)?;
        } else {
            log::info!("No changes to publish");
        }

        log::info!("Data update completed successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::generator::{
        DYNAMIC_DATA_FILE, STATES_DATA_FILE, VERSION_FILE, ZIP_INDEX_FILE,
    };
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;
    use tempfile::TempDir;

    struct ValueProvider(Value);

    impl DataProvider for ValueProvider {
        fn collect_political_data(&self) -> Result<Value> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct RecordingPublisher {
        changes: bool,
        commits: Rc<RefCell<Vec<String>>>,
    }

    impl Publisher for RecordingPublisher {
        fn has_changes(&self, _dir: &Path) -> Result<bool> {
            Ok(self.changes)
        }

        fn commit_and_push(&self, _dir: &Path, message: &str) -> Result<()> {
            self.commits.borrow_mut().push(message.to_string());
            Ok(())
        }
    }

    struct FailingPublisher;

    impl Publisher for FailingPublisher {
        fn has_changes(&self, _dir: &Path) -> Result<bool> {
            Ok(true)
        }

        fn commit_and_push(&self, _dir: &Path, _message: &str) -> Result<()> {
            Err(CivicError::Publish("git push exited with 128".into()))
        }
    }

    fn valid_dataset() -> Value {
        json!({
            "federal": {
                "president": { "name": "Jane Doe", "title": "President", "party": "Ind" },
                "vice_president": { "name": "John Roe", "title": "Vice President", "party": "Ind" },
                "speaker": { "name": "Alex Quinn", "title": "Speaker", "party": "Ind" }
            },
            "congress": {
                "house": { "total_seats": 435, "current_session": "120th", "term": "2027-2029", "majority_party": "Ind" },
                "senate": { "total_seats": 100, "current_session": "120th", "term": "2027-2029", "majority_party": "Ind" }
            },
            "states": {
                "CA": { "name": "California", "capital": "Sacramento", "senators": ["A", "B"], "representatives": 52 }
            },
            "zip_data": {
                "90210": { "state": "CA", "district": "30", "representative": "Rep X" }
            }
        })
    }

    fn pipeline(dir: &TempDir, data: Value, publisher: Box<dyn Publisher>) -> UpdatePipeline {
        let clock = FixedClock::at(2026, 8, 28, 14, 30, 0);
        let generator = Generator::with_clock(dir.path(), Box::new(clock)).unwrap();
        UpdatePipeline::with_clock(
            Box::new(ValueProvider(data)),
            generator,
            publisher,
            Box::new(clock),
        )
    }

    #[test]
    fn test_end_to_end_run() {
        let dir = TempDir::new().unwrap();
        let p = pipeline(&dir, valid_dataset(), Box::new(RecordingPublisher::default()));
        p.run().unwrap();

        for file in [DYNAMIC_DATA_FILE, STATES_DATA_FILE, ZIP_INDEX_FILE, VERSION_FILE] {
            assert!(dir.path().join(file).exists(), "{file} missing");
        }
        assert!(dir.path().join("zip_data_ca.json").exists());

        let index: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join(ZIP_INDEX_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(index["states"], json!(["CA"]));

        let version: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join(VERSION_FILE)).unwrap(),
        )
        .unwrap();
        let tag = version["version"].as_str().unwrap();
        assert_eq!(tag.len(), 12);
        assert!(tag.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(tag, "202608281430");
    }

    #[test]
    fn test_invalid_dataset_aborts_before_writes() {
        let dir = TempDir::new().unwrap();
        let mut data = valid_dataset();
        data.as_object_mut().unwrap().remove("zip_data");
        let p = pipeline(&dir, data, Box::new(RecordingPublisher::default()));

        let err = p.run().unwrap_err();
        assert!(matches!(err, CivicError::Validation(_)));
        assert!(!dir.path().join(DYNAMIC_DATA_FILE).exists());
        assert!(!dir.path().join(VERSION_FILE).exists());
    }

    #[test]
    fn test_publishes_with_timestamped_message() {
        let dir = TempDir::new().unwrap();
        let commits = Rc::new(RefCell::new(Vec::new()));
        let publisher = RecordingPublisher {
            changes: true,
            commits: Rc::clone(&commits),
        };
        let p = pipeline(&dir, valid_dataset(), Box::new(publisher));
        p.run().unwrap();

        let commits = commits.borrow();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0], "Update political data: 2026-08-28 14:30 UTC");
    }

    #[test]
    fn test_no_publish_when_no_changes() {
        let dir = TempDir::new().unwrap();
        let commits = Rc::new(RefCell::new(Vec::new()));
        let publisher = RecordingPublisher {
            changes: false,
            commits: Rc::clone(&commits),
        };
        let p = pipeline(&dir, valid_dataset(), Box::new(publisher));
        p.run().unwrap();
        assert!(commits.borrow().is_empty());
        assert!(dir.path().join(VERSION_FILE).exists());
    }

    #[test]
    fn test_publisher_failure_fails_the_run() {
        let dir = TempDir::new().unwrap();
        let p = pipeline(&dir, valid_dataset(), Box::new(FailingPublisher));
        let err = p.run().unwrap_err();
        assert!(matches!(err, CivicError::Publish(_)));
        // Artifacts written before the fault remain on disk.
        assert!(dir.path().join(VERSION_FILE).exists());
    }

    #[test]
    fn test_provider_failure_aborts_run() {
        struct BrokenProvider;
        impl DataProvider for BrokenProvider {
            fn collect_political_data(&self) -> Result<Value> {
                Err(CivicError::Provider("upstream unavailable".into()))
            }
        }

        let dir = TempDir::new().unwrap();
        let clock = FixedClock::at(2026, 8, 28, 14, 30, 0);
        let generator = Generator::with_clock(dir.path(), Box::new(clock)).unwrap();
        let p = UpdatePipeline::with_clock(
            Box::new(BrokenProvider),
            generator,
            Box::new(RecordingPublisher::default()),
            Box::new(clock),
        );
        let err = p.run().unwrap_err();
        assert!(matches!(err, CivicError::Provider(_)));
        assert!(!dir.path().join(DYNAMIC_DATA_FILE).exists());
    }
}
