// Dataset shape notes - the collected data itself stays dynamic
// (serde_json::Value); its shape is enforced by the validation module.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Version stamp for a published dataset. Generated, never validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionInfo {
    pub last_updated: String,
    pub version: String,
}

impl VersionInfo {
    /// Derive both fields from one instant: `last_updated` as ISO-8601
    /// UTC, `version` as the same instant at minute granularity
    /// (`YYYYMMDDHHMM`, 12 digits).
    pub fn at(now: DateTime<Utc>) -> Self {
        VersionInfo {
            last_updated: iso_utc(now),
            version: now.format("%Y%m%d%H%M").to_string(),
        }
    }
}

/// ISO-8601 UTC timestamp used for every `last_updated` field.
pub fn iso_utc(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_version_info_fields() {
        let now = Utc.with_ymd_and_hms(2026, 8, 28, 14, 30, 5).unwrap();
        let info = VersionInfo::at(now);
        assert_eq!(info.version, "202608281430");
        assert_eq!(info.version.len(), 12);
        assert!(info.version.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(info.last_updated, "2026-08-28T14:30:05.000000Z");
    }
}
