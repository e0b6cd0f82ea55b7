use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

const REQUIRED_SECTIONS: [&str; 4] = ["federal", "congress", "states", "zip_data"];
const FEDERAL_POSITIONS: [&str; 3] = ["president", "vice_president", "speaker"];
const PERSON_FIELDS: [&str; 3] = ["name", "title", "party"];
const CHAMBERS: [&str; 2] = ["house", "senate"];
const CHAMBER_FIELDS: [&str; 4] = ["total_seats", "current_session", "term", "majority_party"];
const STATE_FIELDS: [&str; 4] = ["name", "capital", "senators", "representatives"];
const ZIP_FIELDS: [&str; 3] = ["state", "district", "representative"];

fn state_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{2}$").expect("state code regex"))
}

fn zip_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{5}$").expect("zip code regex"))
}

/// Validate a collected dataset against the expected shape.
/// All-or-nothing: stops at the first violation, logs it, and returns
/// false. Never panics on malformed input — a non-object where an
/// object is expected is just another validation failure.
pub fn validate_political_data(data: &Value) -> bool {
    match check_dataset(data) {
        Ok(()) => true,
        Err(msg) => {
            log::error!("{msg}");
            false
        }
    }
}

/// Same checks as `validate_political_data`, surfacing the first
/// violation instead of logging it.
pub fn check_dataset(data: &Value) -> Result<(), String> {
    let root = data
        .as_object()
        .ok_or_else(|| "Dataset must be a JSON object".to_string())?;

    for section in REQUIRED_SECTIONS {
        if !root.contains_key(section) {
            return Err(format!("Missing required section: {section}"));
        }
    }

    check_federal(&root["federal"])?;
    check_congress(&root["congress"])?;
    check_states(&root["states"])?;
    check_zip_data(&root["zip_data"])?;
    Ok(())
}

fn check_federal(data: &Value) -> Result<(), String> {
    let federal = data
        .as_object()
        .ok_or_else(|| "Federal section must be an object".to_string())?;

    for position in FEDERAL_POSITIONS {
        let entry = federal
            .get(position)
            .ok_or_else(|| format!("Missing federal position: {position}"))?;
        let record = entry
            .as_object()
            .ok_or_else(|| format!("Invalid data type for {position}"))?;

        for field in PERSON_FIELDS {
            let value = record
                .get(field)
                .ok_or_else(|| format!("Missing field {field} in {position}"))?;
            if !value.is_string() {
                return Err(format!("Invalid type for {field} in {position}"));
            }
        }
    }
    Ok(())
}

fn check_congress(data: &Value) -> Result<(), String> {
    let congress = data
        .as_object()
        .ok_or_else(|| "Congress section must be an object".to_string())?;

    for chamber in CHAMBERS {
        let entry = congress
            .get(chamber)
            .ok_or_else(|| format!("Missing chamber: {chamber}"))?;
        let record = entry
            .as_object()
            .ok_or_else(|| format!("Invalid data type for chamber {chamber}"))?;

        // Presence only -- seat counts and session labels vary in type
        // across sources.
        for field in CHAMBER_FIELDS {
            if !record.contains_key(field) {
                return Err(format!("Missing field {field} in {chamber}"));
            }
        }
    }
    Ok(())
}

fn check_states(data: &Value) -> Result<(), String> {
    let states = data
        .as_object()
        .ok_or_else(|| "States section must be an object".to_string())?;
    if states.is_empty() {
        return Err("States data is empty".to_string());
    }

    for (code, entry) in states {
        if !state_code_re().is_match(code) {
            return Err(format!("Invalid state code: {code}"));
        }
        let record = entry
            .as_object()
            .ok_or_else(|| format!("Invalid data type for state {code}"))?;

        for field in STATE_FIELDS {
            if !record.contains_key(field) {
                return Err(format!("Missing field {field} in state {code}"));
            }
        }

        let senators = record["senators"]
            .as_array()
            .ok_or_else(|| format!("Senators must be a list for state {code}"))?;
        if senators.len() != 2 {
            return Err(format!("Each state must have exactly 2 senators: {code}"));
        }
    }
    Ok(())
}

fn check_zip_data(data: &Value) -> Result<(), String> {
    let zip_data = data
        .as_object()
        .ok_or_else(|| "ZIP section must be an object".to_string())?;
    if zip_data.is_empty() {
        return Err("ZIP data is empty".to_string());
    }

    for (zip_code, entry) in zip_data {
        if !zip_code_re().is_match(zip_code) {
            return Err(format!("Invalid ZIP code: {zip_code}"));
        }
        let record = entry
            .as_object()
            .ok_or_else(|| format!("Invalid data type for ZIP {zip_code}"))?;

        for field in ZIP_FIELDS {
            if !record.contains_key(field) {
                return Err(format!("Missing field {field} in ZIP {zip_code}"));
            }
        }
    }
    Ok(())
}
