//! Workflow event descriptor parsing.
//!
//! The event file is read once at startup. Only the PR number is needed,
//! so the schema is a single required field; anything missing or
//! malformed is a configuration error, not a best-effort coercion.

use crate::error::AppError;
use serde::Deserialize;
use std::path::Path;

/// The minimal shape of a pull-request event payload.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PullRequestEvent {
    pub number: u64,
}

/// Read and parse the event descriptor at `path`.
pub fn load_event(path: &Path) -> Result<PullRequestEvent, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::config(format!(
            "could not read event descriptor {}: {e}",
            path.display()
        ))
    })?;
    parse_event(&raw)
}

/// Parse an event descriptor from raw JSON.
pub fn parse_event(raw: &str) -> Result<PullRequestEvent, AppError> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::config(format!("invalid event descriptor: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_valid_event() {
        let event = parse_event(r#"{"number": 42, "action": "opened"}"#).unwrap();
        assert_eq!(event.number, 42);
    }

    #[test]
    fn test_missing_number_rejected() {
        let err = parse_event(r#"{"action": "opened"}"#).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }

    #[test]
    fn test_malformed_number_rejected() {
        assert!(parse_event(r#"{"number": "42"}"#).is_err());
        assert!(parse_event(r#"{"number": -1}"#).is_err());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = parse_event("not json").unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }

    #[test]
    fn test_load_event_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"number": 7}}"#).unwrap();

        let event = load_event(file.path()).unwrap();
        assert_eq!(event.number, 7);
    }

    #[test]
    fn test_load_event_missing_file() {
        let err = load_event(Path::new("/nonexistent/event.json")).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }
}
