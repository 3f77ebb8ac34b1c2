//! JSON rendering of reports
//!
//! A report that fails to serialize is replaced by an [`ErrorReport`] with
//! the `SERIALIZATION_ERROR` code, so callers always get one valid document.

use serde::Serialize;

use super::types::{error_codes, ErrorReport};

/// Pretty-printed JSON for a report.
pub fn format_json<T: Serialize + ?Sized>(report: &T) -> String {
    render(report, true)
}

/// Single-line JSON for a report.
pub fn format_json_compact<T: Serialize + ?Sized>(report: &T) -> String {
    render(report, false)
}

fn render<T: Serialize + ?Sized>(report: &T, pretty: bool) -> String {
    to_json(report, pretty).unwrap_or_else(|e| {
        let failure = ErrorReport {
            error: true,
            code: error_codes::SERIALIZATION_ERROR.to_string(),
            message: e.to_string(),
            position: None,
        };
        to_json(&failure, pretty).unwrap_or_default()
    })
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::output::{CaptureReport, MatchReport};

    fn report() -> MatchReport {
        MatchReport {
            text: "zx".to_string(),
            start: 0,
            end: 2,
            captures: vec![CaptureReport {
                group: 1,
                name: None,
                text: None,
                start: None,
                end: None,
            }],
        }
    }

    #[test]
    fn test_compact_skips_missing_name() {
        let json = format_json_compact(&report());
        assert_eq!(
            json,
            r#"{"text":"zx","start":0,"end":2,"captures":[{"group":1,"text":null,"start":null,"end":null}]}"#
        );
    }

    #[test]
    fn test_unserializable_report_becomes_error_report() {
        let mut bad = HashMap::new();
        bad.insert((1u8, 2u8), "pair \"quoted\"");

        let report: ErrorReport = serde_json::from_str(&format_json_compact(&bad)).unwrap();
        assert!(report.error);
        assert_eq!(report.code, error_codes::SERIALIZATION_ERROR);
        assert!(report.message.contains("key must be a string"));

        let pretty: ErrorReport = serde_json::from_str(&format_json(&bad)).unwrap();
        assert_eq!(pretty, report);
    }

    #[test]
    fn test_pretty_round_trips() {
        let json = format_json(&report());
        let back: MatchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report());
    }
}
