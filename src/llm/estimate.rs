//! Structured Estimate Parsing
//!
//! The completion service is instructed to return one JSON object, but real
//! replies sometimes arrive wrapped in code fences or a leading `json` tag.
//! This module strips such wrappers and parses the object strictly: every
//! entry must be an object with a usable `value` (number or string) and a
//! numeric `confidence`. A single malformed entry fails the whole estimate;
//! the caller records the reason and degrades to zero estimated fields.

use serde_json::Value;
use thiserror::Error;

use crate::specs::record::{EngineField, EngineRecord, SpecValue};

/// Reasons an estimate reply is unusable
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("Estimation reply is not valid JSON: {0}")]
    Json(String),

    #[error("Estimation reply is not a JSON object")]
    NotAnObject,

    #[error("Field '{0}' is not an object")]
    FieldShape(String),

    #[error("Field '{0}' is missing a usable value")]
    MissingValue(String),

    #[error("Field '{0}' has a missing or non-numeric confidence")]
    BadConfidence(String),
}

/// Strip conversational wrappers from a reply: surrounding whitespace, code
/// fences, and a leading `json` language tag.
pub fn strip_reply_wrapper(raw: &str) -> &str {
    let body = raw.trim();
    let body = body.trim_matches('`').trim();
    body.strip_prefix("json").unwrap_or(body).trim()
}

/// Parse a raw completion reply into estimated fields.
pub fn parse_estimate(raw: &str) -> Result<EngineRecord, EstimateError> {
    let body = strip_reply_wrapper(raw);

    let parsed: Value =
        serde_json::from_str(body).map_err(|e| EstimateError::Json(e.to_string()))?;
    let object = parsed.as_object().ok_or(EstimateError::NotAnObject)?;

    let mut record = EngineRecord::new();
    for (name, entry) in object {
        let entry = entry
            .as_object()
            .ok_or_else(|| EstimateError::FieldShape(name.clone()))?;

        let value = match entry.get("value") {
            Some(Value::Number(n)) => n
                .as_f64()
                .map(SpecValue::Number)
                .ok_or_else(|| EstimateError::MissingValue(name.clone()))?,
            Some(Value::String(s)) => SpecValue::Text(s.clone()),
            _ => return Err(EstimateError::MissingValue(name.clone())),
        };

        let confidence = entry
            .get("confidence")
            .and_then(Value::as_f64)
            .ok_or_else(|| EstimateError::BadConfidence(name.clone()))?;

        record.insert(name.clone(), EngineField::estimated(value, confidence as f32));
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::record::Provenance;

    const GOOD_REPLY: &str = r#"{
        "bhp": { "value": 190, "confidence": 0.85 },
        "gearbox": { "value": "automatic", "confidence": 0.7 },
        "acceleration": { "value": 7.3, "confidence": 0.6, "unit": "s (0-100)" }
    }"#;

    #[test]
    fn test_parses_plain_reply() {
        let record = parse_estimate(GOOD_REPLY).unwrap();

        assert_eq!(record.len(), 3);
        assert_eq!(record["bhp"].value, SpecValue::Number(190.0));
        assert_eq!(record["bhp"].source, Provenance::Estimated);
        assert_eq!(record["bhp"].confidence, 0.85);
        assert_eq!(
            record["gearbox"].value,
            SpecValue::Text("automatic".to_string())
        );
    }

    #[test]
    fn test_strips_code_fences() {
        let wrapped = format!("```json\n{}\n```", GOOD_REPLY);
        let record = parse_estimate(&wrapped).unwrap();
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_strips_bare_backticks() {
        let wrapped = format!("`{}`", GOOD_REPLY);
        assert!(parse_estimate(&wrapped).is_ok());
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(matches!(
            parse_estimate("The car probably has 190 bhp."),
            Err(EstimateError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_non_object_reply() {
        assert!(matches!(
            parse_estimate("[1, 2, 3]"),
            Err(EstimateError::NotAnObject)
        ));
    }

    #[test]
    fn test_rejects_missing_value() {
        let reply = r#"{ "bhp": { "confidence": 0.8 } }"#;
        assert!(matches!(
            parse_estimate(reply),
            Err(EstimateError::MissingValue(name)) if name == "bhp"
        ));
    }

    #[test]
    fn test_rejects_non_numeric_confidence() {
        let reply = r#"{ "bhp": { "value": 190, "confidence": "high" } }"#;
        assert!(matches!(
            parse_estimate(reply),
            Err(EstimateError::BadConfidence(name)) if name == "bhp"
        ));
    }

    #[test]
    fn test_rejects_scalar_field_entry() {
        let reply = r#"{ "bhp": 190 }"#;
        assert!(matches!(
            parse_estimate(reply),
            Err(EstimateError::FieldShape(name)) if name == "bhp"
        ));
    }

    #[test]
    fn test_out_of_range_confidence_is_clamped() {
        let reply = r#"{ "bhp": { "value": 190, "confidence": 1.4 } }"#;
        let record = parse_estimate(reply).unwrap();
        assert_eq!(record["bhp"].confidence, 1.0);
    }
}
