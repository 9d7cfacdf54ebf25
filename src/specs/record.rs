//! Engine Specification Records
//!
//! The final output of the pipeline is an `EngineRecord`: a map from field
//! name to a value tagged with its provenance and a confidence score.
//! Verified store data is authoritative by construction (confidence 1.0);
//! estimated data carries the confidence the estimator reported.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A specification value: numeric (displacement, bhp, ...) or textual
/// (aspiration, gearbox, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for SpecValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecValue::Number(n) => write!(f, "{}", n),
            SpecValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Where a field's value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Looked up in the verified specification store
    Verified,
    /// Inferred by the generative estimation service
    Estimated,
}

/// One attribute of the final record, with provenance and confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineField {
    pub value: SpecValue,
    pub source: Provenance,
    pub confidence: f32,
}

impl EngineField {
    /// A field backed by the verified store; always confidence 1.0
    pub fn verified(value: SpecValue) -> Self {
        Self {
            value,
            source: Provenance::Verified,
            confidence: 1.0,
        }
    }

    /// A field produced by the estimator; confidence clamped to [0, 1]
    pub fn estimated(value: SpecValue, confidence: f32) -> Self {
        Self {
            value,
            source: Provenance::Estimated,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// The merged, provenance-tagged attribute set returned to the caller.
/// Field names are unique; map order is not meaningful.
pub type EngineRecord = BTreeMap<String, EngineField>;

/// Merge verified and estimated contributions into one record.
///
/// Verified fields are inserted first, then estimated fields, overwriting
/// any same-named entry. Estimated values therefore win on name collisions;
/// flip the insertion order here to let verified data take precedence
/// instead.
pub fn merge_records(verified: EngineRecord, estimated: EngineRecord) -> EngineRecord {
    let mut merged = verified;
    for (name, field) in estimated {
        merged.insert(name, field);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verified_field_confidence_is_one() {
        let field = EngineField::verified(SpecValue::Number(2.0));
        assert_eq!(field.source, Provenance::Verified);
        assert_eq!(field.confidence, 1.0);
    }

    #[test]
    fn test_estimated_confidence_is_clamped() {
        let low = EngineField::estimated(SpecValue::Number(150.0), -0.5);
        let high = EngineField::estimated(SpecValue::Number(150.0), 1.7);
        assert_eq!(low.confidence, 0.0);
        assert_eq!(high.confidence, 1.0);
    }

    #[test]
    fn test_merge_keeps_disjoint_fields() {
        let mut verified = EngineRecord::new();
        verified.insert(
            "displacement".to_string(),
            EngineField::verified(SpecValue::Number(2.0)),
        );

        let mut estimated = EngineRecord::new();
        estimated.insert(
            "bhp".to_string(),
            EngineField::estimated(SpecValue::Number(190.0), 0.8),
        );

        let merged = merge_records(verified, estimated);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["displacement"].source, Provenance::Verified);
        assert_eq!(merged["bhp"].source, Provenance::Estimated);
    }

    #[test]
    fn test_merge_estimated_wins_on_collision() {
        let mut verified = EngineRecord::new();
        verified.insert(
            "doors".to_string(),
            EngineField::verified(SpecValue::Number(4.0)),
        );

        let mut estimated = EngineRecord::new();
        estimated.insert(
            "doors".to_string(),
            EngineField::estimated(SpecValue::Number(2.0), 0.6),
        );

        let merged = merge_records(verified, estimated);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged["doors"].value, SpecValue::Number(2.0));
        assert_eq!(merged["doors"].source, Provenance::Estimated);
        assert_eq!(merged["doors"].confidence, 0.6);
    }

    #[test]
    fn test_provenance_serialization() {
        let field = EngineField::verified(SpecValue::Text("manual".to_string()));
        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains(r#""source":"verified""#));
        assert!(json.contains(r#""value":"manual""#));
    }

    #[test]
    fn test_spec_value_untagged_round_trip() {
        let number: SpecValue = serde_json::from_str("210").unwrap();
        let text: SpecValue = serde_json::from_str(r#""turbo""#).unwrap();
        assert_eq!(number, SpecValue::Number(210.0));
        assert_eq!(text, SpecValue::Text("turbo".to_string()));
    }
}
