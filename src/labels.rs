//! Class Label Mapping Module
//!
//! A `ClassIndexMap` is the bidirectional mapping between the integer class
//! indices a classification head emits and their human-readable labels. One
//! instance exists per head (vehicle identity, production year), loaded once
//! at startup from a JSON object of the form `{"label": index, ...}` and
//! read-only afterwards.

use std::collections::HashMap;
use std::path::Path;

use crate::utils::error::{CarSpecError, Result, ResultExt};

/// Bidirectional mapping between class indices and labels.
///
/// Indices must be dense (`0..n` with no gaps or duplicates) so that the
/// position of a logit in a score vector is also its class index.
#[derive(Debug, Clone)]
pub struct ClassIndexMap {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl ClassIndexMap {
    /// Build a map from `label -> index` pairs, validating density
    pub fn from_map(mapping: HashMap<String, usize>) -> Result<Self> {
        let n = mapping.len();
        if n == 0 {
            return Err(CarSpecError::Labels("class map is empty".to_string()));
        }

        let mut labels: Vec<Option<String>> = vec![None; n];
        for (label, idx) in &mapping {
            if *idx >= n {
                return Err(CarSpecError::Labels(format!(
                    "class index {} out of range for {} classes",
                    idx, n
                )));
            }
            if labels[*idx].is_some() {
                return Err(CarSpecError::Labels(format!(
                    "duplicate class index {}",
                    idx
                )));
            }
            labels[*idx] = Some(label.clone());
        }

        // All slots are filled: n entries landed in n distinct slots.
        let labels: Vec<String> = labels.into_iter().flatten().collect();
        Ok(Self {
            labels,
            index: mapping,
        })
    }

    /// Parse a map from a JSON string of the form `{"label": index, ...}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mapping: HashMap<String, usize> = serde_json::from_str(json)
            .map_err(|e| CarSpecError::Serialization(format!("invalid class map JSON: {}", e)))?;
        Self::from_map(mapping)
    }

    /// Load a map from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read class map at {:?}", path))?;
        Self::from_json_str(&json)
    }

    /// Get the label for a class index
    pub fn label(&self, idx: usize) -> Option<&str> {
        self.labels.get(idx).map(|s| s.as_str())
    }

    /// Get the class index for a label
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Number of classes in the map
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the map holds no classes
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> HashMap<String, usize> {
        HashMap::from([
            ("Audi_A4".to_string(), 0),
            ("BMW_3_Series".to_string(), 1),
            ("Citroen_C3".to_string(), 2),
        ])
    }

    #[test]
    fn test_round_trip() {
        let map = ClassIndexMap::from_map(sample_map()).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.label(1), Some("BMW_3_Series"));
        assert_eq!(map.index_of("Citroen_C3"), Some(2));
        assert_eq!(map.label(3), None);
        assert_eq!(map.index_of("Unknown"), None);
    }

    #[test]
    fn test_rejects_sparse_indices() {
        let mapping = HashMap::from([
            ("Audi_A4".to_string(), 0),
            ("BMW_3_Series".to_string(), 2), // gap at 1
        ]);
        assert!(ClassIndexMap::from_map(mapping).is_err());
    }

    #[test]
    fn test_rejects_duplicate_indices() {
        let mapping = HashMap::from([
            ("Audi_A4".to_string(), 0),
            ("BMW_3_Series".to_string(), 0),
        ]);
        assert!(ClassIndexMap::from_map(mapping).is_err());
    }

    #[test]
    fn test_rejects_empty_map() {
        assert!(ClassIndexMap::from_map(HashMap::new()).is_err());
    }

    #[test]
    fn test_from_json_str() {
        let map = ClassIndexMap::from_json_str(r#"{"2008": 0, "2014": 1}"#).unwrap();
        assert_eq!(map.label(0), Some("2008"));
        assert_eq!(map.index_of("2014"), Some(1));
    }

    #[test]
    fn test_from_json_str_rejects_garbage() {
        assert!(ClassIndexMap::from_json_str("not json").is_err());
        assert!(ClassIndexMap::from_json_str(r#"{"a": "b"}"#).is_err());
    }
}
