//! Verified Specification Store
//!
//! A process-lifetime, read-only lookup table of trusted vehicle attributes,
//! keyed by the combination of identity label and year label. Loaded once at
//! startup from a JSON artifact of the form:
//!
//! ```json
//! {
//!   "Audi_A4_2014": { "displacement": 2.0, "max_speed": 210, "doors": 4, "seats": 5 }
//! }
//! ```
//!
//! An absent key is a legitimate "no data" outcome, not an error.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::specs::record::{EngineField, EngineRecord, SpecValue};
use crate::utils::error::{CarSpecError, Result, ResultExt};

/// Join key between the classification outputs and the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleKey {
    /// Winning vehicle identity label
    pub model: String,
    /// Winning production year label
    pub year: String,
}

impl VehicleKey {
    pub fn new(model: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            year: year.into(),
        }
    }

    /// The flat key format used by the store artifact
    pub fn storage_key(&self) -> String {
        format!("{}_{}", self.model, self.year)
    }
}

/// Static mapping from vehicle key to a partial set of trusted fields
#[derive(Debug, Clone, Default)]
pub struct SpecStore {
    entries: HashMap<String, BTreeMap<String, SpecValue>>,
}

impl SpecStore {
    /// Build a store from pre-assembled entries (used in tests)
    pub fn from_entries(entries: HashMap<String, BTreeMap<String, SpecValue>>) -> Self {
        Self { entries }
    }

    /// Parse a store from its JSON artifact representation
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: HashMap<String, BTreeMap<String, SpecValue>> = serde_json::from_str(json)
            .map_err(|e| {
                CarSpecError::Serialization(format!("invalid specification store JSON: {}", e))
            })?;
        Ok(Self { entries })
    }

    /// Load a store from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read specification store at {:?}", path))?;
        Self::from_json_str(&json)
    }

    /// Exact-match lookup; `None` when the combination is unknown
    pub fn lookup(&self, key: &VehicleKey) -> Option<&BTreeMap<String, SpecValue>> {
        self.entries.get(&key.storage_key())
    }

    /// The store's contribution to the final record: every known field for
    /// the key, tagged verified with confidence 1.0. Empty when the key is
    /// absent.
    pub fn verified_fields(&self, key: &VehicleKey) -> EngineRecord {
        let mut record = EngineRecord::new();
        if let Some(fields) = self.lookup(key) {
            for (name, value) in fields {
                record.insert(name.clone(), EngineField::verified(value.clone()));
            }
        }
        record
    }

    /// Number of vehicle entries in the store
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
