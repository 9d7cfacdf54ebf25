//! Verified specification data: the trusted store, the record model, and
//! the merge rule that combines store data with estimator output.

pub mod record;
pub mod store;

pub use record::{merge_records, EngineField, EngineRecord, Provenance, SpecValue};
pub use store::{SpecStore, VehicleKey};
