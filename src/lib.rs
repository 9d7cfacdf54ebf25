//! # carspec
//!
//! A Rust library for recognizing a vehicle's make/model and production year
//! from a single photograph and assembling an engine specification record.
//! A shared convolutional backbone (built with the Burn framework) feeds two
//! classification heads; the decoded predictions key into a verified
//! specification store and drive a structured request to a generative text
//! service, whose parsed output is merged into one provenance-tagged record.
//!
//! ## Modules
//!
//! - `model`: backbone and dual classification heads built with Burn
//! - `inference`: image preprocessing and prediction decoding
//! - `labels`: class-index-to-label mappings loaded at startup
//! - `specs`: the verified store, record model, and merge rule
//! - `llm`: prompt construction, completion client, and strict reply parsing
//! - `pipeline`: the per-image orchestrator and response payload
//! - `utils`: error types and logging setup
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use carspec::config::PipelineConfig;
//! use carspec::llm::OllamaClient;
//! use carspec::pipeline::SpecPipeline;
//!
//! let config = PipelineConfig::load("carspec.json".as_ref())?;
//! let estimator = Arc::new(OllamaClient::from_config(&config.estimator)?);
//! let pipeline = SpecPipeline::load(&config, estimator)?;
//!
//! let bytes = std::fs::read("car.jpg")?;
//! let response = pipeline.predict_image(&bytes).await?;
//! println!("{} ({})", response.car, response.year);
//! ```

pub mod backend;
pub mod config;
pub mod inference;
pub mod labels;
pub mod llm;
pub mod model;
pub mod pipeline;
pub mod specs;
pub mod utils;

// Re-export commonly used items for convenience
pub use config::{EstimatorConfig, PipelineConfig};
pub use inference::predictor::ClassPrediction;
pub use labels::ClassIndexMap;
pub use llm::client::{CompletionError, OllamaClient, TextCompletion};
pub use model::{CarNet, CarNetConfig};
pub use pipeline::{ConfidenceScores, PredictResponse, SpecPipeline};
pub use specs::record::{EngineField, EngineRecord, Provenance, SpecValue};
pub use specs::store::{SpecStore, VehicleKey};
pub use utils::error::{CarSpecError, Result};

/// Default input image size fed to the backbone
pub const IMAGE_SIZE: usize = 224;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
