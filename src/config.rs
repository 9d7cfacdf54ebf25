//! Pipeline Configuration
//!
//! Paths to the startup artifacts (weights, class maps, specification store)
//! and settings for the estimation service. Loaded once at process start;
//! any missing artifact is startup-fatal, never a per-request error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::error::{CarSpecError, Result};

/// Settings for the generative estimation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Endpoint of the text-generation API
    pub url: String,

    /// Model name passed to the service
    pub model: String,

    /// Request timeout in seconds (single attempt, no retries)
    pub timeout_secs: u64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:11434/api/generate".to_string(),
            model: "gemma3:4b-it-q4_K_M".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Full pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Serialized CarNet weights (CompactRecorder format)
    pub weights_path: PathBuf,

    /// JSON class map for vehicle identity labels
    pub model_classes_path: PathBuf,

    /// JSON class map for production year labels
    pub year_classes_path: PathBuf,

    /// JSON artifact of the verified specification store
    pub spec_store_path: PathBuf,

    /// Input image size fed to the backbone
    pub input_size: usize,

    /// Base filter count of the backbone (embedding dim = base * 8)
    pub base_filters: usize,

    /// Estimation service settings
    pub estimator: EstimatorConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            weights_path: PathBuf::from("saved_models/carnet.mpk"),
            model_classes_path: PathBuf::from("saved_models/class_to_idx.json"),
            year_classes_path: PathBuf::from("saved_models/year_to_idx.json"),
            spec_store_path: PathBuf::from("engine_specs.json"),
            input_size: 224,
            base_filters: 32,
            estimator: EstimatorConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 || self.input_size % 16 != 0 {
            return Err(CarSpecError::Config(
                "input_size must be a positive multiple of 16".to_string(),
            ));
        }

        if self.base_filters == 0 {
            return Err(CarSpecError::Config(
                "base_filters must be greater than 0".to_string(),
            ));
        }

        if self.estimator.timeout_secs == 0 {
            return Err(CarSpecError::Config(
                "estimator timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CarSpecError::Serialization(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| CarSpecError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
