//! Pipeline Orchestrator
//!
//! `SpecPipeline` sequences the full per-image flow: decode, embed, classify
//! both heads, decode predictions, look up the verified store, request an
//! estimate, merge, and assemble the response payload. The pipeline owns the
//! process-lifetime read-only state (model, class maps, store) and is safe to
//! share across concurrent requests behind an `Arc`.
//!
//! Failure policy: image decoding and inference failures abort the request;
//! estimation failures never do. An estimation failure is recorded in the
//! response's `llm_error` field and the record degrades to the store's
//! contribution alone.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::backend::{default_device, InferenceBackend};
use crate::config::PipelineConfig;
use crate::inference::predictor::{decode_prediction, probabilities};
use crate::inference::preprocess::{decode_image, image_to_tensor};
use crate::labels::ClassIndexMap;
use crate::llm::client::TextCompletion;
use crate::llm::estimate::parse_estimate;
use crate::llm::prompt::build_prompt;
use crate::model::{CarNet, CarNetConfig};
use crate::specs::record::{merge_records, EngineRecord};
use crate::specs::store::{SpecStore, VehicleKey};
use crate::utils::error::Result;

type Device = <InferenceBackend as burn::tensor::backend::Backend>::Device;

/// Confidence scores of the two classification heads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceScores {
    /// Vehicle identity confidence
    pub model: f32,
    /// Production year confidence
    pub year: f32,
}

/// Final response payload for one image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Predicted vehicle identity label
    pub car: String,

    /// Predicted production year label
    pub year: String,

    /// Per-head confidences
    pub confidence: ConfidenceScores,

    /// Merged, provenance-tagged engine specification record
    pub engine: EngineRecord,

    /// Diagnostic detail when the estimation stage failed; the rest of the
    /// response is still valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_error: Option<String>,
}

/// The per-image prediction pipeline
pub struct SpecPipeline {
    model: CarNet<InferenceBackend>,
    device: Device,
    input_size: usize,
    model_labels: ClassIndexMap,
    year_labels: ClassIndexMap,
    store: SpecStore,
    estimator: Arc<dyn TextCompletion>,
}

impl SpecPipeline {
    /// Load all startup artifacts and assemble the pipeline.
    ///
    /// A missing or malformed artifact (weights, class maps, store) is
    /// startup-fatal.
    pub fn load(config: &PipelineConfig, estimator: Arc<dyn TextCompletion>) -> Result<Self> {
        config.validate()?;

        let device = default_device();

        let model_labels = ClassIndexMap::load(&config.model_classes_path)?;
        let year_labels = ClassIndexMap::load(&config.year_classes_path)?;
        let store = SpecStore::load(&config.spec_store_path)?;

        let net_config = CarNetConfig::new(model_labels.len(), year_labels.len())
            .with_input_size(config.input_size)
            .with_base_filters(config.base_filters);

        let model = CarNet::new(&net_config, &device)
            .load_weights(&config.weights_path, &device)?;

        info!(
            "Pipeline ready: {} identity classes, {} year classes, {} store entries",
            model_labels.len(),
            year_labels.len(),
            store.len()
        );

        Ok(Self {
            model,
            device,
            input_size: config.input_size,
            model_labels,
            year_labels,
            store,
            estimator,
        })
    }

    /// Assemble a pipeline from already-constructed parts (used in tests and
    /// by callers that manage their own artifact loading)
    pub fn from_parts(
        model: CarNet<InferenceBackend>,
        input_size: usize,
        model_labels: ClassIndexMap,
        year_labels: ClassIndexMap,
        store: SpecStore,
        estimator: Arc<dyn TextCompletion>,
    ) -> Self {
        Self {
            model,
            device: default_device(),
            input_size,
            model_labels,
            year_labels,
            store,
            estimator,
        }
    }

    /// Run the full pipeline on one image, given as raw PNG/JPEG bytes.
    pub async fn predict_image(&self, bytes: &[u8]) -> Result<PredictResponse> {
        // Stage 1: decode and normalize
        let image = decode_image(bytes)?;
        let tensor = image_to_tensor::<InferenceBackend>(&image, self.input_size, &self.device);

        // Stage 2: shared embedding, dual heads, decode
        let (identity_logits, year_logits) = self.model.forward(tensor);
        let identity = decode_prediction(&probabilities(identity_logits)?, &self.model_labels)?;
        let year = decode_prediction(&probabilities(year_logits)?, &self.year_labels)?;

        debug!(
            "Classified as {} ({}) with confidences {:.3}/{:.3}",
            identity.label, year.label, identity.confidence, year.confidence
        );

        // Stage 3: verified store lookup
        let key = VehicleKey::new(identity.label.clone(), year.label.clone());
        let verified = self.store.verified_fields(&key);

        // Stage 4: estimation request, constrained iff the store had data
        let prompt = build_prompt(&key, self.store.lookup(&key));
        let (estimated, llm_error) = self.request_estimate(&prompt).await;

        // Stage 5: merge, estimated entries overwriting verified ones
        let engine = merge_records(verified, estimated);

        // Stage 6: response assembly
        Ok(PredictResponse {
            car: identity.label,
            year: year.label,
            confidence: ConfidenceScores {
                model: identity.confidence,
                year: year.confidence,
            },
            engine,
            llm_error,
        })
    }

    /// One estimation attempt. Transport, timeout, and parse failures all
    /// degrade to an empty record plus a diagnostic string.
    async fn request_estimate(&self, prompt: &str) -> (EngineRecord, Option<String>) {
        match self.estimator.complete(prompt).await {
            Ok(raw) => match parse_estimate(&raw) {
                Ok(record) => (record, None),
                Err(e) => {
                    warn!("Estimation reply unusable: {}", e);
                    (EngineRecord::new(), Some(e.to_string()))
                }
            },
            Err(e) => {
                warn!("Estimation request failed: {}", e);
                (EngineRecord::new(), Some(e.to_string()))
            }
        }
    }

}
