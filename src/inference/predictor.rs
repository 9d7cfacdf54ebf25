//! Prediction Decoder
//!
//! Converts the raw logit vector a head emits into a single calibrated
//! prediction: softmax normalization, argmax selection, and label lookup.
//! The maximum class probability doubles as the confidence value.

use burn::tensor::{activation::softmax, backend::Backend, Tensor};
use serde::{Deserialize, Serialize};

use crate::labels::ClassIndexMap;
use crate::utils::error::{CarSpecError, Result};

/// A single decoded class prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPrediction {
    /// Human-readable label of the winning class
    pub label: String,

    /// Probability of the winning class, in [0, 1]
    pub confidence: f32,
}

/// Normalize a `[1, n]` logit tensor into a probability vector.
///
/// Values are non-negative and sum to 1 across the label set.
pub fn probabilities<B: Backend>(logits: Tensor<B, 2>) -> Result<Vec<f32>> {
    softmax(logits, 1)
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| CarSpecError::Inference(format!("failed to read probabilities: {:?}", e)))
}

/// Select the winning class from a probability vector and map it to a label.
///
/// Ties resolve to the lowest class index: only a strictly greater
/// probability displaces the current winner during the scan, so the first
/// maximum encountered wins. This keeps outputs reproducible.
pub fn decode_prediction(probabilities: &[f32], labels: &ClassIndexMap) -> Result<ClassPrediction> {
    if probabilities.is_empty() {
        return Err(CarSpecError::Inference(
            "empty probability vector".to_string(),
        ));
    }
    if probabilities.len() != labels.len() {
        return Err(CarSpecError::Inference(format!(
            "probability vector has {} entries but the label map has {}",
            probabilities.len(),
            labels.len()
        )));
    }

    let mut best_idx = 0;
    let mut best_prob = probabilities[0];
    for (idx, &prob) in probabilities.iter().enumerate().skip(1) {
        if prob > best_prob {
            best_idx = idx;
            best_prob = prob;
        }
    }

    let label = labels
        .label(best_idx)
        .ok_or_else(|| CarSpecError::Labels(format!("class index {} has no label", best_idx)))?;

    Ok(ClassPrediction {
        label: label.to_string(),
        confidence: best_prob,
    })
}
