//! Inference module for image preprocessing and prediction decoding
//!
//! This module provides:
//! - Decoding and normalization of raw image bytes into model input tensors
//! - Softmax normalization, argmax selection, and label lookup for each head

pub mod predictor;
pub mod preprocess;

pub use predictor::{decode_prediction, probabilities, ClassPrediction};
pub use preprocess::{decode_image, image_to_tensor};
