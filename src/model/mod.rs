//! Vehicle Recognition Model
//!
//! `CarNet` combines a shared convolutional feature extractor with two
//! independent classification heads (vehicle identity, production year).
//! Weights are persisted with Burn's `CompactRecorder` and loaded once at
//! startup; a missing weight file is startup-fatal.

pub mod backbone;
pub mod heads;

pub use backbone::{ConvBlock, FeatureExtractor};
pub use heads::{IdentityHead, YearHead};

use std::path::Path;

use burn::{
    config::Config,
    module::Module,
    record::CompactRecorder,
    tensor::{backend::Backend, Tensor},
};

use crate::utils::error::CarSpecError;

/// Configuration for the CarNet model
#[derive(Config, Debug)]
pub struct CarNetConfig {
    /// Number of vehicle identity classes
    pub model_classes: usize,

    /// Number of production year classes
    pub year_classes: usize,

    /// Input image size (assumes square images)
    #[config(default = "224")]
    pub input_size: usize,

    /// Number of input channels (3 for RGB)
    #[config(default = "3")]
    pub in_channels: usize,

    /// Base number of convolutional filters; the embedding dimension is
    /// `base_filters * 8`
    #[config(default = "32")]
    pub base_filters: usize,

    /// Dropout rate inside the identity head
    #[config(default = "0.5")]
    pub dropout_rate: f64,
}

impl CarNetConfig {
    /// Embedding dimension produced by the backbone
    pub fn embedding_dim(&self) -> usize {
        self.base_filters * 8
    }
}

/// Dual-head vehicle recognition network
#[derive(Module, Debug)]
pub struct CarNet<B: Backend> {
    pub backbone: FeatureExtractor<B>,
    pub identity_head: IdentityHead<B>,
    pub year_head: YearHead<B>,
}

impl<B: Backend> CarNet<B> {
    /// Create a new CarNet from configuration
    pub fn new(config: &CarNetConfig, device: &B::Device) -> Self {
        let embedding_dim = config.embedding_dim();

        Self {
            backbone: FeatureExtractor::new(config.in_channels, config.base_filters, device),
            identity_head: IdentityHead::new(
                embedding_dim,
                config.model_classes,
                config.dropout_rate,
                device,
            ),
            year_head: YearHead::new(embedding_dim, config.year_classes, device),
        }
    }

    /// Run only the backbone, returning the shared embedding
    pub fn embed(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        self.backbone.forward(x)
    }

    /// Forward pass through backbone and both heads
    ///
    /// # Returns
    /// * `(identity_logits, year_logits)`, each of shape [batch, n]
    pub fn forward(&self, x: Tensor<B, 4>) -> (Tensor<B, 2>, Tensor<B, 2>) {
        let embedding = self.backbone.forward(x);
        let identity_logits = self.identity_head.forward(embedding.clone());
        let year_logits = self.year_head.forward(embedding);
        (identity_logits, year_logits)
    }

    /// Load weights from a CompactRecorder file, consuming self
    pub fn load_weights(
        self,
        path: &Path,
        device: &B::Device,
    ) -> crate::utils::error::Result<Self> {
        self.load_file(path, &CompactRecorder::new(), device)
            .map_err(|e| {
                CarSpecError::Model(format!("Failed to load weights from {:?}: {:?}", path, e))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InferenceBackend;

    #[test]
    fn test_carnet_output_shapes() {
        let device = Default::default();
        let config = CarNetConfig::new(12, 5)
            .with_input_size(64)
            .with_base_filters(8);
        let model = CarNet::<InferenceBackend>::new(&config, &device);

        let input = Tensor::<InferenceBackend, 4>::zeros([2, 3, 64, 64], &device);
        let (identity_logits, year_logits) = model.forward(input);

        assert_eq!(identity_logits.dims(), [2, 12]);
        assert_eq!(year_logits.dims(), [2, 5]);
    }

    #[test]
    fn test_heads_share_one_embedding() {
        let device = Default::default();
        let config = CarNetConfig::new(4, 3).with_base_filters(8);
        let model = CarNet::<InferenceBackend>::new(&config, &device);

        let input = Tensor::<InferenceBackend, 4>::ones([1, 3, 32, 32], &device);
        let embedding = model.embed(input.clone());
        let (identity_logits, year_logits) = model.forward(input);

        let via_identity = model.identity_head.forward(embedding.clone());
        let via_year = model.year_head.forward(embedding);

        assert_eq!(
            identity_logits.into_data().to_vec::<f32>().unwrap(),
            via_identity.into_data().to_vec::<f32>().unwrap()
        );
        assert_eq!(
            year_logits.into_data().to_vec::<f32>().unwrap(),
            via_year.into_data().to_vec::<f32>().unwrap()
        );
    }

    #[test]
    fn test_forward_is_deterministic() {
        let device = Default::default();
        let config = CarNetConfig::new(6, 4).with_base_filters(8);
        let model = CarNet::<InferenceBackend>::new(&config, &device);

        let input = Tensor::<InferenceBackend, 4>::ones([1, 3, 32, 32], &device);
        let (first, _) = model.forward(input.clone());
        let (second, _) = model.forward(input);

        assert_eq!(
            first.into_data().to_vec::<f32>().unwrap(),
            second.into_data().to_vec::<f32>().unwrap()
        );
    }

    #[test]
    fn test_embedding_dim_from_config() {
        let config = CarNetConfig::new(10, 10).with_base_filters(16);
        assert_eq!(config.embedding_dim(), 128);
    }
}
