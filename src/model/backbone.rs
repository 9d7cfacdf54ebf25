//! Visual Feature Extractor
//!
//! A convolutional backbone built with the Burn framework. It maps a
//! normalized RGB image tensor to a fixed-length embedding that both
//! classification heads consume. The backbone is a pure function of its
//! weights and input; on a non-autodiff backend every layer runs in
//! inference mode.

use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig, MaxPool2d, MaxPool2dConfig},
        BatchNorm, BatchNormConfig, PaddingConfig2d, Relu,
    },
    module::Module,
    tensor::{backend::Backend, Tensor},
};

/// A CNN block with Conv2d, BatchNorm, ReLU, and a 2x2 MaxPool
#[derive(Module, Debug)]
pub struct ConvBlock<B: Backend> {
    pub conv: Conv2d<B>,
    pub bn: BatchNorm<B, 2>,
    pub relu: Relu,
    pub pool: MaxPool2d,
}

impl<B: Backend> ConvBlock<B> {
    /// Create a new convolutional block
    pub fn new(
        in_channels: usize,
        out_channels: usize,
        kernel_size: usize,
        device: &B::Device,
    ) -> Self {
        let conv = Conv2dConfig::new([in_channels, out_channels], [kernel_size, kernel_size])
            .with_padding(PaddingConfig2d::Same)
            .init(device);

        let bn = BatchNormConfig::new(out_channels).init(device);
        let pool = MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();

        Self {
            conv,
            bn,
            relu: Relu::new(),
            pool,
        }
    }

    /// Forward pass through the block, halving the spatial resolution
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.conv.forward(x);
        let x = self.bn.forward(x);
        let x = self.relu.forward(x);
        self.pool.forward(x)
    }
}

/// Convolutional feature extractor producing a fixed-length embedding.
///
/// Architecture:
/// - 4 convolutional blocks with doubling filter counts
/// - Global average pooling
/// - Flatten to `[batch, base_filters * 8]`
#[derive(Module, Debug)]
pub struct FeatureExtractor<B: Backend> {
    pub conv1: ConvBlock<B>,
    pub conv2: ConvBlock<B>,
    pub conv3: ConvBlock<B>,
    pub conv4: ConvBlock<B>,
    pub global_pool: AdaptiveAvgPool2d,
}

impl<B: Backend> FeatureExtractor<B> {
    /// Create a new feature extractor
    pub fn new(in_channels: usize, base_filters: usize, device: &B::Device) -> Self {
        let base = base_filters;

        // Filter progression: in -> base -> base*2 -> base*4 -> base*8
        let conv1 = ConvBlock::new(in_channels, base, 3, device);
        let conv2 = ConvBlock::new(base, base * 2, 3, device);
        let conv3 = ConvBlock::new(base * 2, base * 4, 3, device);
        let conv4 = ConvBlock::new(base * 4, base * 8, 3, device);

        let global_pool = AdaptiveAvgPool2dConfig::new([1, 1]).init();

        Self {
            conv1,
            conv2,
            conv3,
            conv4,
            global_pool,
        }
    }

    /// Forward pass from image tensor to embedding
    ///
    /// # Arguments
    /// * `x` - Input tensor of shape [batch_size, channels, height, width]
    ///
    /// # Returns
    /// * Embedding tensor of shape [batch_size, base_filters * 8]
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.conv1.forward(x);
        let x = self.conv2.forward(x);
        let x = self.conv3.forward(x);
        let x = self.conv4.forward(x);

        // Global pooling: [B, C, H, W] -> [B, C, 1, 1]
        let x = self.global_pool.forward(x);

        // Flatten: [B, C, 1, 1] -> [B, C]
        let [batch_size, channels, _, _] = x.dims();
        x.reshape([batch_size, channels])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InferenceBackend;

    #[test]
    fn test_embedding_shape() {
        let device = Default::default();
        let extractor = FeatureExtractor::<InferenceBackend>::new(3, 16, &device);

        let input = Tensor::<InferenceBackend, 4>::zeros([2, 3, 64, 64], &device);
        let embedding = extractor.forward(input);

        assert_eq!(embedding.dims(), [2, 128]); // base_filters * 8
    }

    #[test]
    fn test_conv_block_halves_resolution() {
        let device = Default::default();
        let block = ConvBlock::<InferenceBackend>::new(3, 8, 3, &device);

        let input = Tensor::<InferenceBackend, 4>::zeros([1, 3, 32, 32], &device);
        let output = block.forward(input);

        assert_eq!(output.dims(), [1, 8, 16, 16]);
    }
}
