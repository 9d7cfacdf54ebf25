//! Classification Heads
//!
//! Two independent heads consume the shared embedding: one over the vehicle
//! identity label space and one over the production year label space. The
//! heads never interact; each maps the embedding to a raw logit vector.

use burn::{
    module::Module,
    nn::{BatchNorm, BatchNormConfig, Dropout, DropoutConfig, Linear, LinearConfig},
    tensor::{backend::Backend, Tensor},
};

/// Vehicle identity head: BatchNorm -> Dropout -> Linear
#[derive(Module, Debug)]
pub struct IdentityHead<B: Backend> {
    pub bn: BatchNorm<B, 0>,
    pub dropout: Dropout,
    pub fc: Linear<B>,
}

impl<B: Backend> IdentityHead<B> {
    /// Create a new identity head over `num_classes` labels
    pub fn new(
        embedding_dim: usize,
        num_classes: usize,
        dropout_rate: f64,
        device: &B::Device,
    ) -> Self {
        Self {
            bn: BatchNormConfig::new(embedding_dim).init(device),
            dropout: DropoutConfig::new(dropout_rate).init(),
            fc: LinearConfig::new(embedding_dim, num_classes).init(device),
        }
    }

    /// Forward pass: embedding [B, D] -> logits [B, num_classes]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.bn.forward(x);
        let x = self.dropout.forward(x);
        self.fc.forward(x)
    }
}

/// Production year head: a single Linear layer
#[derive(Module, Debug)]
pub struct YearHead<B: Backend> {
    pub fc: Linear<B>,
}

impl<B: Backend> YearHead<B> {
    /// Create a new year head over `num_years` labels
    pub fn new(embedding_dim: usize, num_years: usize, device: &B::Device) -> Self {
        Self {
            fc: LinearConfig::new(embedding_dim, num_years).init(device),
        }
    }

    /// Forward pass: embedding [B, D] -> logits [B, num_years]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        self.fc.forward(x)
    }
}
