//! Backend selection for inference.
//!
//! The default backend is the CPU `NdArray` backend, which keeps outputs
//! reproducible and runs anywhere. Enable the `cuda` feature to run the
//! forward pass on an NVIDIA GPU instead.
//!
//! Neither backend carries autodiff, so batch normalization uses its running
//! statistics and dropout is a no-op: the model always runs in inference mode.

#[cfg(not(feature = "cuda"))]
pub type InferenceBackend = burn::backend::NdArray;

#[cfg(feature = "cuda")]
pub type InferenceBackend = burn_cuda::Cuda;

/// Get the default device for the selected backend
pub fn default_device() -> <InferenceBackend as burn::tensor::backend::Backend>::Device {
    <InferenceBackend as burn::tensor::backend::Backend>::Device::default()
}

/// Get a human-readable name for the current backend
pub fn backend_name() -> &'static str {
    #[cfg(not(feature = "cuda"))]
    {
        "NdArray (CPU)"
    }

    #[cfg(feature = "cuda")]
    {
        "CUDA (GPU)"
    }
}
