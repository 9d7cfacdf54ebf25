//! Image Preprocessing
//!
//! Converts raw PNG/JPEG bytes into the normalized `[1, 3, S, S]` tensor the
//! backbone consumes: decode, resize to a square target, scale channel values
//! to [0, 1], and lay out as CHW. The tensor is created per request and
//! consumed once.

use burn::tensor::{backend::Backend, Tensor};
use image::{imageops::FilterType, DynamicImage};

use crate::utils::error::{CarSpecError, Result};

/// Decode raw image bytes (PNG/JPEG) into an image.
///
/// Undecodable bytes are a request-level failure with the decoder's detail
/// preserved.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| CarSpecError::ImageDecode(e.to_string()))
}

/// Resize an image to the target square size and convert it to a
/// `[1, 3, size, size]` tensor with values in [0, 1], CHW layout.
pub fn image_to_tensor<B: Backend>(
    image: &DynamicImage,
    size: usize,
    device: &B::Device,
) -> Tensor<B, 4> {
    let rgb = image
        .resize_exact(size as u32, size as u32, FilterType::Lanczos3)
        .to_rgb8();

    let num_pixels = size * size;
    let mut pixels = vec![0.0f32; 3 * num_pixels];

    for (i, pixel) in rgb.pixels().enumerate() {
        // CHW layout: all R values, then all G values, then all B values
        pixels[i] = pixel[0] as f32 / 255.0;
        pixels[num_pixels + i] = pixel[1] as f32 / 255.0;
        pixels[2 * num_pixels + i] = pixel[2] as f32 / 255.0;
    }

    Tensor::<B, 1>::from_floats(pixels.as_slice(), device).reshape([1, 3, size, size])
}
