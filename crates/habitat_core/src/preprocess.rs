//! Turning an arbitrary upload into the single-item batch the model expects.

use crate::config::{ClassifierConfig, TensorLayout};
use crate::error::{Error, Result};
use image::{DynamicImage, RgbImage, imageops::FilterType};
use ndarray::Array4;
use std::path::Path;

/// Decode raw upload bytes. The format is sniffed from the content, not a file name.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(Error::invalid_image)
}

/// Read and decode an image file.
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}

#[derive(Debug, Clone, Copy)]
pub struct Preprocessor {
    input_size: u32,
    filter: FilterType,
    layout: TensorLayout,
}

impl Preprocessor {
    pub fn new(cfg: &ClassifierConfig) -> Self {
        Self {
            input_size: cfg.input_size,
            filter: cfg.resize_filter.into(),
            layout: cfg.layout,
        }
    }

    /// Convert to RGB, resize, scale to [0,1] and wrap as a batch of one.
    pub fn prepare(&self, img: &DynamicImage) -> Array4<f32> {
        let rgb = resize_to_input(img, self.input_size, self.filter);
        to_batch(&rgb, self.layout)
    }
}

/// Three-channel copy of `img` at `size`×`size`. An image already at that size
/// is only converted, never resampled.
pub fn resize_to_input(img: &DynamicImage, size: u32, filter: FilterType) -> RgbImage {
    let rgb = img.to_rgb8();
    if rgb.dimensions() == (size, size) {
        return rgb;
    }
    tracing::debug!(
        "resizing {}x{} upload to {size}x{size}",
        rgb.width(),
        rgb.height()
    );
    image::imageops::resize(&rgb, size, size, filter)
}

/// Pack an RGB image into a `[1, H, W, 3]` or `[1, 3, H, W]` tensor.
pub fn to_batch(rgb: &RgbImage, layout: TensorLayout) -> Array4<f32> {
    let (w, h) = (rgb.width() as usize, rgb.height() as usize);
    let sample = |x: usize, y: usize, c: usize| normalize_channel(rgb.get_pixel(x as u32, y as u32)[c]);
    match layout {
        TensorLayout::Nhwc => Array4::from_shape_fn((1, h, w, 3), |(_, y, x, c)| sample(x, y, c)),
        TensorLayout::Nchw => Array4::from_shape_fn((1, 3, h, w), |(_, c, y, x)| sample(x, y, c)),
    }
}

pub fn normalize_channel(value: u8) -> f32 {
    value as f32 / 255.0
}

/// Inverse of [`normalize_channel`], rounding to the nearest intensity.
pub fn denormalize_channel(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
