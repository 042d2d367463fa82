//! Classifier configuration, loadable from TOML.

use crate::error::{Error, Result};
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resampling filter used when scaling uploads to the model input size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(f: ResizeFilter) -> Self {
        match f {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Memory layout of the input batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TensorLayout {
    /// `[1, H, W, 3]`, the Keras default.
    #[default]
    Nhwc,
    /// `[1, 3, H, W]`
    Nchw,
}

/// How to read the model's output vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// The graph ends in a softmax.
    #[default]
    Probabilities,
    /// Raw scores; softmax is applied here.
    Logits,
}

/// Configuration for the habitat classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub model_path: PathBuf,
    pub input_size: u32,
    pub resize_filter: ResizeFilter,
    pub layout: TensorLayout,
    pub output: OutputKind,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/habitat_classifier.onnx"),
            input_size: 64,
            resize_filter: ResizeFilter::default(),
            layout: TensorLayout::default(),
            output: OutputKind::default(),
        }
    }
}

impl ClassifierConfig {
    /// Load configuration from a TOML file. Missing keys take their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&contents).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load the first existing file among `candidates`, or defaults when none exists.
    pub fn from_first_existing<I, P>(candidates: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for candidate in candidates {
            let path = candidate.as_ref();
            if path.is_file() {
                tracing::info!("loading classifier config from {}", path.display());
                return Self::from_toml_file(path);
            }
        }
        tracing::debug!("no classifier config file found, using defaults");
        Ok(Self::default())
    }
}
