//! Error types for habitat classification.

use std::path::PathBuf;

/// Result type alias for habitat_core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The upload could not be decoded as an image.
    #[error("invalid image: {source}")]
    InvalidImage {
        #[source]
        source: image::ImageError,
    },

    /// The model artifact could not be loaded. Fatal at startup.
    #[error("model unavailable at '{path}': {reason}")]
    ModelUnavailable { path: PathBuf, reason: String },

    /// The model returned scores that cannot be read as a class distribution.
    #[error("unexpected model output: {message}")]
    UnexpectedOutput { message: String },

    /// The runtime failed while running a forward pass.
    #[error("inference failed: {message}")]
    Inference { message: String },

    #[error("failed to read config file '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_image(source: image::ImageError) -> Self {
        Self::InvalidImage { source }
    }

    pub(crate) fn unexpected_output(message: impl Into<String>) -> Self {
        Self::UnexpectedOutput {
            message: message.into(),
        }
    }
}
