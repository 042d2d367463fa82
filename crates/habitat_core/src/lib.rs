//! Habitat classification and statistics for Indian ecosystems.
//!
//! The classifier wraps a fixed, pre-trained 10-class image model; the
//! habitat table and its derived statistics are compiled-in constant data.

pub mod classifier;
pub mod config;
pub mod error;
pub mod habitat;
pub mod model;
pub mod preprocess;
pub mod stats;

pub use classifier::{Classification, HabitatClassifier, select_top, softmax};
pub use config::{ClassifierConfig, OutputKind, ResizeFilter, TensorLayout};
pub use error::{Error, Result};
pub use habitat::{HABITATS, HabitatClass, HabitatRecord, lookup};
pub use model::HabitatModel;
#[cfg(feature = "ort")]
pub use model::OnnxHabitatModel;
pub use preprocess::{Preprocessor, decode_image, open_image};
pub use stats::{ConservationStatus, MapFocus, QuickStats, format_area, format_confidence, quick_stats};
