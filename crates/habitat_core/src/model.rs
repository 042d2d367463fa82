//! The pre-trained habitat model, treated as an opaque capability.

use crate::error::Result;
use ndarray::Array4;

/// Given a batch of one normalized image, return one score per habitat class.
///
/// Implementations must not mutate shared state during `predict`; a loaded
/// model is shared read-only across threads.
pub trait HabitatModel: Send + Sync {
    fn predict(&self, batch: &Array4<f32>) -> Result<Vec<f32>>;
}

impl<F> HabitatModel for F
where
    F: Fn(&Array4<f32>) -> Result<Vec<f32>> + Send + Sync,
{
    fn predict(&self, batch: &Array4<f32>) -> Result<Vec<f32>> {
        self(batch)
    }
}

#[cfg(feature = "ort")]
pub use onnx::OnnxHabitatModel;

#[cfg(feature = "ort")]
mod onnx {
    use super::HabitatModel;
    use crate::error::{Error, Result};
    use ndarray::{Array4, CowArray};
    use once_cell::sync::OnceCell;
    use ort::{
        GraphOptimizationLevel, SessionBuilder, environment::Environment, session::Session,
        tensor::OrtOwnedTensor, value::Value,
    };
    use std::path::Path;
    use std::sync::Arc;

    static ORT_ENV: OnceCell<Arc<Environment>> = OnceCell::new();

    fn ort_environment() -> std::result::Result<Arc<Environment>, ort::OrtError> {
        ORT_ENV
            .get_or_try_init(|| {
                Ok::<_, ort::OrtError>(
                    Environment::builder()
                        .with_name("habitat-classifier")
                        .build()?
                        .into_arc(),
                )
            })
            .cloned()
    }

    /// Habitat model backed by an ONNX Runtime session.
    pub struct OnnxHabitatModel {
        session: Session,
    }

    impl OnnxHabitatModel {
        pub fn load(path: &Path) -> Result<Self> {
            let unavailable = |reason: String| Error::ModelUnavailable {
                path: path.to_path_buf(),
                reason,
            };
            if !path.is_file() {
                return Err(unavailable("model file does not exist".to_string()));
            }
            let env = ort_environment().map_err(|e| unavailable(e.to_string()))?;
            let session = SessionBuilder::new(&env)
                .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level1))
                .and_then(|b| b.with_model_from_file(path))
                .map_err(|e| unavailable(e.to_string()))?;
            tracing::info!("loaded habitat model from {}", path.display());
            Ok(Self { session })
        }
    }

    impl HabitatModel for OnnxHabitatModel {
        fn predict(&self, batch: &Array4<f32>) -> Result<Vec<f32>> {
            let inference = |e: ort::OrtError| Error::Inference {
                message: e.to_string(),
            };
            let cow = CowArray::from(batch.view().into_dyn());
            let input = Value::from_array(self.session.allocator(), &cow).map_err(inference)?;
            let outputs: Vec<Value> = self.session.run(vec![input]).map_err(inference)?;
            let first = outputs.first().ok_or_else(|| Error::Inference {
                message: "model produced no outputs".to_string(),
            })?;
            let scores: OrtOwnedTensor<f32, _> = first.try_extract().map_err(inference)?;
            Ok(scores.view().iter().copied().collect())
        }
    }

}
