//! Habitat classification: preprocessing, one forward pass, arg-max.

use crate::config::{ClassifierConfig, OutputKind};
use crate::error::{Error, Result};
use crate::habitat::{HabitatClass, HabitatRecord};
use crate::model::HabitatModel;
use crate::preprocess::{Preprocessor, decode_image};
use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Probabilities further than this from summing to one are logged before renormalizing.
const SUM_TOLERANCE: f32 = 1e-3;

/// Classifier output for a single image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub habitat: HabitatClass,
    /// Probability of `habitat`, in [0,1].
    pub confidence: f32,
    /// Full distribution, indexed like [`HabitatClass::ALL`].
    pub probabilities: Vec<f32>,
}

impl Classification {
    /// Build a classification from raw model scores.
    pub fn from_scores(scores: Vec<f32>, output: OutputKind) -> Result<Self> {
        let probabilities = to_distribution(scores, output)?;
        let (best_idx, confidence) = select_top(&probabilities)
            .ok_or_else(|| Error::unexpected_output("empty score vector"))?;
        let habitat = HabitatClass::from_index(best_idx)
            .ok_or_else(|| Error::unexpected_output(format!("class index {best_idx} out of range")))?;
        Ok(Self {
            habitat,
            confidence,
            probabilities,
        })
    }

    pub fn label(&self) -> &'static str {
        self.habitat.label()
    }

    /// Supplementary statistics for the predicted habitat, when the table has them.
    pub fn record(&self) -> Option<&'static HabitatRecord> {
        self.habitat.record()
    }
}

/// A loaded model plus the preprocessing it was trained with.
///
/// Immutable once built; share it by reference or behind an `Arc`.
pub struct HabitatClassifier<M> {
    model: M,
    preprocessor: Preprocessor,
    output: OutputKind,
}

impl<M: HabitatModel> HabitatClassifier<M> {
    pub fn new(model: M, cfg: &ClassifierConfig) -> Self {
        Self {
            model,
            preprocessor: Preprocessor::new(cfg),
            output: cfg.output,
        }
    }

    pub fn classify_image(&self, img: &DynamicImage) -> Result<Classification> {
        let batch = self.preprocessor.prepare(img);
        let scores = self.model.predict(&batch)?;
        let result = Classification::from_scores(scores, self.output)?;
        tracing::info!(
            "classified {}x{} image as {} ({:.4})",
            img.width(),
            img.height(),
            result.habitat,
            result.confidence
        );
        Ok(result)
    }

    /// Classify raw upload bytes (JPEG, PNG, ...).
    pub fn classify_bytes(&self, bytes: &[u8]) -> Result<Classification> {
        let img = decode_image(bytes)?;
        self.classify_image(&img)
    }
}

#[cfg(feature = "ort")]
impl HabitatClassifier<crate::model::OnnxHabitatModel> {
    /// Load the ONNX model named by `cfg`. Fails with
    /// [`Error::ModelUnavailable`] when the artifact cannot be loaded.
    pub fn load(cfg: &ClassifierConfig) -> Result<Self> {
        let model = crate::model::OnnxHabitatModel::load(&cfg.model_path)?;
        Ok(Self::new(model, cfg))
    }
}

/// Index and value of the largest entry. Ties go to the lowest index.
pub fn select_top(probs: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &p) in probs.iter().enumerate() {
        match best {
            Some((_, best_p)) if p <= best_p => {}
            _ => best = Some((idx, p)),
        }
    }
    best
}

pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum == 0.0 {
        return vec![0.0; logits.len()];
    }
    exps.into_iter().map(|x| x / sum).collect()
}

fn to_distribution(scores: Vec<f32>, output: OutputKind) -> Result<Vec<f32>> {
    if scores.len() != HabitatClass::COUNT {
        return Err(Error::unexpected_output(format!(
            "expected {} scores, got {}",
            HabitatClass::COUNT,
            scores.len()
        )));
    }
    if scores.iter().any(|s| !s.is_finite()) {
        return Err(Error::unexpected_output("non-finite score"));
    }
    match output {
        OutputKind::Logits => Ok(softmax(&scores)),
        OutputKind::Probabilities => {
            if scores.iter().any(|&p| p < 0.0) {
                return Err(Error::unexpected_output("negative probability"));
            }
            let sum: f32 = scores.iter().sum();
            if sum <= 0.0 {
                return Err(Error::unexpected_output("probabilities sum to zero"));
            }
            if (sum - 1.0).abs() > SUM_TOLERANCE {
                tracing::warn!("model probabilities sum to {sum}, renormalizing");
            }
            Ok(scores.into_iter().map(|p| p / sum).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::{Rgb, RgbImage};
    use ndarray::Array4;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn one_hot(idx: usize, p: f32) -> Vec<f32> {
        let rest = (1.0 - p) / (HabitatClass::COUNT - 1) as f32;
        (0..HabitatClass::COUNT)
            .map(|i| if i == idx { p } else { rest })
            .collect()
    }

    fn fixed(scores: Vec<f32>) -> impl Fn(&Array4<f32>) -> Result<Vec<f32>> + Send + Sync {
        move |_| Ok(scores.clone())
    }

    fn png_bytes(img: &RgbImage) -> Vec<u8> {
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn picks_highest_probability() {
        let c = Classification::from_scores(one_hot(7, 0.91), OutputKind::Probabilities).unwrap();
        assert_eq!(c.habitat, HabitatClass::Ice);
        assert_eq!(c.label(), "ice");
        assert_relative_eq!(c.confidence, 0.91, epsilon = 1e-6);
        assert_eq!(c.record().map(|r| r.name), Some("ice"));
    }

    #[rstest]
    #[case(vec![0.5, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 0)]
    #[case(vec![0.0, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.4, 0.0, 0.2], 3)]
    #[case(vec![0.1; 10], 0)]
    #[case(vec![0.0, 0.0, 0.25, 0.0, 0.25, 0.0, 0.25, 0.0, 0.25, 0.0], 2)]
    fn ties_resolve_to_lowest_index(#[case] probs: Vec<f32>, #[case] expected: usize) {
        assert_eq!(select_top(&probs).map(|(i, _)| i), Some(expected));
    }

    #[test]
    fn select_top_of_empty_is_none() {
        assert_eq!(select_top(&[]), None);
    }

    #[test]
    fn logits_go_through_softmax() {
        let mut logits = vec![0.0; 10];
        logits[3] = 4.0;
        let c = Classification::from_scores(logits, OutputKind::Logits).unwrap();
        assert_eq!(c.habitat, HabitatClass::River);
        assert_relative_eq!(c.probabilities.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
        assert!(c.confidence > 0.8 && c.confidence < 1.0);
    }

    #[test]
    fn unnormalized_probabilities_are_rescaled() {
        let mut scores = vec![1.0; 10];
        scores[5] = 11.0;
        let c = Classification::from_scores(scores, OutputKind::Probabilities).unwrap();
        assert_eq!(c.habitat, HabitatClass::Beach);
        assert_relative_eq!(c.confidence, 0.55, epsilon = 1e-6);
        assert_relative_eq!(c.probabilities.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
    }

    #[rstest]
    #[case(vec![0.0, 0.0, 1.0009, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 2)]
    #[case(vec![0.5, 0.4995, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 0)]
    #[case(vec![0.3, 0.2, 0.1, 0.1, 0.1, 0.1, 0.05, 0.05, 0.0, 0.0], 0)]
    fn near_unit_sums_still_yield_a_distribution(#[case] scores: Vec<f32>, #[case] expected: usize) {
        let c = Classification::from_scores(scores, OutputKind::Probabilities).unwrap();
        assert_eq!(c.habitat.index(), expected);
        assert!((0.0..=1.0).contains(&c.confidence), "confidence {}", c.confidence);
        assert_relative_eq!(c.probabilities.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
    }

    #[rstest]
    #[case(vec![0.5, 0.5])]
    #[case(vec![0.1; 11])]
    #[case(vec![f32::NAN, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1])]
    #[case(vec![-0.1, 0.2, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1])]
    #[case(vec![0.0; 10])]
    fn rejects_malformed_outputs(#[case] scores: Vec<f32>) {
        let err = Classification::from_scores(scores, OutputKind::Probabilities).unwrap_err();
        assert!(matches!(err, Error::UnexpectedOutput { .. }));
    }

    #[test]
    fn model_sees_preprocessed_batch() {
        let calls = AtomicUsize::new(0);
        let model = |batch: &Array4<f32>| -> Result<Vec<f32>> {
            calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(batch.shape(), &[1, 64, 64, 3]);
            assert!(batch.iter().all(|&v| (v - 1.0).abs() < 1e-6));
            Ok(one_hot(0, 0.6))
        };
        let classifier = HabitatClassifier::new(model, &ClassifierConfig::default());
        let white = RgbImage::from_pixel(200, 120, Rgb([255, 255, 255]));
        let c = classifier.classify_bytes(&png_bytes(&white)).unwrap();
        assert_eq!(c.habitat, HabitatClass::Forest);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn undecodable_upload_is_invalid_image() {
        let classifier = HabitatClassifier::new(fixed(one_hot(1, 0.9)), &ClassifierConfig::default());
        let err = classifier.classify_bytes(b"%PDF-1.4 not an image").unwrap_err();
        assert!(matches!(err, Error::InvalidImage { .. }));
    }

    #[test]
    fn model_errors_propagate() {
        let failing = |_: &Array4<f32>| -> Result<Vec<f32>> {
            Err(Error::Inference {
                message: "boom".into(),
            })
        };
        let classifier = HabitatClassifier::new(failing, &ClassifierConfig::default());
        let black = DynamicImage::ImageRgb8(RgbImage::new(64, 64));
        let err = classifier.classify_image(&black).unwrap_err();
        assert!(matches!(err, Error::Inference { .. }));
    }
}
