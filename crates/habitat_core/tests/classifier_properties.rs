use approx::assert_relative_eq;
use habitat_core::{
    ClassifierConfig, Error, HabitatClass, HabitatClassifier, OutputKind, Result, lookup, softmax,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use ndarray::{Array4, Axis};
use rstest::rstest;
use std::io::Cursor;
use std::sync::Arc;

/// Deterministic stand-in for the trained network: a fixed linear map from
/// per-channel means to ten logits.
fn channel_mean_model(batch: &Array4<f32>) -> Result<Vec<f32>> {
    let means: Vec<f32> = (0..3)
        .map(|c| batch.index_axis(Axis(3), c).mean().unwrap_or(0.0))
        .collect();
    let logits = (0..HabitatClass::COUNT)
        .map(|k| {
            let k = k as f32;
            means[0] * (k - 4.5) + means[1] * (3.0 - k).abs() - means[2] * k * 0.3 + 0.1 * k
        })
        .collect::<Vec<_>>();
    Ok(softmax(&logits))
}

fn classifier() -> HabitatClassifier<fn(&Array4<f32>) -> Result<Vec<f32>>> {
    HabitatClassifier::new(
        channel_mean_model as fn(&Array4<f32>) -> Result<Vec<f32>>,
        &ClassifierConfig::default(),
    )
}

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

#[rstest]
#[case(RgbImage::from_pixel(64, 64, Rgb([0, 0, 0])))]
#[case(RgbImage::from_pixel(64, 64, Rgb([255, 255, 255])))]
#[case(RgbImage::from_pixel(640, 480, Rgb([34, 139, 34])))]
#[case(RgbImage::from_fn(97, 13, |x, y| Rgb([(x * 2) as u8, (y * 19) as u8, 128])))]
fn valid_images_yield_one_class_and_a_distribution(#[case] img: RgbImage) {
    let result = classifier()
        .classify_image(&DynamicImage::ImageRgb8(img))
        .unwrap();
    assert!(HabitatClass::ALL.contains(&result.habitat));
    assert!((0.0..=1.0).contains(&result.confidence));
    assert_eq!(result.probabilities.len(), HabitatClass::COUNT);
    assert_relative_eq!(result.probabilities.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(
        result.confidence,
        result.probabilities.iter().cloned().fold(f32::MIN, f32::max)
    );
}

#[test]
fn all_black_image_is_deterministic() {
    let classifier = classifier();
    let black = DynamicImage::ImageRgb8(RgbImage::new(64, 64));
    let first = classifier.classify_image(&black).unwrap();
    for _ in 0..5 {
        assert_eq!(classifier.classify_image(&black).unwrap(), first);
    }
}

#[test]
fn png_and_jpeg_uploads_are_accepted() {
    let classifier = classifier();
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(120, 90, Rgb([200, 180, 90])));
    let from_png = classifier
        .classify_bytes(&encode(img.clone(), ImageFormat::Png))
        .unwrap();
    let from_jpeg = classifier
        .classify_bytes(&encode(img, ImageFormat::Jpeg))
        .unwrap();
    assert!(HabitatClass::ALL.contains(&from_png.habitat));
    assert!(HabitatClass::ALL.contains(&from_jpeg.habitat));
}

#[test]
fn alpha_channel_is_ignored() {
    let classifier = classifier();
    let opaque = RgbaImage::from_pixel(64, 64, Rgba([10, 200, 90, 255]));
    let clear = RgbaImage::from_pixel(64, 64, Rgba([10, 200, 90, 0]));
    let a = classifier
        .classify_bytes(&encode(DynamicImage::ImageRgba8(opaque), ImageFormat::Png))
        .unwrap();
    let b = classifier
        .classify_bytes(&encode(DynamicImage::ImageRgba8(clear), ImageFormat::Png))
        .unwrap();
    assert_eq!(a, b);
}

#[rstest]
#[case(&b""[..])]
#[case(&b"hello, habitat"[..])]
#[case(&b"\x89PNG\r\n\x1a\n truncated"[..])]
fn non_image_input_is_invalid_image(#[case] bytes: &[u8]) {
    let err = classifier().classify_bytes(bytes).unwrap_err();
    assert!(matches!(err, Error::InvalidImage { .. }), "got {err}");
}

#[test]
fn logits_configuration_is_honored() {
    let cfg = ClassifierConfig {
        output: OutputKind::Logits,
        ..ClassifierConfig::default()
    };
    let logits = |_: &Array4<f32>| -> Result<Vec<f32>> {
        Ok(vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0, 0.0])
    };
    let result = HabitatClassifier::new(logits, &cfg)
        .classify_image(&DynamicImage::ImageRgb8(RgbImage::new(8, 8)))
        .unwrap();
    assert_eq!(result.habitat, HabitatClass::Mountain);
    assert!(result.confidence > 0.99);
}

#[test]
fn shared_classifier_is_safe_across_threads() {
    let classifier = Arc::new(classifier());
    let black = DynamicImage::ImageRgb8(RgbImage::new(64, 64));
    let expected = classifier.classify_image(&black).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let classifier = Arc::clone(&classifier);
            let black = black.clone();
            std::thread::spawn(move || classifier.classify_image(&black).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn every_predicted_label_has_supplementary_info() {
    for class in HabitatClass::ALL {
        let record = lookup(class.label()).expect("habitat table is complete");
        assert!(!record.description.is_empty());
    }
}
