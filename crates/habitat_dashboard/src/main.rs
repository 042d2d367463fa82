mod app;
mod settings;

use anyhow::{Context, Result};
use app::UiApp;
use eframe::{NativeOptions, egui};
use habitat_core::{ClassifierConfig, HabitatClassifier, OnnxHabitatModel};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // The dashboard cannot serve any classification without the model, so
    // a load failure stops startup before a window opens.
    let (config, classifier) = match load_classifier() {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("habitat model unavailable: {e:#}");
            eprintln!("Cannot start Habitat Dashboard: {e:#}");
            std::process::exit(1);
        }
    };

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Habitat Statistics Dashboard")
            .with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };
    if let Err(e) = eframe::run_native(
        "Habitat Statistics Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(UiApp::new(classifier, config)))),
    ) {
        eprintln!("Application stopped with error: {e}");
    }
}

fn load_classifier() -> Result<(ClassifierConfig, Arc<HabitatClassifier<OnnxHabitatModel>>)> {
    let config = settings::load_classifier_config()?;
    let classifier = HabitatClassifier::load(&config)
        .with_context(|| format!("loading {}", config.model_path.display()))?;
    Ok((config, Arc::new(classifier)))
}
