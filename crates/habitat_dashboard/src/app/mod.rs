//! Dashboard window: habitat statistics and the upload classifier.

mod classifier;
mod overview;
mod settings;

use eframe::{App, Frame, egui};
use habitat_core::{
    Classification, ClassifierConfig, HabitatClassifier, HabitatRecord, OnnxHabitatModel,
    decode_image, open_image,
};
use image::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;

/// Longest side of the upload preview texture.
const PREVIEW_SIZE: u32 = 512;

pub struct UiApp {
    classifier: Arc<HabitatClassifier<OnnxHabitatModel>>,
    config: ClassifierConfig,
    app_version: &'static str,
    /// `None` shows all habitats.
    selected: Option<&'static HabitatRecord>,
    upload: Option<Upload>,
    result: Option<Classification>,
    status: String,
}

/// An uploaded image that has been decoded and is ready to analyze.
struct Upload {
    name: String,
    image: DynamicImage,
    preview: Option<egui::TextureHandle>,
}

impl UiApp {
    pub fn new(
        classifier: Arc<HabitatClassifier<OnnxHabitatModel>>,
        config: ClassifierConfig,
    ) -> Self {
        Self {
            classifier,
            config,
            app_version: env!("HABITAT_VERSION"),
            selected: None,
            upload: None,
            result: None,
            status: String::new(),
        }
    }

    /// Take a decoded upload. A bad file keeps the previous upload and reports why.
    fn accept_upload(&mut self, name: String, decoded: habitat_core::Result<DynamicImage>) {
        match decoded {
            Ok(image) => {
                tracing::info!("accepted upload {name} ({}x{})", image.width(), image.height());
                self.status = format!("Loaded {name}");
                self.upload = Some(Upload {
                    name,
                    image,
                    preview: None,
                });
                self.result = None;
            }
            Err(e) => {
                tracing::warn!("rejected upload {name}: {e}");
                self.status = format!("Could not read {name}: {e}");
            }
        }
    }

    fn analyze(&mut self) {
        let Some(upload) = &self.upload else {
            return;
        };
        match self.classifier.classify_image(&upload.image) {
            Ok(result) => {
                self.status = "Classification complete".to_string();
                self.result = Some(result);
            }
            Err(e) => {
                tracing::error!("classification of {} failed: {e}", upload.name);
                self.status = format!("Classification failed: {e}");
                self.result = None;
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        if let Some(bytes) = file.bytes {
            self.accept_upload(file.name, decode_image(&bytes));
        } else if let Some(path) = file.path {
            self.load_upload_from_path(path);
        }
    }

    fn load_upload_from_path(&mut self, path: PathBuf) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        self.accept_upload(name, open_image(&path));
    }
}

impl Upload {
    fn preview_texture(&mut self, ctx: &egui::Context) -> &egui::TextureHandle {
        self.preview.get_or_insert_with(|| {
            let thumb = self.image.thumbnail(PREVIEW_SIZE, PREVIEW_SIZE).to_rgba8();
            let (w, h) = thumb.dimensions();
            let size = [w as usize, h as usize];
            let color = egui::ColorImage::from_rgba_unmultiplied(size, thumb.as_raw());
            ctx.load_texture(
                format!("upload:{}", self.name),
                color,
                egui::TextureOptions::LINEAR,
            )
        })
    }
}

/// `#RRGGBB` display color of a habitat, or the dashboard green.
fn habitat_color(record: &HabitatRecord) -> egui::Color32 {
    match record.rgb() {
        Some([r, g, b]) => egui::Color32::from_rgb(r, g, b),
        None => ACCENT,
    }
}

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x22, 0x8B, 0x22);

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("v{}", self.app_version));
                ui.separator();
                ui.label(&self.status);
            });
        });

        egui::SidePanel::left("controls")
            .resizable(false)
            .default_width(240.0)
            .show(ctx, |ui| {
                self.render_sidebar(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Habitat Statistics Dashboard");
                        ui.label(
                            "Explore India's diverse ecosystems and analyze habitat data with image classification",
                        );
                    });
                    ui.add_space(12.0);
                    self.render_overview_panel(ui);
                    ui.add_space(12.0);
                    if let Some(record) = self.selected {
                        self.render_detail_panel(ui, record);
                        ui.add_space(12.0);
                    }
                    self.render_classifier_panel(ui);
                    ui.add_space(12.0);
                    self.render_settings_panel(ui);
                });
        });
    }
}
