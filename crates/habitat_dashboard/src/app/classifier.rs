//! Upload, preview and analyze panel.

use super::{ACCENT, UiApp};
use eframe::egui;
use habitat_core::{format_area, format_confidence};
use rfd::FileDialog;

const PREVIEW_WIDTH: f32 = 320.0;

impl UiApp {
    pub(super) fn render_classifier_panel(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(2.0, ACCENT))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("Habitat Image Classifier");
                });
                ui.label(
                    "Upload an image of a natural environment and the model labels its habitat type with a confidence score.",
                );
                ui.label(
                    "Supported habitats: Forest, Herbaceous Vegetation, Pasture, River, Sea/Lake, Beach, Desert, Ice, Mountain, Ocean",
                );
                ui.add_space(8.0);

                ui.columns(2, |columns| {
                    self.render_upload_column(&mut columns[0]);
                    self.render_result_column(&mut columns[1]);
                });
            });
    }

    fn render_upload_column(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Upload Image").strong());
        if ui.button("Choose an image file...").clicked()
            && let Some(path) = FileDialog::new()
                .add_filter("Images", &["jpg", "jpeg", "png"])
                .pick_file()
        {
            self.load_upload_from_path(path);
        }
        ui.small("or drop a JPEG/PNG onto the window");
        ui.add_space(6.0);

        let ctx = ui.ctx().clone();
        if let Some(upload) = self.upload.as_mut() {
            let name = upload.name.clone();
            let texture = upload.preview_texture(&ctx);
            let [w, h] = texture.size();
            let scale = PREVIEW_WIDTH / w.max(1) as f32;
            let desired = egui::vec2(PREVIEW_WIDTH, h as f32 * scale);
            let (resp, painter) = ui.allocate_painter(desired, egui::Sense::hover());
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), resp.rect, uv, egui::Color32::WHITE);
            ui.small(format!("Uploaded: {name}"));
        }
    }

    fn render_result_column(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Classification Results").strong());
        if self.upload.is_none() {
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("No Image Selected").strong().weak());
                ui.weak("Please upload an image to see classification results");
            });
            return;
        }

        if ui
            .add(egui::Button::new("Analyze Habitat").fill(ACCENT))
            .clicked()
        {
            self.analyze();
        }
        ui.add_space(8.0);

        let Some(result) = &self.result else {
            return;
        };
        ui.label(egui::RichText::new("Classification Complete!").color(ACCENT));
        ui.horizontal(|ui| {
            ui.label("Predicted Habitat:");
            ui.label(egui::RichText::new(result.label()).strong().size(18.0).color(ACCENT));
        });
        ui.horizontal(|ui| {
            ui.label("Confidence Score:");
            ui.label(egui::RichText::new(format_confidence(result.confidence)).strong());
        });
        if ui.small_button("Copy result").clicked() {
            ui.ctx().copy_text(format!(
                "{}\t{}",
                result.label(),
                format_confidence(result.confidence)
            ));
        }

        // A label without a table record just has nothing more to show.
        if let Some(record) = result.record() {
            ui.add_space(8.0);
            ui.label(egui::RichText::new(format!("About {}", result.label())).strong());
            ui.label(record.description);
            ui.label(format!("Coverage in India: {}", format_area(record.area_km2)));
        }
    }
}
