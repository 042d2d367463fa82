//! Read-only view of the active classifier configuration and versions.

use super::UiApp;
use eframe::egui;

impl UiApp {
    pub(super) fn render_settings_panel(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Model & Versions")
            .default_open(false)
            .show(ui, |ui| {
                egui::Grid::new("model-settings")
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("App version");
                        ui.label(self.app_version);
                        ui.end_row();
                        ui.label("Model file");
                        ui.label(self.config.model_path.display().to_string());
                        ui.end_row();
                        ui.label("Input size");
                        ui.label(format!(
                            "{0}×{0}",
                            self.config.input_size
                        ));
                        ui.end_row();
                        ui.label("Resize filter");
                        ui.label(format!("{:?}", self.config.resize_filter));
                        ui.end_row();
                        ui.label("Tensor layout");
                        ui.label(format!("{:?}", self.config.layout));
                        ui.end_row();
                        ui.label("Model output");
                        ui.label(format!("{:?}", self.config.output));
                        ui.end_row();
                    });
            });
    }
}
