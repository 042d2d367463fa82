//! Habitat selection, quick stats, the card grid and per-habitat detail.

use super::{UiApp, habitat_color};
use eframe::egui;
use habitat_core::{
    ConservationStatus, HABITATS, HabitatRecord, MapFocus, format_area, quick_stats,
};

const CARDS_PER_ROW: usize = 5;

impl UiApp {
    pub(super) fn render_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.heading("Navigation & Controls");
        ui.separator();

        ui.label(egui::RichText::new("Habitat Selection").strong());
        let mut selected = self.selected;
        egui::ComboBox::from_id_salt("habitat-select")
            .selected_text(selected.map_or("All", |r| r.name))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut selected, None, "All");
                for record in HABITATS.iter() {
                    ui.selectable_value(&mut selected, Some(record), record.name);
                }
            });
        if selected != self.selected {
            tracing::debug!("selected habitat: {}", selected.map_or("All", |r| r.name));
            self.selected = selected;
        }

        ui.add_space(8.0);
        ui.separator();
        ui.label(egui::RichText::new("Quick Stats").strong());
        let stats = quick_stats();
        stat_line(ui, "Total Area", &format_area(stats.total_area_km2));
        stat_line(ui, "Avg Loss", &format!("{:.1}%", stats.avg_loss_percent));
        stat_line(ui, "Avg Protected", &format!("{:.1}%", stats.avg_protected_percent));
    }

    pub(super) fn render_overview_panel(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Habitat Overview");
            });
            ui.add_space(6.0);
            for row in HABITATS.chunks(CARDS_PER_ROW) {
                ui.columns(row.len(), |columns| {
                    for (col, record) in columns.iter_mut().zip(row) {
                        let highlighted = self.selected.is_some_and(|s| s.name == record.name);
                        habitat_card(col, record, highlighted);
                    }
                });
                ui.add_space(6.0);
            }
        });
    }

    pub(super) fn render_detail_panel(&mut self, ui: &mut egui::Ui, record: &HabitatRecord) {
        let color = habitat_color(record);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(format!("Detailed Analysis: {}", record.name));
            });
            ui.add_space(6.0);

            ui.label(egui::RichText::new(format!("Focusing on: {}", record.name)).strong());
            ui.label(record.description);
            let focus = MapFocus::for_selection(Some(record));
            ui.label(format!(
                "Map focus: {:.2}°N, {:.2}°E (zoom {})",
                focus.lat, focus.lon, focus.zoom
            ));
            ui.add_space(8.0);

            ui.columns(2, |columns| {
                columns[0].label(egui::RichText::new("Habitat Loss").strong());
                columns[0].add(
                    egui::ProgressBar::new((record.loss_percent / 100.0) as f32)
                        .text(format!("{:.1}% lost", record.loss_percent))
                        .fill(color),
                );
                columns[1].label(egui::RichText::new("Protected Area Coverage").strong());
                columns[1].add(
                    egui::ProgressBar::new((record.protected_percent / 100.0) as f32)
                        .text(format!("{:.1}% protected", record.protected_percent))
                        .fill(egui::Color32::from_rgb(0x6A, 0x5A, 0xCD)),
                );
            });
            ui.add_space(8.0);

            ui.label(egui::RichText::new("Habitat Insights").strong());
            ui.label(format!("Total Coverage: {}", format_area(record.area_km2)));
            let status = ConservationStatus::of(record);
            ui.horizontal(|ui| {
                ui.label("Conservation Status:");
                ui.colored_label(status_color(status), status.to_string());
            });
        });
    }
}

fn habitat_card(ui: &mut egui::Ui, record: &HabitatRecord, highlighted: bool) {
    let stroke_color = if highlighted {
        egui::Color32::RED
    } else {
        habitat_color(record)
    };
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, stroke_color))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(record.name)
                        .strong()
                        .color(habitat_color(record)),
                );
                ui.label(format!("Area\n{}", format_area(record.area_km2)));
                ui.label(format!("Loss\n{:.1}%", record.loss_percent));
                ui.label(format!("Protected\n{:.1}%", record.protected_percent));
            });
        });
}

fn stat_line(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(value).strong());
        });
    });
}

fn status_color(status: ConservationStatus) -> egui::Color32 {
    match status {
        ConservationStatus::HighPriority => egui::Color32::from_rgb(0xD0, 0x30, 0x30),
        ConservationStatus::MediumPriority => egui::Color32::from_rgb(0xE0, 0xB0, 0x20),
        ConservationStatus::Stable => egui::Color32::from_rgb(0x30, 0xA0, 0x40),
    }
}
