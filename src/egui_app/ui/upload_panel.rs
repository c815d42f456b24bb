use super::*;
use crate::egui_app::state::MetricCardView;

impl EguiApp {
    pub(super) fn render_upload_panel(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let panel = self.controller.ui.upload.clone();
        heading(ui, "Upload CSV for Prediction");
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!panel.submitting, egui::Button::new("Choose CSV..."))
                .clicked()
            {
                self.controller.pick_csv_via_dialog();
            }
            match panel.file_label.as_deref() {
                Some(label) => {
                    ui.label(label);
                    if ui
                        .add_enabled(!panel.submitting, egui::Button::new("Clear"))
                        .clicked()
                    {
                        self.controller.clear_csv();
                    }
                }
                None => {
                    ui.label(RichText::new("No file chosen").color(palette.text_muted));
                }
            }
            ui.add_space(10.0);
            if ui
                .add_enabled(!panel.submitting, egui::Button::new("Submit"))
                .clicked()
            {
                self.controller.submit_csv();
            }
            if panel.submitting {
                ui.spinner();
            }
        });

        if let Some(error) = panel.error.as_deref() {
            ui.add_space(6.0);
            error_line(ui, error);
        }
        if panel.metrics.is_empty() {
            return;
        }

        ui.add_space(10.0);
        ui.label(
            RichText::new("Performance Metrics")
                .strong()
                .color(palette.accent_ice),
        );
        ui.add_space(4.0);
        ui.columns(panel.metrics.len(), |columns| {
            for (column, card) in columns.iter_mut().zip(&panel.metrics) {
                metric_card(column, card);
            }
        });
        if panel.prediction_count > 0 {
            ui.label(
                RichText::new(format!("{} rows scored", panel.prediction_count))
                    .color(palette.text_muted),
            );
        }
    }
}

fn metric_card(ui: &mut Ui, card: &MetricCardView) {
    let palette = style::palette();
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(card.label).color(palette.text_primary));
        ui.add(
            egui::ProgressBar::new(card.fraction)
                .desired_width(ui.available_width().min(140.0))
                .fill(palette.accent_mint.gamma_multiply(0.6))
                .text(card.value.as_str()),
        );
    });
}
