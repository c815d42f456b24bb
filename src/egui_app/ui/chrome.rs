use super::*;
use eframe::egui::StrokeKind;

impl EguiApp {
    pub(super) fn render_header(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Model Selection and CSV Upload")
                    .size(22.0)
                    .color(palette.text_primary),
            );
            ui.label(
                RichText::new(
                    "Select a machine learning model from the available options and upload a CSV file for prediction.",
                )
                .color(palette.text_muted),
            );
        });
    }

    pub(super) fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = self.controller.ui.status.clone();
                ui.horizontal(|ui| {
                    ui.add_space(6.0);
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                    ui.painter()
                        .rect_filled(badge_rect, 0.0, status.badge_color);
                    ui.painter().rect_stroke(
                        badge_rect,
                        0.0,
                        style::inner_border(),
                        StrokeKind::Inside,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_muted));
                    if self.controller.is_busy() {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.spinner();
                        });
                    }
                });
            });
    }
}
