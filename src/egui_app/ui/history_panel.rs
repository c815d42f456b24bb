use super::*;
use crate::dashboard::Metric;
use crate::egui_app::state::HistoryRowView;

const TABLE_HEADERS: [&str; 10] = [
    "Timestamp",
    "Accuracy",
    "Precision",
    "Recall",
    "F1 Score",
    "Model Type",
    "Hyperparameters",
    "Model Description",
    "Dataset Name",
    "Dataset Description",
];

impl EguiApp {
    pub(super) fn render_history_panel(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let panel = self.controller.ui.history.clone();
        ui.horizontal(|ui| {
            heading(ui, "Performance History");
            if panel.loading {
                ui.spinner();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(!panel.loading, egui::Button::new("Refresh"))
                    .clicked()
                {
                    self.controller.refresh_history();
                }
                egui::ComboBox::from_id_salt("history_metric")
                    .selected_text(panel.metric.label())
                    .show_ui(ui, |ui| {
                        for metric in Metric::ALL {
                            if ui
                                .selectable_label(panel.metric == metric, metric.label())
                                .clicked()
                            {
                                self.controller.set_metric(metric);
                            }
                        }
                    });
                ui.label(RichText::new("Select Metric").color(palette.text_muted));
            });
        });
        if let Some(error) = panel.error.as_deref() {
            error_line(ui, error);
        }
        ui.add_space(6.0);
        history_chart::render(ui, &panel.points, panel.value_range.clone(), panel.metric);

        ui.add_space(12.0);
        heading(ui, "Performance History Table");
        ui.add_space(4.0);
        if panel.rows.is_empty() {
            ui.label(RichText::new("No runs recorded yet.").color(palette.text_muted));
            return;
        }
        egui::ScrollArea::both()
            .id_salt("history_table_scroll")
            .max_height(400.0)
            .show(ui, |ui| history_table(ui, &panel.rows));
    }
}

fn history_table(ui: &mut Ui, rows: &[HistoryRowView]) {
    let palette = style::palette();
    egui::Grid::new("history_table")
        .striped(true)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            for header in TABLE_HEADERS {
                ui.label(RichText::new(header).strong().color(palette.text_primary));
            }
            ui.end_row();
            for row in rows {
                ui.label(&row.timestamp);
                ui.label(&row.accuracy);
                ui.label(&row.precision);
                ui.label(&row.recall);
                ui.label(&row.f1_score);
                ui.label(&row.model_type);
                ui.label(&row.hyperparameters);
                ui.label(&row.model_description);
                ui.label(&row.dataset_name);
                ui.label(&row.dataset_description);
                ui.end_row();
            }
        });
}
