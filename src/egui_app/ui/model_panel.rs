use super::*;

impl EguiApp {
    pub(super) fn render_model_panel(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let panel = self.controller.ui.models.clone();
        ui.horizontal(|ui| {
            heading(ui, "Select a Model");
            if panel.loading {
                ui.spinner();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(!panel.loading, egui::Button::new("Reload"))
                    .clicked()
                {
                    self.controller.reload_models();
                }
            });
        });
        ui.add_space(6.0);

        let selected_text = panel
            .selected
            .and_then(|index| panel.rows.get(index))
            .map(|row| row.label.clone())
            .unwrap_or_else(|| "Select Model".to_string());
        egui::ComboBox::from_id_salt("model_picker")
            .width(320.0)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for (index, row) in panel.rows.iter().enumerate() {
                    let selected = panel.selected == Some(index);
                    let response = ui.selectable_label(selected, &row.label);
                    let response = match row.description.as_deref() {
                        Some(description) => response.on_hover_text(description),
                        None => response,
                    };
                    if response.clicked() {
                        self.controller.select_model(index);
                    }
                }
            });

        if let Some(error) = panel.error.as_deref() {
            error_line(ui, error);
        } else if panel.rows.is_empty() && !panel.loading {
            ui.label(RichText::new("No models available.").color(palette.text_muted));
        }

        let Some(row) = panel.selected.and_then(|index| panel.rows.get(index)) else {
            return;
        };
        ui.add_space(6.0);
        egui::Grid::new("model_details")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                let detail = |ui: &mut Ui, name: &str, value: Option<&str>| {
                    if let Some(value) = value {
                        ui.label(RichText::new(name).color(palette.text_muted));
                        ui.label(value);
                        ui.end_row();
                    }
                };
                detail(ui, "Description", row.description.as_deref());
                detail(ui, "Hyperparameters", row.hyperparameters.as_deref());
                detail(ui, "Created", row.created_at.as_deref());
            });
    }
}
