//! egui renderer for the dashboard window.

use std::time::Duration;

use crate::egui_app::controller::DashboardController;
use eframe::egui::{self, Frame, Margin, RichText, Ui};

mod chrome;
mod history_chart;
mod history_panel;
mod model_panel;
pub mod style;
mod upload_panel;

/// Smallest window that still fits the chart and the upload form.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(760.0, 560.0);

/// Repaint cadence while a remote call is outstanding.
const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(50);

/// Renders the dashboard using the shared controller state.
pub struct EguiApp {
    controller: DashboardController,
    visuals_set: bool,
}

impl EguiApp {
    /// Wrap `controller` and start the initial fetches.
    pub fn new(mut controller: DashboardController) -> Self {
        controller.start();
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_sections(&mut self, ui: &mut Ui) {
        self.render_header(ui);
        ui.add_space(12.0);
        section(ui, |ui| self.render_model_panel(ui));
        ui.add_space(12.0);
        section(ui, |ui| self.render_upload_panel(ui));
        ui.add_space(12.0);
        section(ui, |ui| self.render_history_panel(ui));
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("dashboard_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| self.render_sections(ui));
        });
        if self.controller.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT_INTERVAL);
        }
    }
}

fn section(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui)) {
    Frame::new()
        .fill(style::compartment_fill())
        .stroke(style::section_stroke())
        .inner_margin(Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        });
}

fn heading(ui: &mut Ui, text: &str) {
    ui.label(
        RichText::new(text)
            .size(16.0)
            .strong()
            .color(style::palette().text_primary),
    );
}

fn error_line(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).color(style::error_text()));
}
