#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the Modelboard dashboard.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use std::sync::Arc;

use eframe::egui;
use modelboard::config;
use modelboard::dashboard::timestamp;
use modelboard::egui_app::controller::DashboardController;
use modelboard::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use modelboard::gateway::HttpGateway;
use modelboard::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Must run before any thread is spawned.
    let offset = timestamp::local_offset();

    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let config = config::load_or_default();

    let viewport = egui::ViewportBuilder::default()
        .with_title("Modelboard")
        .with_inner_size([1100.0, 820.0])
        .with_min_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Modelboard",
        native_options,
        Box::new(move |_cc| Ok(build_app(config, offset))),
    )?;
    Ok(())
}

/// Build the dashboard, or an error screen when the config could not be loaded.
fn build_app(
    config: Result<config::AppConfig, config::ConfigError>,
    offset: time::UtcOffset,
) -> Box<dyn eframe::App> {
    match config {
        Ok(config) => {
            let gateway = Arc::new(HttpGateway::new(&config.gateway));
            tracing::info!("Using scoring service at {}", gateway.base_url());
            let controller = DashboardController::new(gateway, &config, offset);
            Box::new(EguiApp::new(controller))
        }
        Err(err) => {
            tracing::error!("Failed to load config: {err}");
            Box::new(LaunchError {
                message: format!("Failed to load config: {err}"),
            })
        }
    }
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start Modelboard");
                ui.label(&self.message);
            });
        });
    }
}
