//! Library exports for reuse in benchmarks and tests.
/// Per-user application directories.
pub mod app_dirs;
/// Startup configuration.
pub mod config;
/// Catalog, submission, history and chart projection.
pub mod dashboard;
/// egui front end.
pub mod egui_app;
/// Client for the remote scoring service.
pub mod gateway;
mod http_client;
/// Log file setup.
pub mod logging;
