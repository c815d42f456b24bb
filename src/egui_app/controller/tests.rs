use super::*;
use crate::dashboard::test_support::{StubGateway, poll_until, record, sample_metrics};
use crate::gateway::{Model, TransportError};
use tempfile::tempdir;

fn controller_with(gateway: &Arc<StubGateway>) -> DashboardController {
    let mut controller =
        DashboardController::new(gateway.clone(), &AppConfig::default(), UtcOffset::UTC);
    controller.start();
    settle(&mut controller);
    controller
}

fn settle(controller: &mut DashboardController) {
    poll_until(|| {
        controller.poll_background_jobs();
        !controller.is_busy()
    });
}

#[test]
fn start_fills_model_and_history_panels() {
    let gateway = Arc::new(StubGateway::with_models(vec![
        Model::new("rf", "1"),
        Model::new("xgb", "2"),
    ]));
    gateway.set_history(vec![record("2024-01-01T00:00:00Z", Some(0.9))]);
    let controller = controller_with(&gateway);

    let labels: Vec<_> = controller
        .ui
        .models
        .rows
        .iter()
        .map(|row| row.label.as_str())
        .collect();
    assert_eq!(labels, vec!["rf (Version 1)", "xgb (Version 2)"]);
    assert_eq!(controller.ui.history.points.len(), 1);
    assert_eq!(controller.ui.history.points[0].label, "2024-01-01 00:00:00");
    assert_eq!(controller.ui.history.rows[0].accuracy, "90.00%");
    assert!(!controller.ui.history.loading);
}

#[test]
fn submit_without_file_shows_validation_message() {
    let gateway = Arc::new(StubGateway::with_models(vec![Model::new("rf", "1")]));
    let mut controller = controller_with(&gateway);
    controller.select_model(0);
    controller.submit_csv();
    assert_eq!(
        controller.ui.upload.error.as_deref(),
        Some("Please select a CSV file to upload.")
    );
    assert_eq!(controller.ui.status.badge_label, "Warning");
    assert_eq!(gateway.submit_calls(), 0);
}

#[test]
fn successful_submit_shows_metrics_and_refreshes_history() {
    let gateway = Arc::new(StubGateway::with_models(vec![Model::new("rf", "1")]));
    gateway.set_submit_result(Ok(sample_metrics()));
    let mut controller = controller_with(&gateway);
    assert_eq!(gateway.history_calls(), 1);

    let dir = tempdir().unwrap();
    let path = dir.path().join("wine.csv");
    std::fs::write(&path, b"fixed acidity,quality\n7.4,5\n").unwrap();
    controller.load_csv(&path);
    assert_eq!(
        controller.ui.upload.file_label.as_deref(),
        Some("wine.csv (28 B)")
    );

    assert!(controller.catalog.select("1").is_some());
    controller.refresh_models_ui();
    assert_eq!(controller.ui.models.selected, Some(0));
    gateway.set_history(vec![
        record("2024-01-02T00:00:00Z", Some(0.8)),
        record("2024-01-01T00:00:00Z", Some(0.9)),
    ]);
    controller.submit_csv();
    assert!(controller.ui.upload.submitting);
    settle(&mut controller);

    let values: Vec<_> = controller
        .ui
        .upload
        .metrics
        .iter()
        .map(|card| card.value.as_str())
        .collect();
    assert_eq!(values, vec!["80.00%", "75.00%", "70.00%", "72.00%"]);
    assert!(controller.ui.upload.error.is_none());
    assert_eq!(gateway.history_calls(), 2);
    let labels: Vec<_> = controller
        .ui
        .history
        .points
        .iter()
        .map(|point| point.label.as_str())
        .collect();
    assert_eq!(labels, vec!["2024-01-01 00:00:00", "2024-01-02 00:00:00"]);
}

#[test]
fn failed_submit_keeps_history_untouched() {
    let gateway = Arc::new(StubGateway::with_models(vec![Model::new("rf", "1")]));
    gateway.set_submit_result(Err(TransportError::Transport("refused".into())));
    let mut controller = controller_with(&gateway);

    let dir = tempdir().unwrap();
    let path = dir.path().join("runs.csv");
    std::fs::write(&path, b"a\n1\n").unwrap();
    controller.load_csv(&path);
    controller.select_model(0);
    controller.submit_csv();
    settle(&mut controller);

    assert_eq!(
        controller.ui.upload.error.as_deref(),
        Some("Failed to get performance metrics. Please try again.")
    );
    assert!(controller.ui.upload.metrics.is_empty());
    assert_eq!(controller.ui.status.badge_label, "Error");
    assert_eq!(gateway.history_calls(), 1);
}

#[test]
fn metric_switch_reprojects_the_chart() {
    let gateway = Arc::new(StubGateway::default());
    let mut history = record("2024-01-01T00:00:00Z", Some(0.9));
    if let Some(metrics) = history.metrics.as_mut() {
        metrics.recall = Some(0.4);
    }
    gateway.set_history(vec![history]);
    let mut controller = controller_with(&gateway);
    assert_eq!(controller.ui.history.points[0].value, 0.9);

    controller.set_metric(Metric::Recall);
    assert_eq!(controller.ui.history.points[0].value, 0.4);
    controller.set_metric(Metric::F1Score);
    assert_eq!(controller.ui.history.points[0].value, 0.0);
    assert_eq!(gateway.history_calls(), 1);
}

#[test]
fn failed_model_listing_is_reported() {
    let gateway = Arc::new(StubGateway::default());
    gateway.fail_listing(TransportError::Status {
        code: 503,
        body: String::new(),
    });
    let controller = controller_with(&gateway);
    assert!(controller.ui.models.rows.is_empty());
    assert_eq!(
        controller.ui.models.error.as_deref(),
        Some("Failed to load models.")
    );
}

#[test]
fn failed_reload_blocks_submission_against_hidden_model() {
    let gateway = Arc::new(StubGateway::with_models(vec![Model::new("rf", "1")]));
    gateway.set_submit_result(Ok(sample_metrics()));
    let mut controller = controller_with(&gateway);
    controller.select_model(0);
    assert_eq!(controller.ui.models.selected, Some(0));

    gateway.fail_listing(TransportError::Transport("down".into()));
    controller.reload_models();
    settle(&mut controller);
    assert!(controller.ui.models.selected.is_none());

    let dir = tempdir().unwrap();
    let path = dir.path().join("wine.csv");
    std::fs::write(&path, b"a,b\n1,2\n").unwrap();
    controller.load_csv(&path);
    controller.submit_csv();
    assert_eq!(
        controller.ui.upload.error.as_deref(),
        Some("Please select a model before uploading the CSV.")
    );
    assert_eq!(gateway.submit_calls(), 0);
}
