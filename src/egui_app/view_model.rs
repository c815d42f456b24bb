//! Helpers to convert dashboard data into egui-facing view structs.

use serde_json::{Map, Value};
use time::UtcOffset;

use crate::dashboard::{Metric, timestamp};
use crate::egui_app::state::{HistoryRowView, MetricCardView, ModelRowView};
use crate::gateway::{CsvUpload, HistoryRecord, MetricsResult, Model};

const MISSING: &str = "N/A";

/// Build picker rows for the model list.
pub fn model_rows(models: &[Model]) -> Vec<ModelRowView> {
    models
        .iter()
        .map(|model| ModelRowView {
            model_type: model.model_type.clone(),
            model_version: model.model_version.clone(),
            label: model.display_name(),
            description: model.description.clone(),
            hyperparameters: (!model.hyperparameters.is_empty())
                .then(|| compact_json(&model.hyperparameters)),
            created_at: model.created_at.clone(),
        })
        .collect()
}

/// One card per metric, in display order.
pub fn metric_cards(result: &MetricsResult) -> Vec<MetricCardView> {
    Metric::ALL
        .into_iter()
        .map(|metric| {
            let value = result.metrics.get(metric);
            MetricCardView {
                label: metric.label(),
                value: percent(value),
                fraction: value.clamp(0.0, 1.0) as f32,
            }
        })
        .collect()
}

/// Table rows for the history, labelled in `offset`.
pub fn history_rows(records: &[HistoryRecord], offset: UtcOffset) -> Vec<HistoryRowView> {
    records
        .iter()
        .map(|record| {
            let model = record.model_info.as_ref();
            let dataset = record.dataset_info.as_ref();
            HistoryRowView {
                timestamp: timestamp::label(&record.timestamp, offset),
                accuracy: percent(record.metric(Metric::Accuracy).unwrap_or(0.0)),
                precision: percent(record.metric(Metric::Precision).unwrap_or(0.0)),
                recall: percent(record.metric(Metric::Recall).unwrap_or(0.0)),
                f1_score: percent(record.metric(Metric::F1Score).unwrap_or(0.0)),
                model_type: or_missing(model.and_then(|info| info.model_type.as_deref())),
                hyperparameters: model
                    .map(|info| compact_json(&info.hyperparameters))
                    .unwrap_or_else(|| "{}".to_string()),
                model_description: or_missing(model.and_then(|info| info.description.as_deref())),
                dataset_name: or_missing(dataset.and_then(|info| info.dataset_name.as_deref())),
                dataset_description: or_missing(
                    dataset.and_then(|info| info.description.as_deref()),
                ),
            }
        })
        .collect()
}

/// Label for the picked file, e.g. `wine.csv (1.2 KB)`.
pub fn file_label(file: &CsvUpload) -> String {
    format!("{} ({})", file.file_name, byte_size(file.len()))
}

/// `0.8` renders as `80.00%`.
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn or_missing(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => MISSING.to_string(),
    }
}

fn compact_json(map: &Map<String, Value>) -> String {
    serde_json::to_string(map).unwrap_or_else(|_| "{}".to_string())
}

fn byte_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let bytes_f = bytes as f64;
    if bytes_f < KB {
        format!("{bytes} B")
    } else if bytes_f < KB * KB {
        format!("{:.1} KB", bytes_f / KB)
    } else {
        format!("{:.1} MB", bytes_f / (KB * KB))
    }
}
