//! Shared state types for the egui UI.

use std::ops::RangeInclusive;

use crate::dashboard::{Metric, SeriesPoint};
use crate::egui_app::ui::style::{self, StatusTone};
use egui::Color32;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub models: ModelPanelState,
    pub upload: UploadPanelState,
    pub history: HistoryPanelState,
}

impl UiState {
    pub fn new(metric: Metric) -> Self {
        Self {
            status: StatusBarState::idle(),
            models: ModelPanelState::default(),
            upload: UploadPanelState::default(),
            history: HistoryPanelState::new(metric),
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(Metric::default())
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Select a model and a CSV file to get started".into(),
            badge_label: style::status_badge_label(StatusTone::Idle).into(),
            badge_color: style::status_badge_color(StatusTone::Idle),
        }
    }
}

/// Model picker contents.
#[derive(Clone, Debug, Default)]
pub struct ModelPanelState {
    pub rows: Vec<ModelRowView>,
    pub selected: Option<usize>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModelRowView {
    pub model_type: String,
    pub model_version: String,
    pub label: String,
    pub description: Option<String>,
    pub hyperparameters: Option<String>,
    pub created_at: Option<String>,
}

/// Upload form and the latest scoring result.
#[derive(Clone, Debug, Default)]
pub struct UploadPanelState {
    /// Name and size of the picked file.
    pub file_label: Option<String>,
    pub submitting: bool,
    pub error: Option<String>,
    pub metrics: Vec<MetricCardView>,
    pub prediction_count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MetricCardView {
    pub label: &'static str,
    pub value: String,
    /// Fraction in `0.0..=1.0` for the progress bar.
    pub fraction: f32,
}

/// Chart and table of past runs.
#[derive(Clone, Debug)]
pub struct HistoryPanelState {
    pub metric: Metric,
    pub points: Vec<SeriesPoint>,
    pub value_range: RangeInclusive<f64>,
    pub rows: Vec<HistoryRowView>,
    pub loading: bool,
    pub error: Option<String>,
}

impl HistoryPanelState {
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            points: Vec::new(),
            value_range: 0.0..=1.0,
            rows: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRowView {
    pub timestamp: String,
    pub accuracy: String,
    pub precision: String,
    pub recall: String,
    pub f1_score: String,
    pub model_type: String,
    pub hyperparameters: String,
    pub model_description: String,
    pub dataset_name: String,
    pub dataset_description: String,
}
