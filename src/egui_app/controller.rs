//! Maintains dashboard state and bridges the data pipeline to the egui UI.

use std::sync::Arc;

use time::UtcOffset;

use crate::config::AppConfig;
use crate::dashboard::{self, HistoryTimeline, Metric, ModelCatalog, SubmissionCoordinator};
use crate::egui_app::state::UiState;
use crate::egui_app::ui::style::{self, StatusTone};
use crate::egui_app::view_model;
use crate::gateway::RemoteGateway;

mod background_jobs;
mod upload;

#[cfg(test)]
mod tests;

/// Owns the catalog, submission and history components for one window.
pub struct DashboardController {
    pub ui: UiState,
    catalog: ModelCatalog,
    submissions: SubmissionCoordinator,
    timeline: HistoryTimeline,
    offset: UtcOffset,
}

impl DashboardController {
    /// `offset` is the zone timestamps are shown in; resolve it before threads start.
    pub fn new(gateway: Arc<dyn RemoteGateway>, config: &AppConfig, offset: UtcOffset) -> Self {
        let submissions = SubmissionCoordinator::new(Arc::clone(&gateway));
        let timeline = HistoryTimeline::new(
            Arc::clone(&gateway),
            submissions.subscribe(),
            config.history,
        );
        Self {
            ui: UiState::new(config.history.default_metric),
            catalog: ModelCatalog::new(gateway),
            submissions,
            timeline,
            offset,
        }
    }

    /// Kick off the initial model and history fetches.
    pub fn start(&mut self) {
        self.catalog.activate();
        self.timeline.activate();
        self.refresh_models_ui();
        self.refresh_history_ui();
        self.set_status("Loading models and history...", StatusTone::Busy);
    }

    /// True while any remote call is outstanding.
    pub fn is_busy(&self) -> bool {
        self.catalog.is_loading() || self.submissions.is_submitting() || self.timeline.is_loading()
    }

    /// Select the model shown at `index` in the picker.
    pub fn select_model(&mut self, index: usize) {
        let Some(row) = self.ui.models.rows.get(index).cloned() else {
            return;
        };
        match self.catalog.select_key(&row.model_type, &row.model_version) {
            Some(model) => {
                let text = format!("Selected {}", model.display_name());
                self.set_status(text, StatusTone::Info);
            }
            None => self.set_status("Model is no longer available", StatusTone::Warning),
        }
        self.refresh_models_ui();
    }

    pub fn reload_models(&mut self) {
        self.catalog.reload();
        self.refresh_models_ui();
        self.set_status("Reloading models...", StatusTone::Busy);
    }

    pub fn refresh_history(&mut self) {
        self.timeline.refresh();
        self.refresh_history_ui();
        self.set_status("Refreshing history...", StatusTone::Busy);
    }

    /// Change the plotted metric; the table is unaffected.
    pub fn set_metric(&mut self, metric: Metric) {
        if self.ui.history.metric == metric {
            return;
        }
        self.ui.history.metric = metric;
        self.refresh_history_ui();
    }

    fn refresh_models_ui(&mut self) {
        let models = self.catalog.models();
        let selection = self.catalog.selection();
        let panel = &mut self.ui.models;
        panel.rows = view_model::model_rows(models);
        panel.selected = selection.and_then(|selected| {
            models
                .iter()
                .position(|model| model.key() == selected.key())
        });
        panel.loading = self.catalog.is_loading();
        panel.error = self
            .catalog
            .error()
            .map(|_| "Failed to load models.".to_string());
    }

    fn refresh_upload_ui(&mut self) {
        let panel = &mut self.ui.upload;
        panel.file_label = self.submissions.file().map(view_model::file_label);
        panel.submitting = self.submissions.is_submitting();
        panel.error = self.submissions.last_error().map(ToString::to_string);
        match self.submissions.last_result() {
            Some(result) => {
                panel.metrics = view_model::metric_cards(result);
                panel.prediction_count = result.predictions.len();
            }
            None => {
                panel.metrics.clear();
                panel.prediction_count = 0;
            }
        }
    }

    fn refresh_history_ui(&mut self) {
        let records = self.timeline.records();
        let panel = &mut self.ui.history;
        panel.points = dashboard::project_with_offset(records, panel.metric, self.offset);
        panel.value_range = dashboard::value_range(&panel.points);
        panel.rows = view_model::history_rows(records, self.offset);
        panel.loading = self.timeline.is_loading();
        panel.error = self.timeline.error().map(str::to_string);
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let text = text.into();
        match tone {
            StatusTone::Error => tracing::error!("{text}"),
            StatusTone::Warning => tracing::warn!("{text}"),
            _ => tracing::info!("{text}"),
        }
        self.ui.status.text = text;
        self.ui.status.badge_label = style::status_badge_label(tone).to_string();
        self.ui.status.badge_color = style::status_badge_color(tone);
    }
}
