use super::*;
use crate::dashboard::{FetchEvent, SubmissionState};

impl DashboardController {
    /// Apply whatever background calls finished since the last frame.
    ///
    /// Submissions are applied before the history so a completion is seen by
    /// the timeline in the same frame it lands.
    pub fn poll_background_jobs(&mut self) {
        if let Some(event) = self.catalog.poll() {
            self.refresh_models_ui();
            match event {
                FetchEvent::Loaded => {
                    let count = self.catalog.models().len();
                    self.set_status(format!("{count} models available"), StatusTone::Info);
                }
                FetchEvent::Failed(_) => {
                    self.set_status("Failed to load models.", StatusTone::Error);
                }
            }
        }

        if let Some(state) = self.submissions.poll() {
            self.refresh_upload_ui();
            match state {
                SubmissionState::Succeeded => {
                    let accuracy = self
                        .submissions
                        .last_result()
                        .map(|result| view_model::percent(result.metrics.accuracy))
                        .unwrap_or_default();
                    self.set_status(
                        format!("Scoring finished: accuracy {accuracy}"),
                        StatusTone::Info,
                    );
                }
                SubmissionState::Failed => {
                    self.set_status(dashboard::SUBMISSION_FAILED_MESSAGE, StatusTone::Error);
                }
                SubmissionState::Idle | SubmissionState::Submitting => {}
            }
        }

        let was_loading = self.ui.history.loading;
        let event = self.timeline.poll();
        if event.is_some() || was_loading != self.timeline.is_loading() {
            self.refresh_history_ui();
        }
        match event {
            Some(FetchEvent::Loaded) => {
                tracing::debug!("History shows {} runs", self.timeline.records().len());
            }
            Some(FetchEvent::Failed(_)) => {
                self.set_status(dashboard::HISTORY_FAILED_MESSAGE, StatusTone::Warning);
            }
            None => {}
        }
    }
}
