//! Upload of a CSV file for scoring, one submission at a time.
//!
//! The coordinator owns the picked file, the latest metrics and the
//! completion signal other panels subscribe to. A submission runs on a
//! background thread and is applied in [`SubmissionCoordinator::poll`].

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::gateway::{CsvUpload, MetricsResult, Model, RemoteGateway, TransportError};

use super::signal::{CompletionListener, CompletionSignal};

/// Shown for every failed submission; the transport detail is only logged.
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to get performance metrics. Please try again.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a CSV file to upload.")]
    MissingFile,
    #[error("Please select a model before uploading the CSV.")]
    MissingModel,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to get performance metrics. Please try again.")]
    Transport(TransportError),
    #[error("A submission is already in progress.")]
    ConcurrentSubmission,
}

type SubmitResult = Result<MetricsResult, TransportError>;

pub struct SubmissionCoordinator {
    gateway: Arc<dyn RemoteGateway>,
    file: Option<CsvUpload>,
    state: SubmissionState,
    last_result: Option<MetricsResult>,
    last_error: Option<SubmissionError>,
    in_flight: Option<Receiver<SubmitResult>>,
    completions: CompletionSignal,
}

impl SubmissionCoordinator {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self {
            gateway,
            file: None,
            state: SubmissionState::Idle,
            last_result: None,
            last_error: None,
            in_flight: None,
            completions: CompletionSignal::new(),
        }
    }

    pub fn set_file(&mut self, file: CsvUpload) {
        self.settle();
        tracing::debug!("Picked {} ({} bytes)", file.file_name, file.len());
        self.file = Some(file);
    }

    pub fn clear_file(&mut self) {
        self.settle();
        self.file = None;
    }

    pub fn file(&self) -> Option<&CsvUpload> {
        self.file.as_ref()
    }

    /// Send the picked file for scoring against `selection`.
    ///
    /// Rejected without a network call while another submission is running,
    /// when no file is picked, or when no model is selected (in that order).
    pub fn submit(&mut self, selection: Option<&Model>) -> Result<(), SubmissionError> {
        self.settle();
        if self.state == SubmissionState::Submitting {
            return Err(self.reject(SubmissionError::ConcurrentSubmission));
        }
        let Some(file) = self.file.clone() else {
            return Err(self.reject(ValidationError::MissingFile.into()));
        };
        let Some(model) = selection else {
            return Err(self.reject(ValidationError::MissingModel.into()));
        };

        self.last_error = None;
        self.state = SubmissionState::Submitting;
        let gateway = Arc::clone(&self.gateway);
        let model_type = model.model_type.clone();
        let model_version = model.model_version.clone();
        tracing::info!(
            "Submitting {} for {}",
            file.file_name,
            model.display_name()
        );
        let (tx, rx) = mpsc::channel();
        self.in_flight = Some(rx);
        thread::spawn(move || {
            let result = gateway.submit(&file, &model_type, &model_version);
            let _ = tx.send(result);
        });
        Ok(())
    }

    /// Apply a finished submission. Returns the new state when one landed.
    pub fn poll(&mut self) -> Option<SubmissionState> {
        let rx = self.in_flight.as_ref()?;
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(TransportError::Transport(
                "submission worker stopped without a result".into(),
            )),
        };
        self.in_flight = None;
        match result {
            Ok(result) => {
                tracing::info!(
                    "Submission scored: accuracy {:.4}, f1 {:.4}",
                    result.metrics.accuracy,
                    result.metrics.f1_score
                );
                self.last_result = Some(result);
                self.last_error = None;
                self.state = SubmissionState::Succeeded;
                self.completions.emit();
            }
            Err(err) => {
                tracing::warn!("Submission failed: {err}");
                self.last_error = Some(SubmissionError::Transport(err));
                self.state = SubmissionState::Failed;
            }
        }
        Some(self.state)
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Metrics of the latest successful submission; kept across failures.
    pub fn last_result(&self) -> Option<&MetricsResult> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&SubmissionError> {
        self.last_error.as_ref()
    }

    /// Listen for successful submissions.
    pub fn subscribe(&self) -> CompletionListener {
        self.completions.subscribe()
    }

    /// Successful submissions so far.
    pub fn completions(&self) -> u64 {
        self.completions.version()
    }

    fn settle(&mut self) {
        if matches!(
            self.state,
            SubmissionState::Succeeded | SubmissionState::Failed
        ) {
            self.state = SubmissionState::Idle;
        }
    }

    fn reject(&mut self, err: SubmissionError) -> SubmissionError {
        tracing::debug!("Submission rejected: {err}");
        self.last_error = Some(err.clone());
        err
    }
}
