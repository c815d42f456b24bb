//! Typed client for the remote scoring service.
//!
//! The dashboard only talks to the service through [`RemoteGateway`], so the
//! pipeline can be driven by an in-memory stub in tests and by
//! [`HttpGateway`] in the app.

mod api;
mod multipart;
mod types;

pub use api::{HttpGateway, TransportError};
pub use types::{
    CsvUpload, DatasetInfo, HistoryRecord, Metrics, MetricsResult, Model, ModelInfo, RunMetrics,
    UploadError,
};

/// The three remote operations the dashboard depends on.
///
/// Calls block the current thread until the service answers or a timeout
/// fires; callers run them on background jobs. None of them retry.
pub trait RemoteGateway: Send + Sync {
    /// `GET /models`
    fn list_models(&self) -> Result<Vec<Model>, TransportError>;

    /// `POST /predict` with a multipart body of `file`, `model_type`, `model_version`.
    fn submit(
        &self,
        file: &CsvUpload,
        model_type: &str,
        model_version: &str,
    ) -> Result<MetricsResult, TransportError>;

    /// `GET /performance_history`
    fn fetch_history(&self) -> Result<Vec<HistoryRecord>, TransportError>;
}
