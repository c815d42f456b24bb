//! Data pipeline behind the dashboard panels: fetching the model catalog,
//! submitting CSV files, refreshing the run history and projecting it into a
//! chart series.

mod catalog;
mod fetcher;
mod metric;
mod projector;
mod signal;
mod submission;
mod timeline;
pub mod timestamp;

pub use catalog::ModelCatalog;
pub use fetcher::{FetchEvent, Producer, ResourceFetcher};
pub use metric::{Metric, UnknownMetric};
pub use projector::{SeriesPoint, project, project_with_offset, value_range};
pub use signal::{CompletionListener, CompletionSignal};
pub use submission::{
    SUBMISSION_FAILED_MESSAGE, SubmissionCoordinator, SubmissionError, SubmissionState,
    ValidationError,
};
pub use timeline::{HISTORY_FAILED_MESSAGE, HistoryTimeline};
