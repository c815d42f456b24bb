//! Run history, refetched after every successful submission.

use std::sync::Arc;

use crate::config::HistorySettings;
use crate::gateway::{HistoryRecord, RemoteGateway};

use super::fetcher::{FetchEvent, ResourceFetcher};
use super::signal::CompletionListener;
use super::timestamp;

/// Shown whenever a history fetch fails.
pub const HISTORY_FAILED_MESSAGE: &str = "Failed to load performance history.";

pub struct HistoryTimeline {
    fetcher: ResourceFetcher<Vec<HistoryRecord>, u64>,
    completions: CompletionListener,
    observed: u64,
    records: Vec<HistoryRecord>,
    sort_chronologically: bool,
}

impl HistoryTimeline {
    pub fn new(
        gateway: Arc<dyn RemoteGateway>,
        completions: CompletionListener,
        settings: HistorySettings,
    ) -> Self {
        let fetcher = ResourceFetcher::new("history", Arc::new(move || gateway.fetch_history()));
        Self {
            fetcher,
            observed: completions.seen(),
            completions,
            records: Vec::new(),
            sort_chronologically: settings.sort_chronologically,
        }
    }

    /// Start the initial fetch; later calls do nothing.
    pub fn activate(&mut self) {
        self.fetcher.activate(self.observed);
    }

    /// Fetch again without waiting for a submission.
    pub fn refresh(&mut self) {
        self.fetcher.refetch();
    }

    /// Refetch once per new completion, then apply finished fetches.
    pub fn poll(&mut self) -> Option<FetchEvent> {
        for _ in 0..self.completions.take() {
            self.observed += 1;
            tracing::debug!("Submission completed; refreshing history ({})", self.observed);
            self.fetcher.activate(self.observed);
        }
        let event = self.fetcher.poll()?;
        if event == FetchEvent::Loaded {
            let mut records = self.fetcher.data().cloned().unwrap_or_default();
            if self.sort_chronologically {
                sort_chronologically(&mut records);
            }
            tracing::debug!("Loaded {} history records", records.len());
            self.records = records;
        }
        Some(event)
    }

    /// The last successfully loaded snapshot, kept while refetching and after failures.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// User-facing message for the latest failed fetch.
    pub fn error(&self) -> Option<&'static str> {
        self.fetcher.error().map(|_| HISTORY_FAILED_MESSAGE)
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.is_pending()
    }

    /// Completions this timeline has reacted to.
    pub fn observed_completions(&self) -> u64 {
        self.observed
    }
}

/// Oldest first; records with unreadable timestamps keep their order at the end.
pub(crate) fn sort_chronologically(records: &mut [HistoryRecord]) {
    records.sort_by_cached_key(|record| {
        let parsed = timestamp::parse(&record.timestamp);
        (parsed.is_none(), parsed)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::signal::CompletionSignal;
    use crate::dashboard::test_support::{StubGateway, poll_until, record};
    use crate::dashboard::Metric;
    use crate::gateway::TransportError;

    fn settings(sort_chronologically: bool) -> HistorySettings {
        HistorySettings {
            sort_chronologically,
            default_metric: Metric::Accuracy,
        }
    }

    fn settle(timeline: &mut HistoryTimeline) -> FetchEvent {
        let mut event = None;
        poll_until(|| {
            event = timeline.poll();
            event.is_some()
        });
        event.unwrap()
    }

    #[test]
    fn activate_fetches_once() {
        let gateway = Arc::new(StubGateway::default());
        gateway.set_history(vec![record("2024-01-01T00:00:00Z", Some(0.9))]);
        let signal = CompletionSignal::new();
        let mut timeline = HistoryTimeline::new(gateway.clone(), signal.subscribe(), settings(true));
        timeline.activate();
        timeline.activate();
        assert_eq!(settle(&mut timeline), FetchEvent::Loaded);
        assert_eq!(timeline.records().len(), 1);
        assert_eq!(gateway.history_calls(), 1);
    }

    #[test]
    fn each_completion_triggers_one_refetch() {
        let gateway = Arc::new(StubGateway::default());
        let signal = CompletionSignal::new();
        let mut timeline = HistoryTimeline::new(gateway.clone(), signal.subscribe(), settings(true));
        timeline.activate();
        settle(&mut timeline);

        signal.emit();
        settle(&mut timeline);
        assert_eq!(gateway.history_calls(), 2);
        assert_eq!(timeline.observed_completions(), 1);

        assert_eq!(timeline.poll(), None);
        assert_eq!(gateway.history_calls(), 2);
    }

    #[test]
    fn failed_refetch_keeps_previous_records() {
        let gateway = Arc::new(StubGateway::default());
        gateway.set_history(vec![record("2024-01-01T00:00:00Z", Some(0.9))]);
        let signal = CompletionSignal::new();
        let mut timeline = HistoryTimeline::new(gateway.clone(), signal.subscribe(), settings(true));
        timeline.activate();
        settle(&mut timeline);

        gateway.fail_history(TransportError::Status {
            code: 500,
            body: String::new(),
        });
        timeline.refresh();
        assert_eq!(timeline.records().len(), 1);
        assert!(matches!(settle(&mut timeline), FetchEvent::Failed(_)));
        assert_eq!(timeline.records().len(), 1);
        assert_eq!(timeline.error(), Some(HISTORY_FAILED_MESSAGE));
    }

    #[test]
    fn records_are_sorted_oldest_first() {
        let gateway = Arc::new(StubGateway::default());
        gateway.set_history(vec![
            record("Wed, 03 Jan 2024 00:00:00 GMT", Some(0.3)),
            record("not a date", Some(0.0)),
            record("2024-01-01T00:00:00Z", Some(0.1)),
            record("", Some(0.5)),
            record("2024-01-02 00:00:00", Some(0.2)),
        ]);
        let signal = CompletionSignal::new();
        let mut timeline = HistoryTimeline::new(gateway, signal.subscribe(), settings(true));
        timeline.activate();
        settle(&mut timeline);

        let order: Vec<&str> = timeline
            .records()
            .iter()
            .map(|record| record.timestamp.as_str())
            .collect();
        assert_eq!(
            order,
            vec![
                "2024-01-01T00:00:00Z",
                "2024-01-02 00:00:00",
                "Wed, 03 Jan 2024 00:00:00 GMT",
                "not a date",
                "",
            ]
        );
    }

    #[test]
    fn sorting_can_be_disabled() {
        let gateway = Arc::new(StubGateway::default());
        gateway.set_history(vec![
            record("2024-01-02T00:00:00Z", None),
            record("2024-01-01T00:00:00Z", None),
        ]);
        let signal = CompletionSignal::new();
        let mut timeline = HistoryTimeline::new(gateway, signal.subscribe(), settings(false));
        timeline.activate();
        settle(&mut timeline);
        assert_eq!(timeline.records()[0].timestamp, "2024-01-02T00:00:00Z");
    }
}
