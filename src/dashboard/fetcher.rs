//! Fetch-on-activation primitive shared by the model catalog and the history.
//!
//! A fetch runs on a background thread and reports back through a channel
//! that the owner drains with [`ResourceFetcher::poll`] once per frame. Every
//! fetch is tagged with a generation number; only the newest generation may
//! change the exposed state, so a slow response can't overwrite a newer one.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::gateway::TransportError;

/// Zero-argument operation producing the resource.
pub type Producer<T> = Arc<dyn Fn() -> Result<T, TransportError> + Send + Sync>;

/// What a call to [`ResourceFetcher::poll`] applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchEvent {
    Loaded,
    Failed(TransportError),
}

struct Completed<T> {
    generation: u64,
    result: Result<T, TransportError>,
}

pub struct ResourceFetcher<T, D> {
    label: &'static str,
    producer: Producer<T>,
    deps: Option<D>,
    generation: u64,
    pending: bool,
    data: Option<T>,
    error: Option<TransportError>,
    tx: Sender<Completed<T>>,
    rx: Receiver<Completed<T>>,
}

impl<T, D> ResourceFetcher<T, D>
where
    T: Send + 'static,
    D: PartialEq + Clone,
{
    /// `label` names the resource in log lines.
    pub fn new(label: &'static str, producer: Producer<T>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            label,
            producer,
            deps: None,
            generation: 0,
            pending: false,
            data: None,
            error: None,
            tx,
            rx,
        }
    }

    /// Fetch on the first call and whenever `deps` differs from the last value.
    ///
    /// Returns `true` when a fetch was started.
    pub fn activate(&mut self, deps: D) -> bool {
        if self.deps.as_ref() == Some(&deps) {
            return false;
        }
        self.deps = Some(deps);
        self.start();
        true
    }

    /// Fetch again with the current dependencies.
    pub fn refetch(&mut self) {
        self.start();
    }

    fn start(&mut self) {
        self.generation += 1;
        self.pending = true;
        self.data = None;
        self.error = None;
        let generation = self.generation;
        let producer = Arc::clone(&self.producer);
        let tx = self.tx.clone();
        tracing::debug!("Fetching {} (generation {generation})", self.label);
        thread::spawn(move || {
            let result = producer();
            let _ = tx.send(Completed { generation, result });
        });
    }

    /// Apply finished fetches. Returns the outcome of the newest one, if it landed.
    pub fn poll(&mut self) -> Option<FetchEvent> {
        let mut applied = None;
        loop {
            let completed = match self.rx.try_recv() {
                Ok(completed) => completed,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            };
            if completed.generation != self.generation {
                tracing::debug!(
                    "Discarding stale {} response (generation {}, latest {})",
                    self.label,
                    completed.generation,
                    self.generation
                );
                continue;
            }
            self.pending = false;
            applied = Some(match completed.result {
                Ok(data) => {
                    self.data = Some(data);
                    self.error = None;
                    FetchEvent::Loaded
                }
                Err(err) => {
                    tracing::warn!("Fetching {} failed: {err}", self.label);
                    self.data = None;
                    self.error = Some(err.clone());
                    FetchEvent::Failed(err)
                }
            });
        }
        applied
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&TransportError> {
        self.error.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of fetches started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
