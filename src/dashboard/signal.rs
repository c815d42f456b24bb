//! Single-threaded publish/subscribe counter for "a submission succeeded".

use std::cell::Cell;
use std::rc::Rc;

/// Monotonic completion counter owned by the publisher.
#[derive(Debug, Default)]
pub struct CompletionSignal {
    version: Rc<Cell<u64>>,
}

impl CompletionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completion.
    pub fn emit(&self) {
        self.version.set(self.version.get() + 1);
    }

    /// Completions emitted so far.
    pub fn version(&self) -> u64 {
        self.version.get()
    }

    /// New listener that only sees completions emitted after this call.
    pub fn subscribe(&self) -> CompletionListener {
        CompletionListener {
            version: Rc::clone(&self.version),
            seen: self.version.get(),
        }
    }
}

/// Read side of a [`CompletionSignal`]; each listener tracks what it has seen.
#[derive(Debug)]
pub struct CompletionListener {
    version: Rc<Cell<u64>>,
    seen: u64,
}

impl CompletionListener {
    /// Number of completions since the previous call, marking them seen.
    pub fn take(&mut self) -> u64 {
        let current = self.version.get();
        let fresh = current.saturating_sub(self.seen);
        self.seen = current;
        fresh
    }

    pub fn seen(&self) -> u64 {
        self.seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_counts_each_completion_once() {
        let signal = CompletionSignal::new();
        let mut listener = signal.subscribe();
        assert_eq!(listener.take(), 0);

        signal.emit();
        signal.emit();
        assert_eq!(listener.take(), 2);
        assert_eq!(listener.take(), 0);
        assert_eq!(listener.seen(), 2);
    }

    #[test]
    fn late_subscribers_skip_earlier_completions() {
        let signal = CompletionSignal::new();
        signal.emit();
        let mut early_seen = signal.subscribe();
        let mut other = signal.subscribe();
        signal.emit();
        assert_eq!(early_seen.take(), 1);
        assert_eq!(other.take(), 1);
        assert_eq!(signal.version(), 2);
    }
}
