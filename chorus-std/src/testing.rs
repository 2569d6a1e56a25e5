//! Testing utilities for Chorus.
//!
//! This module provides utilities to make testing delegates and
//! multiplexers easier.
//!
//! # Features
//!
//! - [`CallLog`]: A shared, ordered record of forwarded calls

use chorus_core::Selector;
use std::sync::{Arc, Mutex};

// ============================================================================
// Call Log
// ============================================================================

/// One forwarded call as seen by a delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call {
    /// Label of the delegate that received the call.
    pub delegate: &'static str,
    /// The method that was called.
    pub selector: Selector,
}

/// An ordered log shared by several test delegates.
///
/// Each delegate keeps a clone and records the calls it receives, so the
/// test can assert on delivery order across delegates.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// let first = Arc::new(Listener::new("first", log.clone()));
/// let second = Arc::new(Listener::new("second", log.clone()));
///
/// // Register both, dispatch...
///
/// assert_eq!(log.delegates_for(<dyn ObjectDelegate>::DID_SOMETHING), ["first", "second"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `delegate` received `selector`.
    pub fn record(&self, delegate: &'static str, selector: Selector) {
        self.calls.lock().unwrap().push(Call { delegate, selector });
    }

    /// Get a clone of the recorded calls.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Labels of the delegates that received `selector`, in call order.
    pub fn delegates_for(&self, selector: Selector) -> Vec<&'static str> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.selector == selector)
            .map(|call| call.delegate)
            .collect()
    }

    /// How many times `delegate` received `selector`.
    pub fn count(&self, delegate: &str, selector: Selector) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.delegate == delegate && call.selector == selector)
            .count()
    }

    /// Get the number of recorded calls.
    pub fn len(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PING: Selector = Selector::new("Probe", "ping");
    const PONG: Selector = Selector::new("Probe", "pong");

    #[test]
    fn test_clones_share_the_log() {
        let log = CallLog::new();
        let other = log.clone();
        log.record("a", PING);
        other.record("b", PING);
        other.record("a", PONG);

        assert_eq!(log.len(), 3);
        assert_eq!(log.delegates_for(PING), ["a", "b"]);
        assert_eq!(log.count("a", PONG), 1);

        other.clear();
        assert!(log.is_empty());
    }
}
