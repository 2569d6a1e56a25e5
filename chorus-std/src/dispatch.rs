//! The forwarding engine.
//!
//! Both call patterns walk a snapshot of live delegates in registry order
//! and invoke every delegate that responds to the selector. The snapshot is
//! taken by the caller before iterating, so delegates that mutate the
//! registry during a pass neither skip nor repeat anyone in that pass.

use chorus_core::{Delegate, Selector};
use std::sync::Arc;

/// Invoke `invoke` on every delegate in `delegates` that responds to `selector`.
///
/// Returns the number of delegates invoked.
pub fn broadcast<D, F>(delegates: &[Arc<D>], selector: Selector, mut invoke: F) -> usize
where
    D: Delegate + ?Sized,
    F: FnMut(&D),
{
    let mut invoked = 0;
    for delegate in capable(delegates, selector) {
        invoke(delegate);
        invoked += 1;
    }
    tracing::trace!(%selector, candidates = delegates.len(), invoked, "broadcast");
    invoked
}

/// Invoke `invoke` on every capable delegate and keep the last result.
///
/// Returns `None` when no delegate responds to `selector`.
pub fn call_last<D, R, F>(delegates: &[Arc<D>], selector: Selector, mut invoke: F) -> Option<R>
where
    D: Delegate + ?Sized,
    F: FnMut(&D) -> R,
{
    let mut last = None;
    let mut invoked = 0usize;
    for delegate in capable(delegates, selector) {
        last = Some(invoke(delegate));
        invoked += 1;
    }
    tracing::trace!(%selector, candidates = delegates.len(), invoked, "call");
    last
}

fn capable<D>(delegates: &[Arc<D>], selector: Selector) -> impl Iterator<Item = &D>
where
    D: Delegate + ?Sized,
{
    delegates
        .iter()
        .map(|delegate| &**delegate)
        .filter(move |delegate| delegate.responds_to(selector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const PING: Selector = Selector::new("Probe", "ping");
    const VALUE: Selector = Selector::new("Probe", "value");

    struct Probe {
        id: u32,
        answers: bool,
        log: Arc<Mutex<Vec<u32>>>,
    }

    impl Probe {
        fn touch(&self) -> u32 {
            self.log.lock().unwrap().push(self.id);
            self.id
        }
    }

    impl Delegate for Probe {
        fn responds_to(&self, selector: Selector) -> bool {
            selector == PING || (self.answers && selector == VALUE)
        }
    }

    fn probes(answers: &[bool]) -> (Vec<Arc<Probe>>, Arc<Mutex<Vec<u32>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let probes = answers
            .iter()
            .enumerate()
            .map(|(i, &answers)| {
                Arc::new(Probe {
                    id: i as u32 + 1,
                    answers,
                    log: log.clone(),
                })
            })
            .collect();
        (probes, log)
    }

    #[test]
    fn test_broadcast_visits_each_in_order() {
        let (delegates, log) = probes(&[true, false, true]);
        let invoked = broadcast(&delegates, PING, |p| {
            p.touch();
        });
        assert_eq!(invoked, 3);
        assert_eq!(*log.lock().unwrap(), [1, 2, 3]);
    }

    #[test]
    fn test_broadcast_skips_non_responders() {
        let (delegates, log) = probes(&[true, false, true]);
        let invoked = broadcast(&delegates, VALUE, |p| {
            p.touch();
        });
        assert_eq!(invoked, 2);
        assert_eq!(*log.lock().unwrap(), [1, 3]);
    }

    #[test]
    fn test_call_returns_last_responder() {
        let (delegates, log) = probes(&[true, true, false]);
        assert_eq!(call_last(&delegates, VALUE, Probe::touch), Some(2));
        assert_eq!(*log.lock().unwrap(), [1, 2]);
    }

    #[test]
    fn test_call_with_single_responder_in_the_middle() {
        let (delegates, _log) = probes(&[false, true, false]);
        assert_eq!(call_last(&delegates, VALUE, Probe::touch), Some(2));
    }

    #[test]
    fn test_call_without_responders_is_none() {
        let (delegates, log) = probes(&[false, false]);
        assert_eq!(call_last(&delegates, VALUE, Probe::touch), None);
        assert!(log.lock().unwrap().is_empty());

        let empty: Vec<Arc<Probe>> = Vec::new();
        assert_eq!(broadcast(&empty, PING, |_| {}), 0);
    }
}
