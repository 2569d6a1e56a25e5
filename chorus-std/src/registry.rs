//! Ordered, non-owning delegate registry.
//!
//! Entries are [`Weak`] references: the registry never keeps a delegate
//! alive. A delegate whose last strong reference is dropped silently stops
//! being listed, counted, or matched, and is pruned on the next mutation.
//!
//! Identity is the address of the delegate's allocation, so the same object
//! seen through `Arc<Listener>` and `Arc<dyn ObjectDelegate>` is one entry.

use chorus_core::{ConformancePolicy, Delegate, RegistryError};
use std::{
    ptr,
    sync::{Arc, Weak},
};

/// An ordered registry of weakly held delegates.
///
/// The order of entries is the dispatch order. No delegate appears twice:
/// inserting a registered delegate relocates it.
pub struct DelegateRegistry<D: ?Sized> {
    entries: Vec<Weak<D>>,
    policy: Arc<ConformancePolicy>,
}

impl<D: Delegate + ?Sized> Default for DelegateRegistry<D> {
    fn default() -> Self {
        Self::new(Arc::new(ConformancePolicy::new()))
    }
}

impl<D: Delegate + ?Sized> DelegateRegistry<D> {
    /// Create an empty registry that validates against `policy`.
    pub fn new(policy: Arc<ConformancePolicy>) -> Self {
        Self {
            entries: Vec::new(),
            policy,
        }
    }

    /// The conformance policy applied on every insert.
    pub fn policy(&self) -> &ConformancePolicy {
        &self.policy
    }

    /// Append `delegate`, or move it to the end if already registered.
    pub fn append(&mut self, delegate: &Arc<D>) -> Result<usize, RegistryError> {
        self.place(delegate, |remaining| Ok(remaining.len()))
    }

    /// Insert `delegate` at `index`, relocating it if already registered.
    ///
    /// The valid range is `0..=len` over the current live length. When a
    /// registered delegate is moved past the end of the remaining entries it
    /// lands last.
    pub fn insert_at(&mut self, delegate: &Arc<D>, index: usize) -> Result<usize, RegistryError> {
        let len = self.len();
        self.place(delegate, |remaining| {
            if index > len {
                return Err(RegistryError::IndexOutOfRange { index, len });
            }
            Ok(index.min(remaining.len()))
        })
    }

    /// Insert `delegate` immediately before `anchor`.
    pub fn insert_before<A: ?Sized>(
        &mut self,
        delegate: &Arc<D>,
        anchor: &Arc<A>,
    ) -> Result<usize, RegistryError> {
        if let Some(index) = self.self_anchored(delegate, anchor)? {
            return Ok(index);
        }
        self.place(delegate, |remaining| anchor_position(remaining, anchor))
    }

    /// Insert `delegate` immediately after `anchor`.
    pub fn insert_after<A: ?Sized>(
        &mut self,
        delegate: &Arc<D>,
        anchor: &Arc<A>,
    ) -> Result<usize, RegistryError> {
        if let Some(index) = self.self_anchored(delegate, anchor)? {
            return Ok(index);
        }
        self.place(delegate, |remaining| {
            anchor_position(remaining, anchor).map(|index| index + 1)
        })
    }

    /// Remove `delegate`. Returns `false` if it was not registered.
    pub fn remove<A: ?Sized>(&mut self, delegate: &Arc<A>) -> bool {
        self.prune();
        match position_in(&self.entries, delegate) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every delegate.
    pub fn remove_all(&mut self) {
        self.entries.clear();
    }

    /// The live delegates, in dispatch order.
    ///
    /// The returned strong references keep the delegates alive only for as
    /// long as the caller holds the snapshot.
    pub fn live_entries(&self) -> Vec<Arc<D>> {
        self.entries.iter().filter_map(Weak::upgrade).collect()
    }

    /// Position of `delegate` among the live delegates.
    pub fn position<A: ?Sized>(&self, delegate: &Arc<A>) -> Option<usize> {
        self.entries
            .iter()
            .filter(|entry| entry.strong_count() > 0)
            .position(|entry| ptr::addr_eq(entry.as_ptr(), Arc::as_ptr(delegate)))
    }

    /// Whether `delegate` is registered and alive.
    pub fn contains<A: ?Sized>(&self, delegate: &Arc<A>) -> bool {
        self.position(delegate).is_some()
    }

    /// Number of live delegates.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.strong_count() > 0).count()
    }

    /// Whether no live delegate is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate, then rebuild the entry list with `delegate` moved to the
    /// index chosen by `resolve` from the list without `delegate`.
    ///
    /// Nothing observable changes when an error is returned.
    fn place<F>(&mut self, delegate: &Arc<D>, resolve: F) -> Result<usize, RegistryError>
    where
        F: FnOnce(&[Weak<D>]) -> Result<usize, RegistryError>,
    {
        if let Err(err) = self.policy.check(&**delegate) {
            tracing::warn!(%err, "rejected non-conforming delegate");
            return Err(err.into());
        }
        self.prune();

        let mut remaining = self.entries.clone();
        let previous = position_in(&remaining, delegate);
        if let Some(index) = previous {
            remaining.remove(index);
        }
        let index = resolve(&remaining)?;
        remaining.insert(index, Arc::downgrade(delegate));
        self.entries = remaining;

        match previous {
            Some(from) => tracing::debug!(
                delegate = delegate.delegate_name(),
                from,
                to = index,
                "relocated delegate"
            ),
            None => tracing::debug!(
                delegate = delegate.delegate_name(),
                index,
                "registered delegate"
            ),
        }
        Ok(index)
    }

    /// Handle relative inserts whose anchor is the delegate itself.
    fn self_anchored<A: ?Sized>(
        &self,
        delegate: &Arc<D>,
        anchor: &Arc<A>,
    ) -> Result<Option<usize>, RegistryError> {
        if !ptr::addr_eq(Arc::as_ptr(delegate), Arc::as_ptr(anchor)) {
            return Ok(None);
        }
        self.position(anchor)
            .map(Some)
            .ok_or_else(not_found::<A>)
    }

    fn prune(&mut self) {
        self.entries.retain(|entry| entry.strong_count() > 0);
    }
}

impl<D: ?Sized> std::fmt::Debug for DelegateRegistry<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegateRegistry")
            .field("entries", &self.entries.len())
            .field("policy", &self.policy)
            .finish()
    }
}

fn position_in<D: ?Sized, A: ?Sized>(entries: &[Weak<D>], delegate: &Arc<A>) -> Option<usize> {
    entries
        .iter()
        .position(|entry| ptr::addr_eq(entry.as_ptr(), Arc::as_ptr(delegate)))
}

fn anchor_position<D: ?Sized, A: ?Sized>(
    entries: &[Weak<D>],
    anchor: &Arc<A>,
) -> Result<usize, RegistryError> {
    position_in(entries, anchor).ok_or_else(not_found::<A>)
}

fn not_found<A: ?Sized>() -> RegistryError {
    RegistryError::AnchorNotFound {
        anchor: std::any::type_name::<A>(),
    }
}
