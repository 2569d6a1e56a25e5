//! # Multiplexer Facade
//!
//! [`MultiDelegate`] stands in for a single delegate while fanning every
//! call out to an ordered registry of real delegates.
//!
//! `D` is the dispatch view, usually a capability trait object such as
//! `dyn ObjectDelegate`. `#[chorus::capability]` implements the capability
//! trait for `MultiDelegate<dyn Trait>`, so the multiplexer can be handed to
//! any component that holds exactly one `Arc<dyn Trait>`:
//!
//! ```rust,ignore
//! let multi = Arc::new(MultiDelegate::<dyn ObjectDelegate>::for_capability());
//! multi.add_delegate(first.clone())?;
//! multi.add_delegate(second.clone())?;
//!
//! let object = DelegatingObject::new(multi.clone());
//! object.do_something(); // `first`, then `second`
//! ```
//!
//! # Locking
//!
//! The registry sits behind a single mutex. Dispatch copies the live
//! delegates out under the lock and invokes them after releasing it, so a
//! delegate may add or remove delegates (itself included) while being called.

use crate::{dispatch, registry::DelegateRegistry};
use chorus_core::{
    Capability, CapabilityDescriptor, ConformancePolicy, Delegate, RegistryError, Selector,
};
use std::{
    ptr,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// A delegate that forwards to many delegates.
pub struct MultiDelegate<D: ?Sized> {
    registry: Mutex<DelegateRegistry<D>>,
    policy: Arc<ConformancePolicy>,
}

impl<D: Delegate + ?Sized> Default for MultiDelegate<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Delegate + ?Sized> MultiDelegate<D> {
    /// A multiplexer without configured capabilities: any delegate may be added.
    pub fn new() -> Self {
        Self::with_policy(ConformancePolicy::new())
    }

    /// A multiplexer requiring the capability of its own dispatch view.
    pub fn for_capability() -> Self
    where
        D: Capability,
    {
        Self::with_policy(ConformancePolicy::of::<D>())
    }

    /// A multiplexer validating delegates against `policy`.
    pub fn with_policy(policy: ConformancePolicy) -> Self {
        let policy = Arc::new(policy);
        Self {
            registry: Mutex::new(DelegateRegistry::new(policy.clone())),
            policy,
        }
    }

    /// Start building a multiplexer.
    pub fn builder() -> MultiDelegateBuilder<D> {
        MultiDelegateBuilder::new()
    }

    /// Append a delegate, or move it to the end if already registered.
    pub fn add_delegate(&self, delegate: Arc<D>) -> Result<(), RegistryError> {
        self.reject_cycle(&delegate)?;
        self.lock().append(&delegate).map(drop)
    }

    /// Insert a delegate before `anchor`, relocating it if already registered.
    pub fn insert_delegate_before<A: ?Sized>(
        &self,
        delegate: Arc<D>,
        anchor: &Arc<A>,
    ) -> Result<(), RegistryError> {
        self.reject_cycle(&delegate)?;
        self.lock().insert_before(&delegate, anchor).map(drop)
    }

    /// Insert a delegate after `anchor`, relocating it if already registered.
    pub fn insert_delegate_after<A: ?Sized>(
        &self,
        delegate: Arc<D>,
        anchor: &Arc<A>,
    ) -> Result<(), RegistryError> {
        self.reject_cycle(&delegate)?;
        self.lock().insert_after(&delegate, anchor).map(drop)
    }

    /// Insert a delegate so that it ends up at `index`.
    pub fn insert_delegate_at(&self, delegate: Arc<D>, index: usize) -> Result<(), RegistryError> {
        self.reject_cycle(&delegate)?;
        self.lock().insert_at(&delegate, index).map(drop)
    }

    /// Remove a delegate. Removing an unregistered delegate does nothing.
    pub fn remove_delegate<A: ?Sized>(&self, delegate: &Arc<A>) -> bool {
        let removed = self.lock().remove(delegate);
        if removed {
            tracing::debug!(delegate = std::any::type_name::<A>(), "removed delegate");
        }
        removed
    }

    /// Remove every delegate.
    pub fn remove_all_delegates(&self) {
        self.lock().remove_all();
        tracing::debug!("removed all delegates");
    }

    /// Snapshot of the live delegates, in dispatch order.
    pub fn delegates(&self) -> Vec<Arc<D>> {
        self.lock().live_entries()
    }

    /// Number of live delegates.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no live delegate is registered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Whether `delegate` is registered and alive.
    pub fn contains<A: ?Sized>(&self, delegate: &Arc<A>) -> bool {
        self.lock().contains(delegate)
    }

    /// Position of `delegate` in dispatch order.
    pub fn position<A: ?Sized>(&self, delegate: &Arc<A>) -> Option<usize> {
        self.lock().position(delegate)
    }

    /// Configured capabilities, in configuration order.
    pub fn capabilities(&self) -> &[&'static CapabilityDescriptor] {
        self.policy.descriptors()
    }

    /// Whether delegates must satisfy every configured capability.
    pub fn is_strict(&self) -> bool {
        self.policy.is_strict()
    }

    /// Forward a call that returns nothing to every capable delegate.
    ///
    /// Returns the number of delegates invoked.
    pub fn broadcast<F>(&self, selector: Selector, invoke: F) -> usize
    where
        F: FnMut(&D),
    {
        let delegates = self.delegates();
        dispatch::broadcast(&delegates, selector, invoke)
    }

    /// Forward a call to every capable delegate and return the last result.
    ///
    /// Returns `None` when no live delegate responds to `selector`.
    pub fn call<R, F>(&self, selector: Selector, invoke: F) -> Option<R>
    where
        F: FnMut(&D) -> R,
    {
        let delegates = self.delegates();
        dispatch::call_last(&delegates, selector, invoke)
    }

    /// Refuse a delegate that is, or forwards into, this multiplexer.
    fn reject_cycle(&self, delegate: &Arc<D>) -> Result<(), RegistryError> {
        let this = ptr::from_ref(self).cast::<()>();
        if ptr::addr_eq(Arc::as_ptr(delegate), this) || delegate.reaches(this) {
            tracing::warn!(
                delegate = delegate.delegate_name(),
                "rejected delegate forwarding back into its multiplexer"
            );
            return Err(RegistryError::ForwardingCycle {
                delegate: delegate.delegate_name(),
            });
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, DelegateRegistry<D>> {
        // Delegates never run under this lock, so a poisoned registry is still consistent.
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<D: Delegate + ?Sized> Delegate for MultiDelegate<D> {
    /// True when at least one live delegate responds.
    fn responds_to(&self, selector: Selector) -> bool {
        self.delegates()
            .iter()
            .any(|delegate| delegate.responds_to(selector))
    }

    /// True for configured capabilities, otherwise when some delegate conforms.
    fn conforms_to(&self, capability: &CapabilityDescriptor) -> bool {
        self.policy.includes(capability)
            || self
                .delegates()
                .iter()
                .any(|delegate| delegate.conforms_to(capability))
    }

    fn reaches(&self, target: *const ()) -> bool {
        self.delegates().iter().any(|delegate| {
            ptr::addr_eq(Arc::as_ptr(delegate), target) || delegate.reaches(target)
        })
    }
}

impl<D: ?Sized> std::fmt::Debug for MultiDelegate<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiDelegate")
            .field("registry", &self.registry)
            .finish()
    }
}

/// Builder for constructing a [`MultiDelegate`].
///
/// # Example
/// ```ignore
/// let multi = MultiDelegate::<dyn ObjectDelegate>::builder()
///     .capability(<dyn ObjectDelegate as Capability>::DESCRIPTOR)
///     .capability(<dyn AuditDelegate as Capability>::DESCRIPTOR)
///     .strict(false)
///     .delegate(listener)
///     .build()?;
/// ```
pub struct MultiDelegateBuilder<D: ?Sized> {
    policy: ConformancePolicy,
    delegates: Vec<Arc<D>>,
}

impl<D: Delegate + ?Sized> Default for MultiDelegateBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Delegate + ?Sized> MultiDelegateBuilder<D> {
    /// Create a builder with no capabilities and no delegates.
    pub fn new() -> Self {
        Self {
            policy: ConformancePolicy::new(),
            delegates: Vec::new(),
        }
    }

    /// Require a capability.
    pub fn capability(mut self, descriptor: &'static CapabilityDescriptor) -> Self {
        self.policy = self.policy.with_capability(descriptor);
        self
    }

    /// Require the capability of trait object type `C`.
    pub fn adopting<C: Capability + ?Sized>(self) -> Self {
        self.capability(C::DESCRIPTOR)
    }

    /// Require every (`true`, the default) or any one (`false`) capability.
    pub fn strict(mut self, strict: bool) -> Self {
        self.policy = self.policy.strict(strict);
        self
    }

    /// Register a delegate when the multiplexer is built.
    pub fn delegate(mut self, delegate: Arc<D>) -> Self {
        self.delegates.push(delegate);
        self
    }

    /// Register several delegates when the multiplexer is built.
    pub fn delegates<I>(mut self, delegates: I) -> Self
    where
        I: IntoIterator<Item = Arc<D>>,
    {
        self.delegates.extend(delegates);
        self
    }

    /// Build the multiplexer, registering the initial delegates in order.
    ///
    /// Fails with the first delegate that does not conform.
    pub fn build(self) -> Result<MultiDelegate<D>, RegistryError> {
        let multi = MultiDelegate::with_policy(self.policy);
        for delegate in self.delegates {
            multi.add_delegate(delegate)?;
        }
        Ok(multi)
    }
}
