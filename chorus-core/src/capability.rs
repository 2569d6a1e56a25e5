//! # Capability Descriptors
//!
//! A capability is a named set of required and optional methods, the Rust
//! counterpart of a delegate protocol. Capability traits annotated with
//! `#[chorus::capability]` get a static [`CapabilityDescriptor`] through the
//! [`Capability`] trait, implemented on the trait object type:
//!
//! ```rust,ignore
//! #[chorus::capability]
//! pub trait ObjectDelegate: Delegate {
//!     fn did_something(&self);
//!     fn return_result_optional(&self) -> i64 { 0 }
//! }
//!
//! let descriptor = <dyn ObjectDelegate as Capability>::DESCRIPTOR;
//! assert_eq!(descriptor.name(), "ObjectDelegate");
//! ```

use crate::selector::{MethodDescriptor, Selector};

/// The forwarding table of one capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityDescriptor {
    name: &'static str,
    methods: &'static [MethodDescriptor],
}

impl CapabilityDescriptor {
    /// Create a descriptor from its name and method table.
    pub const fn new(name: &'static str, methods: &'static [MethodDescriptor]) -> Self {
        Self { name, methods }
    }

    /// The capability name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Every method, in declaration order.
    pub const fn methods(&self) -> &'static [MethodDescriptor] {
        self.methods
    }

    /// Methods a conforming delegate must implement.
    pub fn required(&self) -> impl Iterator<Item = &'static MethodDescriptor> + use<> {
        self.methods.iter().filter(|m| m.is_required())
    }

    /// Methods a conforming delegate may leave out.
    pub fn optional(&self) -> impl Iterator<Item = &'static MethodDescriptor> + use<> {
        self.methods.iter().filter(|m| !m.is_required())
    }

    /// Look up a method by name.
    pub fn method(&self, name: &str) -> Option<&'static MethodDescriptor> {
        self.methods.iter().find(|m| m.name() == name)
    }

    /// The selector for `method` of this capability.
    pub const fn selector(&self, method: &MethodDescriptor) -> Selector {
        Selector::new(self.name, method.name())
    }

    /// Whether `selector` names a method of this capability.
    pub fn declares(&self, selector: Selector) -> bool {
        selector.capability() == self.name && self.method(selector.method()).is_some()
    }
}

/// Links a capability trait object type to its descriptor.
///
/// Implemented by `#[chorus::capability]` for `dyn Trait`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a capability",
    label = "missing `Capability` implementation",
    note = "Annotate the trait with `#[chorus::capability]`."
)]
pub trait Capability {
    /// The static forwarding table.
    const DESCRIPTOR: &'static CapabilityDescriptor;
}

/// The methods a concrete delegate type implements for capability `C`.
///
/// Implemented by `#[chorus::adopt]` on `impl Trait for Type` blocks; the
/// list is exactly the set of methods the impl block defines, so optional
/// methods left to the trait's default body are absent.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not adopt `{C}`",
    label = "missing `Adopts` implementation",
    note = "Annotate the capability impl block with `#[chorus::adopt]`."
)]
pub trait Adopts<C: Capability + ?Sized> {
    /// Names of the implemented methods.
    const METHODS: &'static [&'static str];

    /// Whether this adoption covers `selector`.
    fn adopts_selector(selector: Selector) -> bool {
        selector.capability() == C::DESCRIPTOR.name() && Self::METHODS.contains(&selector.method())
    }
}
