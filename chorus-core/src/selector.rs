//! Method identity and forwarding-table entries.

use std::fmt;

/// Identifies one method of one capability.
///
/// Selectors are the runtime half of the forwarding table: the multiplexer
/// asks each delegate whether it [responds to](crate::Delegate::responds_to)
/// a selector before forwarding the call.
///
/// # Example
///
/// ```rust
/// use chorus_core::Selector;
///
/// let selector = Selector::new("ObjectDelegate", "did_something");
/// assert_eq!(selector.to_string(), "ObjectDelegate::did_something");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector {
    capability: &'static str,
    method: &'static str,
}

impl Selector {
    /// Create a selector for `method` of `capability`.
    pub const fn new(capability: &'static str, method: &'static str) -> Self {
        Self { capability, method }
    }

    /// Name of the capability that declares the method.
    pub const fn capability(&self) -> &'static str {
        self.capability
    }

    /// Name of the method.
    pub const fn method(&self) -> &'static str {
        self.method
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.capability, self.method)
    }
}

/// Whether a delegate adopting a capability must implement a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requirement {
    /// Checked at registration time.
    Required,
    /// May be absent; dispatch skips delegates that lack it.
    Optional,
}

/// How a forwarded call produces its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallPattern {
    /// Nothing is returned; every capable delegate is invoked.
    Broadcast,
    /// Every capable delegate is invoked; the last one's value is returned.
    ValueReturning,
}

/// One entry of a capability's forwarding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    name: &'static str,
    requirement: Requirement,
    pattern: CallPattern,
}

impl MethodDescriptor {
    /// Describe a required method.
    pub const fn required(name: &'static str, pattern: CallPattern) -> Self {
        Self {
            name,
            requirement: Requirement::Required,
            pattern,
        }
    }

    /// Describe an optional method.
    pub const fn optional(name: &'static str, pattern: CallPattern) -> Self {
        Self {
            name,
            requirement: Requirement::Optional,
            pattern,
        }
    }

    /// The method name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the method is required or optional.
    pub const fn requirement(&self) -> Requirement {
        self.requirement
    }

    /// Whether the method broadcasts or returns a value.
    pub const fn pattern(&self) -> CallPattern {
        self.pattern
    }

    /// Shorthand for `requirement() == Requirement::Required`.
    pub const fn is_required(&self) -> bool {
        matches!(self.requirement, Requirement::Required)
    }
}
