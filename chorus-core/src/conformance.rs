//! # Conformance
//!
//! Decides whether a delegate may be registered, given the capabilities a
//! multiplexer was configured with.
//!
//! | configured capabilities | strict | rule                                   |
//! |-------------------------|--------|----------------------------------------|
//! | none                    | any    | every delegate conforms                |
//! | one                     | any    | all required methods of that one       |
//! | many                    | true   | all required methods of every one      |
//! | many                    | false  | all required methods of at least one   |

use crate::{
    capability::{Capability, CapabilityDescriptor},
    delegate::Delegate,
    error::{ConformanceError, ConformanceMode},
};

/// Whether `delegate` conforms to `descriptors` under the given mode.
pub fn conforms<D>(delegate: &D, descriptors: &[&CapabilityDescriptor], strict: bool) -> bool
where
    D: Delegate + ?Sized,
{
    if descriptors.is_empty() {
        return true;
    }
    let mut results = descriptors.iter().map(|d| delegate.conforms_to(d));
    if strict {
        results.all(|ok| ok)
    } else {
        results.any(|ok| ok)
    }
}

/// The construction-time capability configuration of a multiplexer.
///
/// Immutable once the multiplexer is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConformancePolicy {
    descriptors: Vec<&'static CapabilityDescriptor>,
    strict: bool,
}

impl Default for ConformancePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ConformancePolicy {
    /// A policy with no capabilities: every delegate conforms.
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
            strict: true,
        }
    }

    /// A policy requiring the capability of trait object type `C`.
    pub fn of<C: Capability + ?Sized>() -> Self {
        Self::new().with_capability(C::DESCRIPTOR)
    }

    /// Add a capability. Adding one twice has no effect.
    pub fn with_capability(mut self, descriptor: &'static CapabilityDescriptor) -> Self {
        if !self.descriptors.contains(&descriptor) {
            self.descriptors.push(descriptor);
        }
        self
    }

    /// Set whether every capability (`true`) or any one (`false`) must be met.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Configured capabilities, in configuration order.
    pub fn descriptors(&self) -> &[&'static CapabilityDescriptor] {
        &self.descriptors
    }

    /// Whether every configured capability must be met.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Whether `descriptor` is one of the configured capabilities.
    pub fn includes(&self, descriptor: &CapabilityDescriptor) -> bool {
        self.descriptors.iter().any(|d| *d == descriptor)
    }

    /// Check `delegate` against this policy.
    pub fn check<D>(&self, delegate: &D) -> Result<(), ConformanceError>
    where
        D: Delegate + ?Sized,
    {
        if conforms(delegate, &self.descriptors, self.strict) {
            return Ok(());
        }
        let unmet = self
            .descriptors
            .iter()
            .filter(|d| !delegate.conforms_to(d))
            .map(|d| d.name())
            .collect();
        Err(ConformanceError {
            delegate: delegate.delegate_name(),
            unmet,
            mode: if self.strict {
                ConformanceMode::All
            } else {
                ConformanceMode::Any
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{CallPattern, MethodDescriptor, Selector};

    static OBJECT: CapabilityDescriptor = CapabilityDescriptor::new(
        "ObjectDelegate",
        &[
            MethodDescriptor::required("did_something", CallPattern::Broadcast),
            MethodDescriptor::optional("return_result_optional", CallPattern::ValueReturning),
        ],
    );

    static AUDIT: CapabilityDescriptor = CapabilityDescriptor::new(
        "AuditDelegate",
        &[MethodDescriptor::required("audited", CallPattern::Broadcast)],
    );

    /// Responds to exactly the listed selectors.
    struct Scripted(&'static [Selector]);

    impl Delegate for Scripted {
        fn responds_to(&self, selector: Selector) -> bool {
            self.0.contains(&selector)
        }
    }

    const OBJECT_ONLY: Scripted = Scripted(&[Selector::new("ObjectDelegate", "did_something")]);
    const NOTHING: Scripted = Scripted(&[]);

    #[test]
    fn test_no_descriptors_accepts_everything() {
        assert!(conforms(&NOTHING, &[], true));
        assert!(ConformancePolicy::new().check(&NOTHING).is_ok());
    }

    #[test]
    fn test_single_descriptor_ignores_optional_methods() {
        assert!(conforms(&OBJECT_ONLY, &[&OBJECT], true));
        assert!(!conforms(&NOTHING, &[&OBJECT], true));
    }

    #[test]
    fn test_strict_requires_every_descriptor() {
        let policy = ConformancePolicy::new()
            .with_capability(&OBJECT)
            .with_capability(&AUDIT);
        let err = policy.check(&OBJECT_ONLY).unwrap_err();
        assert_eq!(err.unmet, vec!["AuditDelegate"]);
        assert_eq!(err.mode, ConformanceMode::All);
    }

    #[test]
    fn test_lenient_requires_any_descriptor() {
        let policy = ConformancePolicy::new()
            .with_capability(&OBJECT)
            .with_capability(&AUDIT)
            .strict(false);
        assert!(policy.check(&OBJECT_ONLY).is_ok());

        let err = policy.check(&NOTHING).unwrap_err();
        assert_eq!(err.unmet, vec!["ObjectDelegate", "AuditDelegate"]);
        assert_eq!(err.mode, ConformanceMode::Any);
    }

    #[test]
    fn test_duplicate_capability_is_ignored() {
        let policy = ConformancePolicy::new()
            .with_capability(&OBJECT)
            .with_capability(&OBJECT);
        assert_eq!(policy.descriptors().len(), 1);
        assert!(policy.includes(&OBJECT));
        assert!(!policy.includes(&AUDIT));
    }
}
