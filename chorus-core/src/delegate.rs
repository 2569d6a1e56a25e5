//! # Delegate
//!
//! The runtime face of a delegate: which selectors it responds to.
//!
//! Rust has no reflection, so "does this object implement that method" is
//! answered by the delegate itself. Usually the answer is generated:
//!
//! ```rust,ignore
//! #[derive(Delegate)]
//! #[adopts(ObjectDelegate)]
//! struct Listener;
//!
//! #[chorus::adopt]
//! impl ObjectDelegate for Listener {
//!     fn did_something(&self) {}
//!     fn return_result(&self) -> i64 { 1 }
//! }
//! ```
//!
//! Here `Listener` responds to the two required methods of `ObjectDelegate`
//! but to none of its optional ones.

use crate::{capability::CapabilityDescriptor, selector::Selector};

/// An object that can be registered with a multiplexer.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Delegate`",
    label = "missing `Delegate` implementation",
    note = "Derive it with `#[derive(Delegate)]` and list the adopted capabilities in `#[adopts(..)]`."
)]
pub trait Delegate: Send + Sync + 'static {
    /// Whether this delegate implements the method named by `selector`.
    fn responds_to(&self, selector: Selector) -> bool;

    /// Whether this delegate implements every required method of `capability`.
    fn conforms_to(&self, capability: &CapabilityDescriptor) -> bool {
        capability
            .required()
            .all(|method| self.responds_to(capability.selector(method)))
    }

    /// Whether the allocation at `target` receives calls forwarded by this
    /// delegate.
    ///
    /// Only multiplexers forward, so only they override this.
    fn reaches(&self, target: *const ()) -> bool {
        let _ = target;
        false
    }

    /// Human-readable identity used in errors and logs.
    fn delegate_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
