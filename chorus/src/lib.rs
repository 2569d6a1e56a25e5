//! # chorus - One Delegate Slot, Many Delegates
//!
//! Components that report to a single delegate hold one `Arc<dyn Trait>`.
//! A [`MultiDelegate`] fills that slot and forwards every call to an ordered
//! list of weakly held delegates, each of which only receives the methods it
//! actually implements.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chorus::prelude::*;
//! use std::sync::Arc;
//!
//! #[chorus::capability]
//! pub trait ObjectDelegate {
//!     fn did_something(&self);
//!     fn return_result(&self) -> i64;
//!     fn did_something_optional(&self) {}
//! }
//!
//! #[derive(Delegate)]
//! #[adopts(ObjectDelegate)]
//! struct Listener;
//!
//! #[chorus::adopt]
//! impl ObjectDelegate for Listener {
//!     fn did_something(&self) {}
//!     fn return_result(&self) -> i64 { 42 }
//! }
//!
//! let listener = Arc::new(Listener);
//! let multi = Arc::new(MultiDelegate::<dyn ObjectDelegate>::for_capability());
//! multi.add_delegate(listener.clone())?;
//!
//! let slot: Arc<dyn ObjectDelegate> = multi;
//! assert_eq!(slot.return_result(), 42);
//! ```
//!
//! ## Delivery rules
//!
//! - Delegates are called in registry order.
//! - Methods returning `()` reach every delegate that implements them.
//! - Other methods return the value of the last delegate that implements
//!   them, or `Default::default()` when none does.
//! - The multiplexer never keeps a delegate alive; dropped delegates are
//!   skipped and pruned.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use chorus_core::{
    // Capabilities
    Adopts,
    CallPattern,
    Capability,
    CapabilityDescriptor,
    // Conformance
    ConformanceError,
    ConformanceMode,
    ConformancePolicy,
    // Delegates
    Delegate,
    MethodDescriptor,
    // Errors
    RegistryError,
    Requirement,
    Selector,
    conforms,
};

pub use chorus_std::{DelegateRegistry, MultiDelegate, MultiDelegateBuilder};

/// Low-level forwarding over a snapshot of delegates.
pub mod dispatch {
    pub use chorus_std::dispatch::{broadcast, call_last};
}

/// Testing utilities.
pub mod testing {
    pub use chorus_std::testing::{Call, CallLog};
}

/// Prelude module - common imports for Chorus.
///
/// # Usage
///
/// ```rust,ignore
/// use chorus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Capability, ConformancePolicy, Delegate, MultiDelegate, RegistryError, Selector,
    };

    #[cfg(feature = "macros")]
    pub use crate::{adopt, capability};
}

#[cfg(feature = "macros")]
pub use chorus_macros::{Delegate, adopt, capability};
