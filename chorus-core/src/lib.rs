//! # chorus-core
//!
//! Core traits for the Chorus delegate multiplexer.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! crates that declare capabilities or implement delegates without needing
//! the registry and dispatch machinery of `chorus-std`.
//!
//! # Vocabulary
//!
//! ## Capabilities ([`CapabilityDescriptor`], [`Capability`])
//!
//! A capability is a named set of required and optional methods. Its
//! descriptor is a static forwarding table: for every method, whether it is
//! required and whether calls broadcast or return a value.
//!
//! ## Selectors ([`Selector`])
//!
//! A `(capability, method)` pair. Selectors are how the multiplexer asks a
//! delegate whether it implements a method before forwarding a call.
//!
//! ## Delegates ([`Delegate`], [`Adopts`])
//!
//! Anything registered with a multiplexer. A delegate answers
//! [`responds_to`](Delegate::responds_to) for every selector; [`Adopts`]
//! records, per capability, which methods a concrete type implements.
//!
//! ## Conformance ([`ConformancePolicy`], [`conforms`])
//!
//! The registration-time check of a delegate against the configured
//! capabilities, strict (all) or lenient (any).
//!
//! # Error Types
//!
//! - [`RegistryError`] - Errors from registry mutations
//! - [`ConformanceError`] - A delegate failed the capability check

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod capability;
mod conformance;
mod delegate;
mod error;
mod selector;

// Re-exports
pub use capability::{Adopts, Capability, CapabilityDescriptor};
pub use conformance::{ConformancePolicy, conforms};
pub use delegate::Delegate;
pub use error::{ConformanceError, ConformanceMode, RegistryError};
pub use selector::{CallPattern, MethodDescriptor, Requirement, Selector};
