//! # chorus-std
//!
//! Standard implementations for the Chorus delegate multiplexer.
//!
//! This crate provides:
//! - **Registry**: [`DelegateRegistry`], the ordered, non-owning store
//! - **Dispatch**: [`dispatch::broadcast`] and [`dispatch::call_last`]
//! - **Facade**: [`MultiDelegate`] and its [`MultiDelegateBuilder`]
//! - **Testing**: [`testing::CallLog`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use chorus_core;

// Modules
pub mod dispatch;
pub mod multi;
pub mod registry;
pub mod testing;

pub use multi::{MultiDelegate, MultiDelegateBuilder};
pub use registry::DelegateRegistry;
