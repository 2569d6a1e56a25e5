//! Error types for Chorus.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`RegistryError`] - Top-level error type for registry mutations
//! - [`ConformanceError`] - A delegate failed the capability check

use std::fmt;
use thiserror::Error;

/// How many configured capabilities a delegate had to satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConformanceMode {
    /// Every configured capability (strict).
    All,
    /// At least one configured capability.
    Any,
}

impl fmt::Display for ConformanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConformanceMode::All => f.write_str("all of"),
            ConformanceMode::Any => f.write_str("any of"),
        }
    }
}

/// A delegate does not implement the capabilities the multiplexer requires.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("delegate `{delegate}` does not conform to {mode} {}", .unmet.join(", "))]
pub struct ConformanceError {
    /// Type name of the rejected delegate.
    pub delegate: &'static str,
    /// Capabilities whose required methods the delegate lacks.
    pub unmet: Vec<&'static str>,
    /// Whether every configured capability had to be satisfied.
    pub mode: ConformanceMode,
}

/// Errors that can occur while mutating a delegate registry.
///
/// The registry is left unchanged whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The delegate failed the conformance check.
    #[error(transparent)]
    Conformance(#[from] ConformanceError),

    /// The anchor of a relative insert is not registered.
    #[error("anchor delegate `{anchor}` is not registered")]
    AnchorNotFound {
        /// Type name of the anchor.
        anchor: &'static str,
    },

    /// The delegate forwards, directly or through nested multiplexers, back
    /// into the multiplexer it was added to.
    #[error("delegate `{delegate}` would forward calls back into its own multiplexer")]
    ForwardingCycle {
        /// Type name of the rejected delegate.
        delegate: &'static str,
    },

    /// An absolute insert position is past the end of the registry.
    #[error("index {index} is out of range for a registry of {len} delegates")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The largest valid position.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conformance_message_strict() {
        let err = ConformanceError {
            delegate: "Listener",
            unmet: vec!["ObjectDelegate", "AuditDelegate"],
            mode: ConformanceMode::All,
        };
        assert_eq!(
            err.to_string(),
            "delegate `Listener` does not conform to all of ObjectDelegate, AuditDelegate"
        );
    }

    #[test]
    fn test_registry_error_wraps_conformance() {
        let err: RegistryError = ConformanceError {
            delegate: "Listener",
            unmet: vec!["ObjectDelegate"],
            mode: ConformanceMode::Any,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "delegate `Listener` does not conform to any of ObjectDelegate"
        );
    }

    #[test]
    fn test_forwarding_cycle_message() {
        let err = RegistryError::ForwardingCycle {
            delegate: "MultiDelegate<dyn ObjectDelegate>",
        };
        assert_eq!(
            err.to_string(),
            "delegate `MultiDelegate<dyn ObjectDelegate>` would forward calls back into its own multiplexer"
        );
    }
}
