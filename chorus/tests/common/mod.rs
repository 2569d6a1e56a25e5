#![allow(dead_code)]

use chorus::{Delegate, testing::CallLog};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Test Capabilities
// ============================================================================

#[chorus::capability]
pub trait ObjectDelegate {
    fn did_something(&self);
    fn return_result(&self) -> i64;

    fn did_something_optional(&self) {}
    fn return_result_optional(&self) -> i64 {
        0
    }
}

#[chorus::capability]
pub trait AuditDelegate {
    fn audit(&self, trail: &mut Vec<&'static str>);

    fn severity(&self) -> u8 {
        0
    }
}

// ============================================================================
// Test Delegates
// ============================================================================

/// Implements every method of `ObjectDelegate`.
#[derive(Delegate)]
#[adopts(ObjectDelegate)]
pub struct FullDelegate {
    pub label: &'static str,
    pub result: i64,
    pub log: CallLog,
}

impl FullDelegate {
    pub fn new(label: &'static str, result: i64, log: &CallLog) -> Arc<Self> {
        Arc::new(Self {
            label,
            result,
            log: log.clone(),
        })
    }
}

#[chorus::adopt]
impl ObjectDelegate for FullDelegate {
    fn did_something(&self) {
        self.log.record(self.label, <dyn ObjectDelegate>::DID_SOMETHING);
    }

    fn return_result(&self) -> i64 {
        self.log.record(self.label, <dyn ObjectDelegate>::RETURN_RESULT);
        self.result
    }

    fn did_something_optional(&self) {
        self.log
            .record(self.label, <dyn ObjectDelegate>::DID_SOMETHING_OPTIONAL);
    }

    fn return_result_optional(&self) -> i64 {
        self.log
            .record(self.label, <dyn ObjectDelegate>::RETURN_RESULT_OPTIONAL);
        self.result * 10
    }
}

/// Implements only the required methods of `ObjectDelegate`.
#[derive(Delegate)]
#[adopts(ObjectDelegate)]
pub struct RequiredOnlyDelegate {
    pub label: &'static str,
    pub result: i64,
    pub log: CallLog,
}

impl RequiredOnlyDelegate {
    pub fn new(label: &'static str, result: i64, log: &CallLog) -> Arc<Self> {
        Arc::new(Self {
            label,
            result,
            log: log.clone(),
        })
    }
}

#[chorus::adopt]
impl ObjectDelegate for RequiredOnlyDelegate {
    fn did_something(&self) {
        self.log.record(self.label, <dyn ObjectDelegate>::DID_SOMETHING);
    }

    fn return_result(&self) -> i64 {
        self.log.record(self.label, <dyn ObjectDelegate>::RETURN_RESULT);
        self.result
    }
}

/// Implements `ObjectDelegate` but claims to respond to nothing.
pub struct SilentDelegate {
    pub calls: AtomicUsize,
}

impl SilentDelegate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

impl Delegate for SilentDelegate {
    fn responds_to(&self, _selector: chorus::Selector) -> bool {
        false
    }
}

impl ObjectDelegate for SilentDelegate {
    fn did_something(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn return_result(&self) -> i64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        -1
    }
}

/// Implements `AuditDelegate` only.
#[derive(Delegate)]
#[adopts(AuditDelegate)]
pub struct Auditor {
    pub label: &'static str,
    pub severity: u8,
}

#[chorus::adopt]
impl AuditDelegate for Auditor {
    fn audit(&self, trail: &mut Vec<&'static str>) {
        trail.push(self.label);
    }

    fn severity(&self) -> u8 {
        self.severity
    }
}

/// Implements both capabilities.
#[derive(Delegate)]
#[adopts(ObjectDelegate, AuditDelegate)]
pub struct Omni {
    pub label: &'static str,
    pub log: CallLog,
}

#[chorus::adopt]
impl ObjectDelegate for Omni {
    fn did_something(&self) {
        self.log.record(self.label, <dyn ObjectDelegate>::DID_SOMETHING);
    }

    fn return_result(&self) -> i64 {
        7
    }
}

#[chorus::adopt]
impl AuditDelegate for Omni {
    fn audit(&self, trail: &mut Vec<&'static str>) {
        trail.push(self.label);
    }
}

// ============================================================================
// Delegating Object
// ============================================================================

/// A component with a single delegate slot.
///
/// Optional methods are only called when the delegate responds to them,
/// which is how components treat optional delegate methods.
pub struct DelegatingObject {
    delegate: Arc<dyn ObjectDelegate>,
}

impl DelegatingObject {
    pub fn new(delegate: Arc<dyn ObjectDelegate>) -> Self {
        Self { delegate }
    }

    pub fn do_something(&self) {
        self.delegate.did_something();
    }

    pub fn need_result(&self) -> i64 {
        self.delegate.return_result()
    }

    pub fn do_something_optional(&self) -> bool {
        if !self
            .delegate
            .responds_to(<dyn ObjectDelegate>::DID_SOMETHING_OPTIONAL)
        {
            return false;
        }
        self.delegate.did_something_optional();
        true
    }

    pub fn need_result_optional(&self) -> Option<i64> {
        self.delegate
            .responds_to(<dyn ObjectDelegate>::RETURN_RESULT_OPTIONAL)
            .then(|| self.delegate.return_result_optional())
    }
}
