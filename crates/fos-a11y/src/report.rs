//! Reporting
//!
//! A scan delivers violations twice: in bulk as its return value, and one
//! at a time to a [`Reporter`] while it runs. Both see the same sequence.

use crate::error::AuditError;
use crate::rule::Violation;
use fos_dom::NodeId;
use serde::Serialize;
use smol::channel::{Receiver, Sender};

/// Receives violations as a scan finds them
pub trait Reporter {
    fn report(&mut self, violation: &Violation);
}

impl<F> Reporter for F
where
    F: FnMut(&Violation),
{
    fn report(&mut self, violation: &Violation) {
        self(violation)
    }
}

/// Reporter that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _violation: &Violation) {}
}

/// Reporter that keeps every violation
#[derive(Debug, Default, Clone)]
pub struct Collector {
    violations: Vec<Violation>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl Reporter for Collector {
    fn report(&mut self, violation: &Violation) {
        self.violations.push(violation.clone());
    }
}

/// Reporter forwarding violations into an unbounded channel
///
/// Reporting never waits, so a bounded channel could only keep up by
/// dropping violations; those are rejected up front. A closed receiver is
/// not an error; the violation is dropped.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    sender: Sender<Violation>,
}

impl ChannelReporter {
    /// Wrap the sending half of an unbounded channel
    pub fn new(sender: Sender<Violation>) -> Result<Self, AuditError> {
        match sender.capacity() {
            None => Ok(Self { sender }),
            Some(capacity) => Err(AuditError::BoundedChannel(capacity)),
        }
    }

    /// Reporter plus the receiving half of a fresh channel
    pub fn unbounded() -> (Self, Receiver<Violation>) {
        let (sender, receiver) = smol::channel::unbounded();
        (Self { sender }, receiver)
    }
}

impl Reporter for ChannelReporter {
    fn report(&mut self, violation: &Violation) {
        if self.sender.try_send(violation.clone()).is_err() {
            tracing::debug!("Violation receiver closed, dropping {}", violation);
        }
    }
}

/// Violation wrapped as a DOM-style event
#[derive(Debug, Clone, PartialEq)]
pub struct ViolationEvent {
    /// The violation
    pub error: Violation,
    /// Node the event is dispatched at
    pub target: NodeId,
    pub bubbles: bool,
}

impl ViolationEvent {
    /// Event type name
    pub const TYPE: &'static str = "a11y-violation";

    pub fn new(error: Violation, target: NodeId) -> Self {
        Self {
            error,
            target,
            bubbles: true,
        }
    }
}

/// Event dispatcher trait
pub trait EventDispatcher {
    fn dispatch_event(&mut self, event: ViolationEvent) -> bool;
}

/// Reporter that dispatches one bubbling event per violation
#[derive(Debug)]
pub struct EventReporter<D> {
    dispatcher: D,
    target: NodeId,
}

impl<D: EventDispatcher> EventReporter<D> {
    /// Dispatch at `target`, usually the document node
    pub fn new(dispatcher: D, target: NodeId) -> Self {
        Self { dispatcher, target }
    }

    /// Dispatch at the document node
    pub fn at_document(dispatcher: D) -> Self {
        Self::new(dispatcher, NodeId::ROOT)
    }

    pub fn into_inner(self) -> D {
        self.dispatcher
    }
}

impl<D: EventDispatcher> Reporter for EventReporter<D> {
    fn report(&mut self, violation: &Violation) {
        let event = ViolationEvent::new(violation.clone(), self.target);
        if !self.dispatcher.dispatch_event(event) {
            tracing::trace!(
                "{} event for {} was not handled",
                ViolationEvent::TYPE,
                violation.element
            );
        }
    }
}

/// Serializable result of one scan
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanReport {
    /// Source of the scanned document
    pub url: String,
    /// Rules that ran, in order
    pub rules: Vec<String>,
    pub violations: Vec<Violation>,
}

impl ScanReport {
    pub fn new(url: impl Into<String>, rules: Vec<String>, violations: Vec<Violation>) -> Self {
        Self {
            url: url.into(),
            rules,
            violations,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
