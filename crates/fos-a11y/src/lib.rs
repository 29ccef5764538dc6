//! fOS Accessibility
//!
//! Accessibility auditing for the fOS DOM.
//!
//! Features:
//! - querySelectorAll across open shadow roots
//! - aria-labelledby resolution and accessible names
//! - Rule registry and async scanner
//! - Bulk and streaming violation reports

pub mod aria;
pub mod config;
pub mod contrast;
pub mod error;
pub mod label;
pub mod registry;
pub mod report;
pub mod rule;
pub mod rules;
pub mod scanner;
pub mod traverse;
pub mod view;

pub use aria::{AriaRole, implicit_role, role_of};
pub use config::AuditConfig;
pub use contrast::{Color, ContrastChecker};
pub use error::{AuditError, RuleError};
pub use label::{accessible_name, labelled_by_is_valid};
pub use registry::RuleRegistry;
pub use report::{
    ChannelReporter, Collector, EventDispatcher, EventReporter, NullReporter, Reporter, ScanReport,
    ViolationEvent,
};
pub use rule::{Rule, RuleSet, Violation, help_url};
pub use scanner::Scanner;
pub use traverse::{query_all, query_all_inclusive, query_all_inclusive_with, query_all_with};
pub use view::DomView;

pub use fos_dom::NodeId;

/// Scan `root` with the built-in rules and default configuration
pub async fn scan(dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, AuditError> {
    Scanner::default().scan(dom, root).await
}
