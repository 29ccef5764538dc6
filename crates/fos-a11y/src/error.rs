//! Audit errors

use fos_dom::SelectorError;
use thiserror::Error;

/// Error raised by a single rule
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid selector: {0}")]
    InvalidSelector(#[from] SelectorError),

    #[error("rule failed: {0}")]
    Failed(String),
}

/// Error raised by the registry or a scan
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("rule `{rule}` failed")]
    RuleFailed {
        rule: String,
        #[source]
        source: RuleError,
    },

    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("rule `{0}` is already registered")]
    DuplicateRule(String),

    #[error("violation channel is bounded (capacity {0}); reporting needs an unbounded channel")]
    BoundedChannel(usize),
}
