//! Rule Contract
//!
//! A rule inspects the subtree under a root and returns the violations it
//! finds. Rules are pure: they read the DOM through [`DomView`], keep no
//! state between calls, and may run concurrently against the same tree.

use crate::error::RuleError;
use crate::view::DomView;
use fos_dom::NodeId;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Base of the help URL attached to every built-in violation
pub const HELP_URL_BASE: &str = "https://dequeuniversity.com/rules/axe/4.8/";

/// Help URL for a rule id
pub fn help_url(rule_id: &str) -> String {
    format!("{HELP_URL_BASE}{rule_id}")
}

/// One accessibility problem found on one element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Violation {
    /// Human-readable description
    pub text: String,
    /// Help page for the rule
    pub url: String,
    /// Offending element
    pub element: NodeId,
}

impl Violation {
    pub fn new(text: impl Into<String>, url: impl Into<String>, element: NodeId) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
            element,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) at {}", self.text, self.url, self.element)
    }
}

/// Accessibility rule
pub trait Rule: Send + Sync {
    /// Check the subtree under `root`
    ///
    /// An empty vector means no violations.
    fn check(&self, dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError>;
}

impl<F> Rule for F
where
    F: Fn(&dyn DomView, NodeId) -> Result<Vec<Violation>, RuleError> + Send + Sync,
{
    fn check(&self, dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
        self(dom, root)
    }
}

/// Ordered list of rules to run
#[derive(Clone, Default)]
pub struct RuleSet {
    entries: Vec<(String, Arc<dyn Rule>)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule
    pub fn push(&mut self, id: impl Into<String>, rule: Arc<dyn Rule>) {
        self.entries.push((id.into(), rule));
    }

    /// Rules in run order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Rule)> {
        self.entries
            .iter()
            .map(|(id, rule)| (id.as_str(), rule.as_ref()))
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Arc<dyn Rule>> {
        self.entries.get(index).map(|(_, rule)| rule)
    }

    /// Rule ids in run order
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|(id, _)| id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet").field("ids", &self.ids()).finish()
    }
}
