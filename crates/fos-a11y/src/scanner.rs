//! Scanner
//!
//! Runs rules over a subtree. Every call is independent: a scanner holds
//! only its registry and keeps no state between scans.

use crate::config::AuditConfig;
use crate::error::AuditError;
use crate::registry::RuleRegistry;
use crate::report::{NullReporter, Reporter};
use crate::rule::{RuleSet, Violation};
use crate::view::DomView;
use fos_dom::NodeId;
use std::time::Instant;

/// Accessibility scanner
#[derive(Debug, Clone)]
pub struct Scanner {
    registry: RuleRegistry,
}

impl Scanner {
    /// Scanner over an explicit registry
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Scanner over the built-in rules
    pub fn with_config(config: &AuditConfig) -> Self {
        Self::new(RuleRegistry::with_defaults(config))
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Run every registered rule
    pub async fn scan(
        &self,
        dom: &dyn DomView,
        root: NodeId,
    ) -> Result<Vec<Violation>, AuditError> {
        self.scan_with(dom, root, self.registry.rules(), &mut NullReporter)
            .await
    }

    /// Run the named rules, in the given order
    pub async fn scan_rules<S: AsRef<str>>(
        &self,
        dom: &dyn DomView,
        root: NodeId,
        ids: &[S],
    ) -> Result<Vec<Violation>, AuditError> {
        let rules = self.registry.select(ids)?;
        self.scan_with(dom, root, &rules, &mut NullReporter).await
    }

    /// Run `rules` in order, streaming each violation to `reporter`
    ///
    /// The reporter sees every violation before the scan resolves, in the
    /// same order as the returned list. A failing rule aborts the scan.
    pub async fn scan_with(
        &self,
        dom: &dyn DomView,
        root: NodeId,
        rules: &RuleSet,
        reporter: &mut dyn Reporter,
    ) -> Result<Vec<Violation>, AuditError> {
        let start = Instant::now();
        let mut violations = Vec::new();

        for (id, rule) in rules.iter() {
            let found = rule.check(dom, root).map_err(|source| {
                tracing::warn!("Rule {} failed: {}", id, source);
                AuditError::RuleFailed {
                    rule: id.to_string(),
                    source,
                }
            })?;
            tracing::debug!("Rule {} found {} violations", id, found.len());

            for violation in found {
                reporter.report(&violation);
                violations.push(violation);
            }
            smol::future::yield_now().await;
        }

        tracing::info!(
            "Scanned {} with {} rules: {} violations in {:?}",
            root,
            rules.len(),
            violations.len(),
            start.elapsed()
        );
        Ok(violations)
    }

    /// Blocking [`Scanner::scan`]
    pub fn scan_blocking(
        &self,
        dom: &dyn DomView,
        root: NodeId,
    ) -> Result<Vec<Violation>, AuditError> {
        smol::block_on(self.scan(dom, root))
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::with_config(&AuditConfig::default())
    }
}
