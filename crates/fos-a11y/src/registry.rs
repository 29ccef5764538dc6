//! Rule Registry
//!
//! Explicit id -> rule mapping, enumerable in registration order.

use crate::config::AuditConfig;
use crate::error::AuditError;
use crate::rule::{Rule, RuleSet};
use crate::rules;
use std::collections::HashMap;
use std::sync::Arc;

/// Registered rules
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: RuleSet,
    index: HashMap<String, usize>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in rules not disabled by `config`
    pub fn with_defaults(config: &AuditConfig) -> Self {
        let mut registry = Self::new();
        for (id, rule) in rules::builtin(config) {
            if config.is_disabled(id) {
                tracing::debug!("Skipping disabled rule {}", id);
                continue;
            }
            let registered = registry.register(id, rule);
            debug_assert!(
                registered.is_ok(),
                "built-in rule ids collide: {registered:?}"
            );
        }
        registry
    }

    /// Register a rule under a new id
    pub fn register(
        &mut self,
        id: impl Into<String>,
        rule: Arc<dyn Rule>,
    ) -> Result<(), AuditError> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(AuditError::DuplicateRule(id));
        }
        self.index.insert(id.clone(), self.rules.len());
        self.rules.push(id, rule);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&dyn Rule> {
        self.entry(id).map(|rule| rule.as_ref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Registered ids in registration order
    pub fn ids(&self) -> Vec<&str> {
        self.rules.ids()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every registered rule, in registration order
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The named rules in the given order
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Result<RuleSet, AuditError> {
        let mut set = RuleSet::new();
        for id in ids {
            let id = id.as_ref();
            let rule = self
                .entry(id)
                .ok_or_else(|| AuditError::UnknownRule(id.to_string()))?;
            set.push(id, Arc::clone(rule));
        }
        Ok(set)
    }

    fn entry(&self, id: &str) -> Option<&Arc<dyn Rule>> {
        self.index.get(id).and_then(|&index| self.rules.get(index))
    }
}
