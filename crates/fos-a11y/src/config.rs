//! Audit Configuration

/// Audit configuration options
#[derive(Debug, Clone, PartialEq)]
pub struct AuditConfig {
    /// Smallest acceptable width and height of a touch target (CSS px)
    pub min_target_size: f64,

    /// Contrast ratio required for normal text
    pub min_contrast_ratio: f64,

    /// Contrast ratio required for large text
    pub large_text_contrast_ratio: f64,

    /// Built-in rules left out of the default registry
    pub disabled_rules: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            min_target_size: 24.0,
            min_contrast_ratio: 4.5,
            large_text_contrast_ratio: 3.0,
            disabled_rules: Vec::new(),
        }
    }
}

impl AuditConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// WCAG AAA contrast thresholds (7:1, large text 4.5:1)
    pub fn wcag_aaa() -> Self {
        Self::default().with_contrast_ratios(7.0, 4.5)
    }

    pub fn with_min_target_size(mut self, px: f64) -> Self {
        self.min_target_size = px;
        self
    }

    pub fn with_contrast_ratios(mut self, normal: f64, large: f64) -> Self {
        self.min_contrast_ratio = normal;
        self.large_text_contrast_ratio = large;
        self
    }

    pub fn with_disabled_rule(mut self, id: impl Into<String>) -> Self {
        self.disabled_rules.push(id.into());
        self
    }

    /// Check if a rule is disabled
    pub fn is_disabled(&self, id: &str) -> bool {
        self.disabled_rules.iter().any(|r| r == id)
    }
}
