//! Visual rules
//!
//! These depend on geometry and colors, so they are configurable.

use super::{candidates, flag, input_type, is_hidden};
use crate::aria::AriaRole;
use crate::contrast::{Color, ContrastChecker, is_large_text, resolve_background};
use crate::error::RuleError;
use crate::rule::{Rule, Violation};
use crate::view::DomView;
use fos_dom::NodeId;

/// Touch targets must be at least `min_size` px in both dimensions
///
/// Only targets with a known, non-empty box are measured.
#[derive(Debug, Clone, Copy)]
pub struct TargetSize {
    pub min_size: f64,
}

impl TargetSize {
    pub fn new(min_size: f64) -> Self {
        Self { min_size }
    }

    fn is_target(dom: &dyn DomView, node: NodeId) -> bool {
        match dom.tag_name(node) {
            Some("a") => dom.attribute(node, "href").is_some(),
            Some("button" | "select" | "textarea" | "summary") => true,
            Some("input") => input_type(dom, node) != "hidden",
            _ => dom
                .attribute(node, "role")
                .and_then(AriaRole::from_attribute)
                .is_some_and(|role| role.is_widget()),
        }
    }
}

impl Rule for TargetSize {
    fn check(&self, dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
        let small = candidates(dom, root, "*")?.into_iter().filter(|&node| {
            if !Self::is_target(dom, node) || is_hidden(dom, node) {
                return false;
            }
            dom.bounding_rect(node)
                .filter(|rect| !rect.is_empty())
                .is_some_and(|rect| {
                    rect.width < self.min_size || rect.height < self.min_size
                })
        });
        Ok(flag(
            small,
            "target-size",
            "Ensure touch target have sufficient size and space",
        ))
    }
}

/// Text must contrast with its background
///
/// Only elements with their own text and a known foreground color are
/// checked. Disabled controls are exempt.
#[derive(Debug, Clone, Copy)]
pub struct ColorContrast {
    pub min_ratio: f64,
    pub large_text_ratio: f64,
}

impl ColorContrast {
    pub fn new(min_ratio: f64, large_text_ratio: f64) -> Self {
        Self {
            min_ratio,
            large_text_ratio,
        }
    }

    /// Contrast ratio of an element's text, if it can be determined
    pub fn ratio(dom: &dyn DomView, element: NodeId) -> Option<f64> {
        let foreground = Color::parse(&dom.computed_style(element, "color")?)?;
        let background = resolve_background(dom, element);
        let blended = foreground.over(background);
        Some(ContrastChecker::ratio_between(blended, background))
    }

    fn has_own_text(dom: &dyn DomView, element: NodeId) -> bool {
        dom.children(element)
            .into_iter()
            .any(|child| {
                dom.text(child)
                    .is_some_and(|t| !t.trim().is_empty())
            })
    }
}

impl Rule for ColorContrast {
    fn check(&self, dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
        let low = candidates(dom, root, "*")?.into_iter().filter(|&node| {
            if !Self::has_own_text(dom, node)
                || dom.attribute(node, "disabled").is_some()
                || is_hidden(dom, node)
            {
                return false;
            }
            let required = if is_large_text(dom, node) {
                self.large_text_ratio
            } else {
                self.min_ratio
            };
            Self::ratio(dom, node).is_some_and(|ratio| ratio < required)
        });
        Ok(flag(
            low,
            "color-contrast",
            "Elements must meet minimum color contrast ratio thresholds",
        ))
    }
}
