//! Built-in Rules
//!
//! Every rule checks the root itself as well as its descendants and
//! reports offending elements in document order.

mod names;
mod structure;
mod visual;

pub use names::{
    button_name, empty_heading, frame_title, image_alt, input_image_alt, label, link_name,
    role_img_alt, svg_img_alt,
};
pub use structure::{aria_roles, blink, duplicate_id, html_has_lang, marquee};
pub use visual::{ColorContrast, TargetSize};

use crate::config::AuditConfig;
use crate::error::RuleError;
use crate::rule::{Rule, Violation, help_url};
use crate::traverse::query_all_inclusive;
use crate::view::{DomView, composed_parent_element};
use fos_dom::NodeId;
use std::sync::Arc;

/// Built-in rules in registration order
pub fn builtin(config: &AuditConfig) -> Vec<(&'static str, Arc<dyn Rule>)> {
    vec![
        entry("duplicate-id", duplicate_id),
        entry("marquee", marquee),
        entry("blink", blink),
        entry("html-has-lang", html_has_lang),
        entry("image-alt", image_alt),
        entry("input-image-alt", input_image_alt),
        entry("svg-img-alt", svg_img_alt),
        entry("role-img-alt", role_img_alt),
        entry("button-name", button_name),
        entry("link-name", link_name),
        entry("frame-title", frame_title),
        entry("label", label),
        entry("empty-heading", empty_heading),
        entry("aria-roles", aria_roles),
        entry("target-size", TargetSize::new(config.min_target_size)),
        entry(
            "color-contrast",
            ColorContrast::new(config.min_contrast_ratio, config.large_text_contrast_ratio),
        ),
    ]
}

fn entry(id: &'static str, rule: impl Rule + 'static) -> (&'static str, Arc<dyn Rule>) {
    let rule: Arc<dyn Rule> = Arc::new(rule);
    (id, rule)
}

/// Root and descendants matching `selector`
fn candidates(dom: &dyn DomView, root: NodeId, selector: &str) -> Result<Vec<NodeId>, RuleError> {
    Ok(query_all_inclusive(dom, selector, root)?)
}

/// One violation per node
fn flag(nodes: impl IntoIterator<Item = NodeId>, rule_id: &str, text: &str) -> Vec<Violation> {
    let url = help_url(rule_id);
    nodes
        .into_iter()
        .map(|node| Violation::new(text, url.clone(), node))
        .collect()
}

/// Check if an element is hidden from users
///
/// Hidden means `display: none` (including the `hidden` attribute) or
/// `aria-hidden="true"` on the element or a composed ancestor, or a
/// computed `visibility` of `hidden` or `collapse`.
pub fn is_hidden(dom: &dyn DomView, element: NodeId) -> bool {
    let visibility = dom
        .computed_style(element, "visibility")
        .map(|v| v.to_ascii_lowercase());
    if matches!(visibility.as_deref(), Some("hidden" | "collapse")) {
        return true;
    }
    let mut current = Some(element);
    while let Some(node) = current {
        let display = dom.computed_style(node, "display");
        if dom.attribute(node, "aria-hidden") == Some("true")
            || display.is_some_and(|d| d.eq_ignore_ascii_case("none"))
        {
            return true;
        }
        current = composed_parent_element(dom, node);
    }
    false
}

/// Lowercase `type` of an input, defaulting to text
fn input_type(dom: &dyn DomView, input: NodeId) -> String {
    dom.attribute(input, "type")
        .map(|t| t.trim().to_ascii_lowercase())
        .unwrap_or_else(|| "text".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::{DomTree, ShadowRootMode};

    #[test]
    fn test_builtin_order() {
        let ids: Vec<_> = builtin(&AuditConfig::default())
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids.len(), 16);
        assert_eq!(ids[0], "duplicate-id");
        assert_eq!(ids[14], "target-size");
        assert_eq!(ids[15], "color-contrast");
    }

    #[test]
    fn test_hidden_detection() {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        tree.append_child(NodeId::ROOT, body).unwrap();

        let shown = tree.create_element("p");
        tree.append_child(body, shown).unwrap();
        let attr_hidden = tree.create_element("p");
        tree.set_attribute(attr_hidden, "hidden", "").unwrap();
        tree.append_child(body, attr_hidden).unwrap();
        let invisible = tree.create_element("p");
        tree.set_attribute(invisible, "style", "visibility: hidden")
            .unwrap();
        tree.append_child(body, invisible).unwrap();

        let host = tree.create_element("x-panel");
        tree.set_attribute(host, "aria-hidden", "true").unwrap();
        tree.append_child(body, host).unwrap();
        let shadow = tree.attach_shadow(host, ShadowRootMode::Open).unwrap();
        let inside = tree.create_element("button");
        tree.append_child(shadow, inside).unwrap();

        assert!(!is_hidden(&tree, shown));
        assert!(is_hidden(&tree, attr_hidden));
        assert!(is_hidden(&tree, invisible));
        assert!(is_hidden(&tree, inside));
    }
}
