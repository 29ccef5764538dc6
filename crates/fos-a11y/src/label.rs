//! Label Resolution
//!
//! Resolves `aria-labelledby` references and computes accessible names.
//! References are looked up in the tree scope of the referring element, so
//! an id never resolves across a shadow boundary.

use crate::aria::role_of;
use crate::view::{DomView, has_non_empty_attribute};
use fos_dom::NodeId;
use std::collections::HashSet;

/// Check that `aria-labelledby` on `element` resolves to some text
///
/// False when the attribute is missing or blank, or when none of the
/// referenced ids resolves to non-empty text. Cyclic references never
/// contribute text.
pub fn labelled_by_is_valid(dom: &dyn DomView, element: NodeId) -> bool {
    labelled_by_text(dom, element).is_some()
}

/// Text `aria-labelledby` on `element` resolves to
pub fn labelled_by_text(dom: &dyn DomView, element: NodeId) -> Option<String> {
    let ids = dom.attribute(element, "aria-labelledby")?;
    if ids.trim().is_empty() {
        return None;
    }
    LabelChain::new(element).resolve_references(dom, element, ids)
}

/// Nodes already visited by one resolution
struct LabelChain {
    visited: HashSet<NodeId>,
}

impl LabelChain {
    fn new(start: NodeId) -> Self {
        Self {
            visited: HashSet::from([start]),
        }
    }

    fn resolve_references(
        &mut self,
        dom: &dyn DomView,
        context: NodeId,
        ids: &str,
    ) -> Option<String> {
        let parts: Vec<String> = ids
            .split_ascii_whitespace()
            .filter_map(|id| dom.element_by_id(context, id))
            .filter_map(|node| self.resolve_node(dom, node))
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    fn resolve_node(&mut self, dom: &dyn DomView, node: NodeId) -> Option<String> {
        if !self.visited.insert(node) {
            return None;
        }
        if let Some(ids) = dom.attribute(node, "aria-labelledby") {
            if let Some(text) = self.resolve_references(dom, node, ids) {
                return Some(text);
            }
        }
        if let Some(label) = non_empty(dom.attribute(node, "aria-label")) {
            return Some(label);
        }
        non_empty(Some(dom.text_content(node).as_str()))
    }
}

/// Accessible name of an element
///
/// Sources in order: `aria-labelledby`, `aria-label`, the native text
/// alternative of the element, then `title`.
pub fn accessible_name(dom: &dyn DomView, element: NodeId) -> Option<String> {
    if !dom.is_element(element) {
        return None;
    }
    labelled_by_text(dom, element)
        .or_else(|| non_empty(dom.attribute(element, "aria-label")))
        .or_else(|| native_name(dom, element))
        .or_else(|| non_empty(dom.attribute(element, "title")))
}

fn native_name(dom: &dyn DomView, element: NodeId) -> Option<String> {
    let tag = dom.tag_name(element)?;
    match tag {
        "img" | "area" => return non_empty(dom.attribute(element, "alt")),
        "svg" => return svg_title(dom, element),
        "input" => {
            let input_type = dom
                .attribute(element, "type")
                .unwrap_or("text")
                .to_ascii_lowercase();
            match input_type.as_str() {
                "image" => return non_empty(dom.attribute(element, "alt")),
                "button" | "submit" | "reset" => {
                    return non_empty(dom.attribute(element, "value")).or(match input_type.as_str() {
                        "submit" => Some("Submit".to_string()),
                        "reset" => Some("Reset".to_string()),
                        _ => None,
                    });
                }
                _ => return label_text(dom, element),
            }
        }
        "select" | "textarea" | "meter" | "progress" | "output" => return label_text(dom, element),
        _ => {}
    }

    if role_of(dom, element).is_some_and(|role| role.allows_name_from_content()) {
        return content_name(dom, element);
    }
    None
}

/// Text of the `<title>` child of an svg
fn svg_title(dom: &dyn DomView, svg: NodeId) -> Option<String> {
    dom.children(svg)
        .into_iter()
        .find(|&child| dom.tag_name(child) == Some("title"))
        .and_then(|title| non_empty(Some(dom.text_content(title).as_str())))
}

/// Text of `<label>` elements associated with a form field
///
/// Both `<label for=id>` in the same tree scope and a wrapping `<label>`
/// count.
pub fn label_text(dom: &dyn DomView, field: NodeId) -> Option<String> {
    let mut parts = Vec::new();

    if let Some(id) = dom.attribute(field, "id").filter(|id| !id.is_empty()) {
        let scope = dom.root_node(field);
        let mut stack = dom.children(scope);
        stack.reverse();
        while let Some(node) = stack.pop() {
            if !dom.is_element(node) {
                continue;
            }
            if dom.tag_name(node) == Some("label") && dom.attribute(node, "for") == Some(id) {
                parts.extend(content_name(dom, node));
            }
            let start = stack.len();
            stack.extend(dom.children(node));
            stack[start..].reverse();
        }
    }

    let mut ancestor = dom.parent(field);
    while let Some(node) = ancestor {
        if dom.tag_name(node) == Some("label") {
            if dom.attribute(node, "for").is_none() {
                parts.extend(content_name(dom, node));
            }
            break;
        }
        ancestor = dom.parent(node);
    }

    (!parts.is_empty()).then(|| parts.join(" "))
}

/// Name computed from the light-tree content of an element
///
/// Text nodes contribute their data; `aria-hidden` subtrees contribute
/// nothing; embedded images and labelled elements contribute their own
/// name instead of their content.
fn content_name(dom: &dyn DomView, element: NodeId) -> Option<String> {
    let mut out = String::new();
    let mut stack = dom.children(element);
    stack.reverse();

    while let Some(node) = stack.pop() {
        if let Some(text) = dom.text(node) {
            out.push_str(text);
            continue;
        }
        if !dom.is_element(node) || dom.attribute(node, "aria-hidden") == Some("true") {
            continue;
        }
        if has_non_empty_attribute(dom, node, "aria-label") {
            let label = dom.attribute(node, "aria-label").unwrap_or_default();
            push_word(&mut out, label);
            continue;
        }
        match dom.tag_name(node) {
            Some("img") | Some("area") => {
                push_word(&mut out, dom.attribute(node, "alt").unwrap_or_default());
                continue;
            }
            Some("svg") => {
                push_word(&mut out, &svg_title(dom, node).unwrap_or_default());
                continue;
            }
            _ => {}
        }
        let start = stack.len();
        stack.extend(dom.children(node));
        stack[start..].reverse();
    }

    non_empty(Some(out.as_str()))
}

fn push_word(out: &mut String, word: &str) {
    if word.trim().is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(word.trim());
}

/// Collapse whitespace; blank strings are absent
fn non_empty(value: Option<&str>) -> Option<String> {
    let collapsed = value?.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}
