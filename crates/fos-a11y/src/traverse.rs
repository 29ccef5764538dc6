//! Traversal
//!
//! querySelectorAll that also descends into open shadow roots.
//!
//! Order is pre-order depth-first: an element is tested first, then the
//! contents of its open shadow root, then its light children. The walk uses
//! an explicit stack so deeply nested shadow trees cannot exhaust the call
//! stack.

use crate::view::DomView;
use fos_dom::{NodeId, Selector, SelectorError, SelectorTarget};
use std::collections::HashSet;

/// Adapter letting selectors match nodes of any view
struct ViewElement<'a> {
    dom: &'a dyn DomView,
    node: NodeId,
    tag: &'a str,
}

impl SelectorTarget for ViewElement<'_> {
    fn local_name(&self) -> &str {
        self.tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.dom.attribute(self.node, name)
    }
}

/// Check if an element matches a selector
pub fn matches(dom: &dyn DomView, node: NodeId, selector: &Selector) -> bool {
    let Some(tag) = dom.tag_name(node) else {
        return false;
    };
    selector.matches(&ViewElement { dom, node, tag })
}

/// All descendants of `root` matching `selector`, across open shadow roots
///
/// `root` itself is never tested. A root that is not an element yields an
/// empty list.
pub fn query_all(
    dom: &dyn DomView,
    selector: &str,
    root: NodeId,
) -> Result<Vec<NodeId>, SelectorError> {
    let selector = Selector::parse(selector)?;
    Ok(query_all_with(dom, &selector, root))
}

/// Like [`query_all`], but also tests `root` and puts it first when it matches
pub fn query_all_inclusive(
    dom: &dyn DomView,
    selector: &str,
    root: NodeId,
) -> Result<Vec<NodeId>, SelectorError> {
    let selector = Selector::parse(selector)?;
    Ok(query_all_inclusive_with(dom, &selector, root))
}

/// [`query_all_inclusive`] with a pre-parsed selector
pub fn query_all_inclusive_with(
    dom: &dyn DomView,
    selector: &Selector,
    root: NodeId,
) -> Vec<NodeId> {
    let mut found = Vec::new();
    if matches(dom, root, selector) {
        found.push(root);
    }
    found.extend(query_all_with(dom, selector, root));
    found
}

/// [`query_all`] with a pre-parsed selector
pub fn query_all_with(dom: &dyn DomView, selector: &Selector, root: NodeId) -> Vec<NodeId> {
    let mut found = Vec::new();
    if !dom.is_element(root) {
        return found;
    }

    let mut visited = HashSet::new();
    visited.insert(root);
    let mut stack = Vec::new();
    push_children(dom, root, &mut stack);

    while let Some(node) = stack.pop() {
        if !visited.insert(node) || !dom.is_element(node) {
            continue;
        }
        if matches(dom, node, selector) {
            found.push(node);
        }
        push_children(dom, node, &mut stack);
    }

    found
}

/// Queue light children, then shadow children on top so they pop first
fn push_children(dom: &dyn DomView, node: NodeId, stack: &mut Vec<NodeId>) {
    stack.extend(dom.children(node).into_iter().rev());
    if let Some(shadow) = dom.shadow_root(node) {
        stack.extend(dom.children(shadow).into_iter().rev());
    }
}
