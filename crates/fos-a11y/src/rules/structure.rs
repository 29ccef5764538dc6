//! Document structure rules

use super::{candidates, flag};
use crate::aria::AriaRole;
use crate::error::RuleError;
use crate::rule::Violation;
use crate::view::{DomView, has_non_empty_attribute};
use fos_dom::NodeId;
use std::collections::HashMap;

/// Ids repeated within one tree scope; every occurrence is reported
pub fn duplicate_id(dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
    let nodes = candidates(dom, root, "[id]")?;

    let mut counts: HashMap<(NodeId, &str), usize> = HashMap::new();
    for &node in &nodes {
        if let Some(id) = dom.attribute(node, "id").filter(|id| !id.is_empty()) {
            *counts.entry((dom.root_node(node), id)).or_default() += 1;
        }
    }

    let duplicates = nodes.iter().copied().filter(|&node| {
        dom.attribute(node, "id")
            .and_then(|id| counts.get(&(dom.root_node(node), id)))
            .is_some_and(|&count| count > 1)
    });
    Ok(flag(duplicates, "duplicate-id", "IDs must be unique"))
}

pub fn marquee(dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
    let nodes = candidates(dom, root, "marquee")?;
    Ok(flag(
        nodes,
        "marquee",
        "<marquee> elements are deprecated and must not be used",
    ))
}

pub fn blink(dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
    let nodes = candidates(dom, root, "blink")?;
    Ok(flag(
        nodes,
        "blink",
        "<blink> elements are deprecated and must not be used",
    ))
}

/// `<html>` without a non-empty `lang` (or `xml:lang`)
pub fn html_has_lang(dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
    let missing = candidates(dom, root, "html")?.into_iter().filter(|&html| {
        !has_non_empty_attribute(dom, html, "lang")
            && !has_non_empty_attribute(dom, html, "xml:lang")
    });
    Ok(flag(
        missing,
        "html-has-lang",
        "<html> element must have a lang attribute",
    ))
}

/// `role` attributes naming no valid role
pub fn aria_roles(dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
    let invalid = candidates(dom, root, "[role]")?.into_iter().filter(|&node| {
        dom.attribute(node, "role").is_some_and(|role| {
            !role.trim().is_empty() && AriaRole::from_attribute(role).is_none()
        })
    });
    Ok(flag(
        invalid,
        "aria-roles",
        "ARIA roles used must conform to valid values",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::{DomTree, ShadowRootMode};

    fn el(tree: &mut DomTree, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = tree.create_element(tag);
        for (name, value) in attrs {
            tree.set_attribute(id, name, value).unwrap();
        }
        tree.append_child(parent, id).unwrap();
        id
    }

    #[test]
    fn test_duplicate_ids_every_occurrence() {
        let mut tree = DomTree::new();
        let root = el(&mut tree, NodeId::ROOT, "div", &[]);
        let a = el(&mut tree, root, "div", &[("id", "foo")]);
        let b = el(&mut tree, root, "span", &[("id", "foo")]);
        el(&mut tree, root, "p", &[("id", "bar")]);

        let found = duplicate_id(&tree, root).unwrap();
        let elements: Vec<_> = found.iter().map(|v| v.element).collect();
        assert_eq!(elements, vec![a, b]);
        assert!(found.iter().all(|v| v.text == "IDs must be unique"));
        assert_eq!(
            found[0].url,
            "https://dequeuniversity.com/rules/axe/4.8/duplicate-id"
        );
    }

    #[test]
    fn test_duplicate_ids_are_per_tree_scope() {
        let mut tree = DomTree::new();
        let root = el(&mut tree, NodeId::ROOT, "div", &[]);
        el(&mut tree, root, "div", &[("id", "x")]);
        let host = el(&mut tree, root, "x-widget", &[]);
        let shadow = tree.attach_shadow(host, ShadowRootMode::Open).unwrap();
        el(&mut tree, shadow, "div", &[("id", "x")]);

        assert!(duplicate_id(&tree, root).unwrap().is_empty());

        el(&mut tree, shadow, "span", &[("id", "x")]);
        assert_eq!(duplicate_id(&tree, root).unwrap().len(), 2);
    }

    #[test]
    fn test_deprecated_elements_include_root() {
        let mut tree = DomTree::new();
        let outer = el(&mut tree, NodeId::ROOT, "marquee", &[]);
        el(&mut tree, outer, "blink", &[]);

        assert_eq!(marquee(&tree, outer).unwrap()[0].element, outer);
        assert_eq!(blink(&tree, outer).unwrap().len(), 1);
    }

    #[test]
    fn test_html_lang_and_roles() {
        let mut tree = DomTree::new();
        let html = el(&mut tree, NodeId::ROOT, "html", &[("lang", " ")]);
        let body = el(&mut tree, html, "body", &[]);
        el(&mut tree, body, "div", &[("role", "button")]);
        let bogus = el(&mut tree, body, "div", &[("role", "buton")]);
        el(&mut tree, body, "div", &[("role", "")]);

        assert_eq!(html_has_lang(&tree, html).unwrap()[0].element, html);
        let roles = aria_roles(&tree, html).unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].element, bogus);

        tree.set_attribute(html, "lang", "en").unwrap();
        assert!(html_has_lang(&tree, html).unwrap().is_empty());
    }
}
