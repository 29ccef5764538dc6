//! Text alternative rules
//!
//! Each of these flags a visible element that ends up without an
//! accessible name.

use super::{candidates, flag, input_type, is_hidden};
use crate::aria::AriaRole;
use crate::error::RuleError;
use crate::label::accessible_name;
use crate::rule::Violation;
use crate::view::{DomView, has_non_empty_attribute};
use fos_dom::NodeId;

fn explicit_role(dom: &dyn DomView, node: NodeId) -> Option<AriaRole> {
    dom.attribute(node, "role")
        .and_then(AriaRole::from_attribute)
}

/// Visible candidates with no accessible name
fn unnamed(
    dom: &dyn DomView,
    root: NodeId,
    selector: &str,
    applies: impl Fn(NodeId) -> bool,
) -> Result<Vec<NodeId>, RuleError> {
    Ok(candidates(dom, root, selector)?
        .into_iter()
        .filter(|&node| {
            applies(node) && !is_hidden(dom, node) && accessible_name(dom, node).is_none()
        })
        .collect())
}

/// `<img>` needs `alt`, a name, or a presentational role
pub fn image_alt(dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
    let nodes = unnamed(dom, root, "img", |img| {
        dom.attribute(img, "alt").is_none()
            && explicit_role(dom, img) != Some(AriaRole::Presentation)
    })?;
    Ok(flag(nodes, "image-alt", "Images must have alternate text"))
}

pub fn input_image_alt(dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
    let nodes = unnamed(dom, root, "input", |input| {
        input_type(dom, input) == "image"
    })?;
    Ok(flag(
        nodes,
        "input-image-alt",
        "Image buttons must have alternate text",
    ))
}

pub fn svg_img_alt(dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
    let nodes = unnamed(dom, root, "svg", |svg| {
        explicit_role(dom, svg) == Some(AriaRole::Img)
    })?;
    Ok(flag(
        nodes,
        "svg-img-alt",
        "svg elements with an img role must have an alternative text",
    ))
}

/// `role="img"` on anything but `<svg>` and `<img>`
pub fn role_img_alt(dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
    let nodes = unnamed(dom, root, "[role]:not(svg):not(img)", |node| {
        explicit_role(dom, node) == Some(AriaRole::Img)
    })?;
    Ok(flag(
        nodes,
        "role-img-alt",
        "[role=\"img\"] elements must have an alternative text",
    ))
}

pub fn button_name(dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
    let nodes = unnamed(dom, root, "button, input, [role]", |node| match dom.tag_name(node) {
        Some("button") => true,
        Some("input") if is_button_input(dom, node) => true,
        _ => explicit_role(dom, node) == Some(AriaRole::Button),
    })?;
    Ok(flag(
        nodes,
        "button-name",
        "Buttons must have discernible text",
    ))
}

fn is_button_input(dom: &dyn DomView, input: NodeId) -> bool {
    let kind = input_type(dom, input);
    matches!(kind.as_str(), "button" | "submit" | "reset")
}

pub fn link_name(dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
    let nodes = unnamed(dom, root, "a[href], [role]", |node| {
        (dom.tag_name(node) == Some("a") && dom.attribute(node, "href").is_some())
            || explicit_role(dom, node) == Some(AriaRole::Link)
    })?;
    Ok(flag(nodes, "link-name", "Links must have discernible text"))
}

pub fn frame_title(dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
    let nodes = unnamed(dom, root, "iframe, frame", |_| true)?;
    Ok(flag(
        nodes,
        "frame-title",
        "Frames must have an accessible name",
    ))
}

/// Form fields need a label; a placeholder also counts
pub fn label(dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
    let nodes = unnamed(dom, root, "input, select, textarea", |field| {
        let labelable = dom.tag_name(field) != Some("input")
            || !matches!(
                input_type(dom, field).as_str(),
                "hidden" | "button" | "submit" | "reset" | "image"
            );
        labelable && !has_non_empty_attribute(dom, field, "placeholder")
    })?;
    Ok(flag(nodes, "label", "Form elements must have labels"))
}

pub fn empty_heading(dom: &dyn DomView, root: NodeId) -> Result<Vec<Violation>, RuleError> {
    let nodes = unnamed(dom, root, "h1, h2, h3, h4, h5, h6, [role]", |node| {
        let tag = dom.tag_name(node);
        matches!(tag, Some("h1" | "h2" | "h3" | "h4" | "h5" | "h6"))
            || explicit_role(dom, node) == Some(AriaRole::Heading)
    })?;
    Ok(flag(nodes, "empty-heading", "Headings should not be empty"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::DomTree;

    fn el(tree: &mut DomTree, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = tree.create_element(tag);
        for (name, value) in attrs {
            tree.set_attribute(id, name, value).unwrap();
        }
        tree.append_child(parent, id).unwrap();
        id
    }

    fn text(tree: &mut DomTree, parent: NodeId, data: &str) {
        let id = tree.create_text(data);
        tree.append_child(parent, id).unwrap();
    }

    fn flagged(violations: Vec<Violation>) -> Vec<NodeId> {
        violations.into_iter().map(|v| v.element).collect()
    }

    #[test]
    fn test_image_alt() {
        let mut tree = DomTree::new();
        let root = el(&mut tree, NodeId::ROOT, "div", &[]);
        let bare = el(&mut tree, root, "img", &[("src", "a.png")]);
        el(&mut tree, root, "img", &[("alt", "")]);
        el(&mut tree, root, "img", &[("role", "presentation")]);
        el(&mut tree, root, "img", &[("aria-label", "Chart")]);
        el(&mut tree, root, "img", &[("hidden", "")]);

        assert_eq!(flagged(image_alt(&tree, root).unwrap()), vec![bare]);
    }

    #[test]
    fn test_svg_and_role_img() {
        let mut tree = DomTree::new();
        let root = el(&mut tree, NodeId::ROOT, "div", &[]);
        let svg = el(&mut tree, root, "svg", &[("role", "img")]);
        let span = el(&mut tree, root, "span", &[("role", "img")]);
        el(&mut tree, root, "svg", &[]);

        assert_eq!(flagged(svg_img_alt(&tree, root).unwrap()), vec![svg]);
        assert_eq!(flagged(role_img_alt(&tree, root).unwrap()), vec![span]);

        tree.set_attribute(svg, "aria-label", "x").unwrap();
        assert!(svg_img_alt(&tree, root).unwrap().is_empty());
    }

    #[test]
    fn test_button_and_link_names() {
        let mut tree = DomTree::new();
        let root = el(&mut tree, NodeId::ROOT, "div", &[]);
        let empty_button = el(&mut tree, root, "button", &[]);
        let named = el(&mut tree, root, "button", &[]);
        text(&mut tree, named, "Save");
        let empty_reset = el(&mut tree, root, "input", &[("type", "button")]);
        el(&mut tree, root, "input", &[("type", "submit")]);
        let fake = el(&mut tree, root, "div", &[("role", "button")]);
        let link = el(&mut tree, root, "a", &[("href", "/")]);
        el(&mut tree, root, "a", &[]);
        let titled = el(&mut tree, root, "a", &[("href", "/"), ("title", "Home")]);

        assert_eq!(
            flagged(button_name(&tree, root).unwrap()),
            vec![empty_button, empty_reset, fake]
        );
        assert_eq!(flagged(link_name(&tree, root).unwrap()), vec![link]);
        assert!(!flagged(link_name(&tree, root).unwrap()).contains(&titled));
    }

    #[test]
    fn test_form_labels() {
        let mut tree = DomTree::new();
        let root = el(&mut tree, NodeId::ROOT, "form", &[]);
        let bare = el(&mut tree, root, "input", &[]);
        el(&mut tree, root, "input", &[("type", "hidden")]);
        el(&mut tree, root, "input", &[("placeholder", "Search")]);
        el(&mut tree, root, "textarea", &[("aria-label", "Comment")]);
        let select = el(&mut tree, root, "select", &[]);
        let lbl = el(&mut tree, root, "label", &[("for", "email")]);
        text(&mut tree, lbl, "Email");
        el(&mut tree, root, "input", &[("id", "email")]);

        assert_eq!(flagged(label(&tree, root).unwrap()), vec![bare, select]);
    }

    #[test]
    fn test_frames_and_headings() {
        let mut tree = DomTree::new();
        let root = el(&mut tree, NodeId::ROOT, "div", &[]);
        let frame = el(&mut tree, root, "iframe", &[("src", "/ad")]);
        el(&mut tree, root, "iframe", &[("title", "Map")]);
        let empty = el(&mut tree, root, "h2", &[]);
        let full = el(&mut tree, root, "h3", &[]);
        text(&mut tree, full, "Intro");
        let aria = el(&mut tree, root, "div", &[("role", "heading")]);

        assert_eq!(flagged(frame_title(&tree, root).unwrap()), vec![frame]);
        let headings = empty_heading(&tree, root).unwrap();
        assert_eq!(flagged(headings), vec![empty, aria]);
    }
}
