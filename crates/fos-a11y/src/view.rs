//! DOM View
//!
//! The read-only surface rules are written against. Anything that can answer
//! these questions about a node tree can be audited; [`DomTree`] is the
//! in-process implementation.

use fos_dom::{DOMRect, DomTree, NodeId};

/// Read-only view of a DOM
///
/// Views are shared by every rule of a scan, so they must be `Sync`.
pub trait DomView: Sync {
    /// Check if `node` exists and is an element
    fn is_element(&self, node: NodeId) -> bool;

    /// Lowercase local name of an element
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    /// Attribute value of an element
    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Children in tree order (shadow trees excluded)
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Parent node; may be a shadow root or the document
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Host element of a shadow root
    fn host(&self, shadow_root: NodeId) -> Option<NodeId>;

    /// Open shadow root of a host; closed roots are not visible
    fn shadow_root(&self, host: NodeId) -> Option<NodeId>;

    /// Root of the node tree containing `node`
    fn root_node(&self, node: NodeId) -> NodeId;

    /// Data of a text node
    fn text(&self, node: NodeId) -> Option<&str>;

    /// Concatenated descendant text
    fn text_content(&self, node: NodeId) -> String;

    /// Computed value of a CSS property
    fn computed_style(&self, node: NodeId, property: &str) -> Option<String>;

    /// Bounding box, if the element renders one
    fn bounding_rect(&self, node: NodeId) -> Option<DOMRect>;

    /// Element with the given id in the tree scope of `context`
    fn element_by_id(&self, context: NodeId, id: &str) -> Option<NodeId>;
}

impl DomView for DomTree {
    fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.local_name.as_str())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        DomTree::attribute(self, node, name)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        DomTree::children(self, node).map(|(id, _)| id).collect()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        DomTree::parent(self, node)
    }

    fn host(&self, shadow_root: NodeId) -> Option<NodeId> {
        DomTree::host(self, shadow_root)
    }

    fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.open_shadow_root(host)
    }

    fn root_node(&self, node: NodeId) -> NodeId {
        DomTree::root_node(self, node)
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.get(node)?.as_text()
    }

    fn text_content(&self, node: NodeId) -> String {
        DomTree::text_content(self, node)
    }

    fn computed_style(&self, node: NodeId, property: &str) -> Option<String> {
        DomTree::computed_style(self, node, property)
    }

    fn bounding_rect(&self, node: NodeId) -> Option<DOMRect> {
        self.bounding_client_rect(node)
    }

    fn element_by_id(&self, context: NodeId, id: &str) -> Option<NodeId> {
        self.get_element_by_id(context, id)
    }
}

/// Nearest element ancestor, stepping out of shadow roots to their hosts
pub fn composed_parent_element(dom: &dyn DomView, node: NodeId) -> Option<NodeId> {
    let mut current = dom.parent(node)?;
    loop {
        if dom.is_element(current) {
            return Some(current);
        }
        current = match dom.host(current) {
            Some(host) => host,
            None => dom.parent(current)?,
        };
    }
}

/// Check for a non-empty (after trimming) attribute
pub fn has_non_empty_attribute(dom: &dyn DomView, node: NodeId, name: &str) -> bool {
    dom.attribute(node, name)
        .is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::ShadowRootMode;

    #[test]
    fn test_view_hides_closed_roots() {
        let mut tree = DomTree::new();
        let open = tree.create_element("x-open");
        let closed = tree.create_element("x-closed");
        let open_root = tree.attach_shadow(open, ShadowRootMode::Open).unwrap();
        tree.attach_shadow(closed, ShadowRootMode::Closed).unwrap();

        let dom: &dyn DomView = &tree;
        assert_eq!(dom.shadow_root(open), Some(open_root));
        assert_eq!(dom.shadow_root(closed), None);
    }

    #[test]
    fn test_composed_parent_element() {
        let mut tree = DomTree::new();
        let host = tree.create_element("div");
        tree.append_child(tree.root(), host).unwrap();
        let root = tree.attach_shadow(host, ShadowRootMode::Open).unwrap();
        let inner = tree.create_element("span");
        tree.append_child(root, inner).unwrap();

        assert_eq!(composed_parent_element(&tree, inner), Some(host));
        assert_eq!(composed_parent_element(&tree, host), None);
    }

    #[test]
    fn test_non_empty_attribute() {
        let mut tree = DomTree::new();
        let img = tree.create_element("img");
        tree.set_attribute(img, "alt", "   ").unwrap();
        tree.set_attribute(img, "title", "Cat").unwrap();

        assert!(!has_non_empty_attribute(&tree, img, "alt"));
        assert!(has_non_empty_attribute(&tree, img, "title"));
        assert!(!has_non_empty_attribute(&tree, img, "aria-label"));
    }
}
