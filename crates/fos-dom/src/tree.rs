//! DOM Tree (arena-based allocation)

use crate::geometry::parse_px;
use crate::shadow::can_host_shadow;
use crate::style::{default_display, is_inherited_property};
use crate::{
    DOMRect, DomError, ElementData, InlineStyle, Node, NodeData, NodeId, ShadowRootData,
    ShadowRootMode,
};

/// Arena-based DOM tree for memory efficiency
///
/// Slot 0 always holds the document node.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    // --- Construction ---

    /// Create a detached element
    pub fn create_element(&mut self, local_name: &str) -> NodeId {
        self.push(Node::element(local_name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    /// Append `child` as the last child of `parent`, detaching it first if needed
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_node = self.get(parent).ok_or(DomError::InvalidNode(parent))?;
        if matches!(parent_node.data, NodeData::Text(_) | NodeData::Comment(_)) {
            return Err(DomError::NotAnElement(parent));
        }
        let child_node = self.get(child).ok_or(DomError::InvalidNode(child))?;
        if matches!(
            child_node.data,
            NodeData::Document | NodeData::ShadowRoot(_)
        ) {
            return Err(DomError::NotAnElement(child));
        }

        // Parent must not live inside child
        let mut current = Some(parent);
        while let Some(id) = current {
            if id == child {
                return Err(DomError::CycleDetected { parent, child });
            }
            current = self.composed_parent(id);
        }

        self.detach(child);

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
        Ok(())
    }

    /// Remove a node from its parent
    pub fn detach(&mut self, child: NodeId) {
        let Some(node) = self.get(child) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[child.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Attach a shadow root to `host`, returning the root's ID
    pub fn attach_shadow(
        &mut self,
        host: NodeId,
        mode: ShadowRootMode,
    ) -> Result<NodeId, DomError> {
        let elem = self.element(host).ok_or(DomError::NotAnElement(host))?;
        if elem.shadow_root.is_valid() {
            return Err(DomError::ShadowRootAlreadyAttached(host));
        }
        if !can_host_shadow(&elem.local_name) {
            return Err(DomError::ShadowRootNotSupported(elem.local_name.clone()));
        }

        let root = self.push(Node::shadow_root(ShadowRootData::new(host, mode)));
        if let Some(elem) = self.nodes[host.index()].as_element_mut() {
            elem.shadow_root = root;
        }
        tracing::trace!("Attached {:?} shadow root {} to {}", mode, root, host);
        Ok(root)
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let node = self.get_mut(id).ok_or(DomError::InvalidNode(id))?;
        let elem = node.as_element_mut().ok_or(DomError::NotAnElement(id))?;
        elem.set_attr(name, value);
        Ok(())
    }

    /// Record the border box computed by a layout pass
    pub fn set_layout_rect(&mut self, id: NodeId, rect: DOMRect) -> Result<(), DomError> {
        let node = self.get_mut(id).ok_or(DomError::InvalidNode(id))?;
        let elem = node.as_element_mut().ok_or(DomError::NotAnElement(id))?;
        elem.layout = Some(rect);
        Ok(())
    }

    // --- Navigation ---

    /// Element data, if `id` is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    /// Attribute value on an element
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    /// Iterate over the children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// Parent node (may be a shadow root or the document)
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get(id)?.parent;
        parent.is_valid().then_some(parent)
    }

    /// Parent, stepping from a shadow root to its host
    pub fn composed_parent(&self, id: NodeId) -> Option<NodeId> {
        let node = self.get(id)?;
        if let Some(shadow) = node.as_shadow_root() {
            return Some(shadow.host);
        }
        node.parent.is_valid().then_some(node.parent)
    }

    /// Nearest element ancestor across shadow boundaries
    pub fn composed_parent_element(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.composed_parent(id)?;
        while !self.get(current)?.is_element() {
            current = self.composed_parent(current)?;
        }
        Some(current)
    }

    /// Shadow root attached to `host`, whatever its mode
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        let root = self.element(host)?.shadow_root;
        root.is_valid().then_some(root)
    }

    /// Shadow root attached to `host`, only if open (like `element.shadowRoot`)
    pub fn open_shadow_root(&self, host: NodeId) -> Option<NodeId> {
        let root = self.shadow_root(host)?;
        self.get(root)?.as_shadow_root()?.is_open().then_some(root)
    }

    /// Host element of a shadow root
    pub fn host(&self, shadow_root: NodeId) -> Option<NodeId> {
        Some(self.get(shadow_root)?.as_shadow_root()?.host)
    }

    /// Root of the node tree containing `id` (document, shadow root, or detached root)
    pub fn root_node(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Concatenated text of all descendant text nodes in the light tree
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let Some(node) = self.get(id) else { return out };
        if let Some(text) = node.as_text() {
            out.push_str(text);
            return out;
        }

        let mut stack: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            let Some(node) = self.get(current) else { continue };
            match &node.data {
                NodeData::Text(text) => out.push_str(text),
                NodeData::Element(_) => {
                    let start = stack.len();
                    stack.extend(self.children(current).map(|(c, _)| c));
                    stack[start..].reverse();
                }
                _ => {}
            }
        }
        out
    }

    /// First element in tree order with the given id, within the tree scope of `context`
    ///
    /// The scope is the document or shadow root containing `context`; shadow
    /// trees below it are not searched. Detached subtrees have no scope.
    pub fn get_element_by_id(&self, context: NodeId, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        let scope = self.root_node(context);
        let scope_node = self.get(scope)?;
        if !matches!(
            scope_node.data,
            NodeData::Document | NodeData::ShadowRoot(_)
        ) {
            return None;
        }

        let mut stack: Vec<NodeId> = self.children(scope).map(|(c, _)| c).collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            if let Some(elem) = self.element(current) {
                if elem.id.as_deref() == Some(id) {
                    return Some(current);
                }
                let start = stack.len();
                stack.extend(self.children(current).map(|(c, _)| c));
                stack[start..].reverse();
            }
        }
        None
    }

    // --- Style and geometry ---

    /// Computed value of a CSS property
    ///
    /// Resolved from inline declarations, inheritance across shadow
    /// boundaries for inherited properties, and UA defaults for `display`.
    pub fn computed_style(&self, id: NodeId, property: &str) -> Option<String> {
        let property = property.to_ascii_lowercase();
        let inherited = is_inherited_property(&property);
        let mut current = id;

        loop {
            let elem = self.element(current)?;
            let declared = elem
                .get_attr("style")
                .map(InlineStyle::parse)
                .and_then(|style| style.get(&property).map(str::to_string));

            match declared {
                Some(value) if value.eq_ignore_ascii_case("inherit") => {}
                Some(value) => return Some(value),
                None => {
                    if property == "display" {
                        if elem.has_attr("hidden") {
                            return Some("none".to_string());
                        }
                        return default_display(&elem.local_name).map(str::to_string);
                    }
                    if !inherited {
                        return None;
                    }
                }
            }
            current = self.composed_parent_element(current)?;
        }
    }

    /// Check whether the element or a composed ancestor is `display: none`
    pub fn is_display_none(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(elem) = current {
            if self.computed_style(elem, "display").as_deref() == Some("none") {
                return true;
            }
            current = self.composed_parent_element(elem);
        }
        false
    }

    /// Bounding box of an element, if it has one
    ///
    /// A rect recorded by layout wins; otherwise a box is derived from pixel
    /// `width` and `height`. Elements that do not render have no box.
    pub fn bounding_client_rect(&self, id: NodeId) -> Option<DOMRect> {
        let elem = self.element(id)?;
        if self.is_display_none(id) {
            return None;
        }
        if let Some(rect) = elem.layout {
            return Some(rect);
        }
        let width = parse_px(&self.computed_style(id, "width")?)?;
        let height = parse_px(&self.computed_style(id, "height")?)?;
        Some(DOMRect::from_xywh(0.0, 0.0, width, height))
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Child iterator yielding `(id, node)` pairs in order
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}
