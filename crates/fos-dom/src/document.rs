//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with html/head/body
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);
        let tree = &mut doc.tree;

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        let built = tree
            .append_child(NodeId::ROOT, html)
            .and_then(|()| tree.append_child(html, head))
            .and_then(|()| tree.append_child(html, body));
        debug_assert!(built.is_ok(), "document skeleton: {built:?}");

        doc.finalize();
        doc
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate html, head and body after the tree has been built
    pub fn finalize(&mut self) {
        let html = self.find_child_element(NodeId::ROOT, "html");
        let head = html.and_then(|html| self.find_child_element(html, "head"));
        let body = html.and_then(|html| self.find_child_element(html, "body"));

        self.html_element = html.unwrap_or(NodeId::NONE);
        self.head_element = head.unwrap_or(NodeId::NONE);
        self.body_element = body.unwrap_or(NodeId::NONE);
    }

    fn find_child_element(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.tree
            .children(parent)
            .find(|(_, node)| {
                node.as_element()
                    .is_some_and(|e| e.local_name == tag)
            })
            .map(|(id, _)| id)
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.find_child_element(self.head_element, "title")
            .map(|title| self.tree.text_content(title).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// First element child of <body>, the usual root when auditing a fragment
    pub fn first_body_element(&self) -> Option<NodeId> {
        self.tree
            .children(self.body_element)
            .find(|(_, node)| node.is_element())
            .map(|(id, _)| id)
    }

    /// Get element by ID in the document's own tree
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.get_element_by_id(NodeId::ROOT, id)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_structure() {
        let doc = Document::new("https://example.com/");
        assert_eq!(doc.url(), "https://example.com/");
        assert!(doc.document_element().is_valid());
        assert!(doc.head().is_valid());
        assert!(doc.body().is_valid());
        assert_eq!(doc.title(), "");
        assert_eq!(doc.first_body_element(), None);
    }

    #[test]
    fn test_title_and_lookup() {
        let mut doc = Document::default();
        let head = doc.head();
        let body = doc.body();
        let tree = doc.tree_mut();

        let title = tree.create_element("title");
        let text = tree.create_text("  Hello  ");
        tree.append_child(head, title).unwrap();
        tree.append_child(title, text).unwrap();

        let main = tree.create_element("main");
        tree.set_attribute(main, "id", "content").unwrap();
        tree.append_child(body, main).unwrap();

        assert_eq!(doc.title(), "Hello");
        assert_eq!(doc.get_element_by_id("content"), Some(main));
        assert_eq!(doc.first_body_element(), Some(main));
    }

    #[test]
    fn test_empty_document() {
        let mut doc = Document::empty("about:blank");
        doc.finalize();
        assert!(!doc.body().is_valid());
        assert_eq!(doc.first_body_element(), None);
    }
}
