//! fOS DOM - Document Object Model
//!
//! Arena-based DOM tree used by the accessibility checker.
//!
//! Features:
//! - Elements, text and comments addressed by [`NodeId`]
//! - Open and closed shadow roots
//! - Tree-scoped id lookup
//! - Inline style resolution with inheritance
//! - Box geometry (layout rects or sized inline styles)
//! - Simple CSS selectors

mod document;
mod geometry;
mod node;
mod selector;
mod shadow;
mod style;
mod tree;

pub use document::Document;
pub use geometry::DOMRect;
pub use node::{Attribute, ElementData, Node, NodeData};
pub use selector::{
    AttrOperator, AttrSelector, CompoundSelector, Selector, SelectorError, SelectorTarget,
};
pub use shadow::{ShadowRootData, ShadowRootMode};
pub use style::{InlineStyle, is_inherited_property};
pub use tree::{Children, DomTree};

use serde::Serialize;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the document node)
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check this is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#none")
        }
    }
}

/// DOM errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node {0} does not exist")]
    InvalidNode(NodeId),

    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("Element {0} already has a shadow root")]
    ShadowRootAlreadyAttached(NodeId),

    #[error("<{0}> elements cannot host a shadow root")]
    ShadowRootNotSupported(String),

    #[error("Appending {child} to {parent} would create a cycle")]
    CycleDetected { parent: NodeId, child: NodeId },
}
