//! Shadow DOM
//!
//! Shadow roots live in the arena as fragment nodes whose children form the
//! shadow tree. The host keeps a link to its root in
//! [`ElementData::shadow_root`](crate::ElementData).

use crate::NodeId;

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

impl ShadowRootMode {
    /// Parse a `shadowrootmode` attribute value
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Shadow root
#[derive(Debug, Clone)]
pub struct ShadowRootData {
    /// Host element
    pub host: NodeId,
    /// Mode (open/closed)
    pub mode: ShadowRootMode,
}

impl ShadowRootData {
    /// Create a new shadow root
    pub fn new(host: NodeId, mode: ShadowRootMode) -> Self {
        Self { host, mode }
    }

    /// Scripts (and auditors) may only see into open roots
    pub fn is_open(&self) -> bool {
        self.mode == ShadowRootMode::Open
    }
}

/// Elements allowed to host a shadow root, besides custom elements
const SHADOW_HOSTS: &[&str] = &[
    "article", "aside", "blockquote", "body", "div", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "main", "nav",
    "p", "section", "span",
];

/// Check whether an element with this local name can host a shadow root
pub fn can_host_shadow(local_name: &str) -> bool {
    local_name.contains('-') || SHADOW_HOSTS.contains(&local_name)
}
