//! domkit DOM - host document model
//!
//! Arena-backed DOM tree with the pieces of a browser document the domkit
//! helpers read and mutate: element attributes and `classList`, layout
//! geometry, body scroll, window touch capabilities, selector queries and
//! event listeners.

mod node;
mod tree;
mod document;
mod classlist;
mod geometry;
mod operations;
mod selectors;
mod events;
mod window;

pub use node::{Node, NodeData, ElementData, Attribute};
pub use tree::DomTree;
pub use document::Document;
pub use classlist::DOMTokenList;
pub use geometry::{DOMRect, ElementGeometry};
pub use operations::{DomError, DomResult, DocumentFragment};
pub use selectors::{Selector, SelectorList};
pub use events::{Event, EventHandler, ListenerId};
pub use window::{Window, Navigator};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the document node)
    pub const ROOT: NodeId = NodeId(0);

    /// Null node
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this refers to a node rather than null
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::NONE
    }
}
