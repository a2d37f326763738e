//! DOM Node Operations
//!
//! Error type shared by tree mutation and selector queries, and the
//! detached fragment used to move a batch of nodes in one step.

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node {0:?} not found")]
    NotFound(NodeId),

    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("Hierarchy request error: {0}")]
    HierarchyRequest(&'static str),

    /// Operation needs a parent the node does not have
    #[error("Node {0:?} has no parent")]
    NoParent(NodeId),

    /// Node is not a child of the given parent
    #[error("Node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Invalid node type
    #[error("Invalid node type for {0:?}")]
    InvalidNodeType(NodeId),

    /// Selector failed to parse
    #[error("Invalid selector '{selector}': {message}")]
    Syntax { selector: String, message: String },
}

/// Document fragment - lightweight detached container
///
/// Nodes listed here have no parent until the fragment is inserted.
#[derive(Debug, Clone, Default)]
pub struct DocumentFragment {
    children: Vec<NodeId>,
}

impl DocumentFragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, node: NodeId) {
        self.children.push(node);
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Take all children (clears fragment)
    pub fn take_children(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_fragment() {
        let mut frag = DocumentFragment::new();
        frag.append(NodeId(1));
        frag.append(NodeId(2));

        assert_eq!(frag.len(), 2);
        assert_eq!(frag.children(), &[NodeId(1), NodeId(2)]);

        let children = frag.take_children();
        assert_eq!(children.len(), 2);
        assert!(frag.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = DomError::NoParent(NodeId(3));
        assert_eq!(err.to_string(), "Node NodeId(3) has no parent");
    }
}
