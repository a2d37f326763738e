//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed; removing a node only unlinks it, so ids held by
//! callers stay valid and a removed subtree can be reinserted later.

use std::collections::HashSet;

use crate::{DocumentFragment, DomError, DomResult, ElementData, Node, NodeId};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Document node
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

    /// Element data for `id`, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Number of nodes ever allocated
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(Node::element(tag_name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.alloc(Node::comment(content))
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound(id))
    }

    /// Parent of `id`, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Checks that `child` may be placed under `parent`
    fn ensure_insertable(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.node(parent)?;
        if parent_node.is_text() || matches!(parent_node.data, crate::NodeData::Comment(_)) {
            return Err(DomError::InvalidNodeType(parent));
        }
        self.node(child)?;
        if child == NodeId::ROOT {
            return Err(DomError::HierarchyRequest("the document node cannot be inserted"));
        }
        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest("node would become its own descendant"));
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`, moving it if attached
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference` (append when `None`)
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.ensure_insertable(parent, child)?;
        if let Some(reference) = reference {
            if self.parent(reference) != Some(parent) {
                return Err(DomError::NotAChild { parent, child: reference });
            }
            if reference == child {
                return Ok(child);
            }
        }

        self.detach(child);

        let next = reference.unwrap_or(NodeId::NONE);
        let prev = match reference {
            Some(r) => self.nodes[r.index()].prev_sibling,
            None => self.nodes[parent.index()].last_child,
        };
        self.link_between(parent, prev, next, child, child);
        Ok(child)
    }

    /// Remove `child` from `parent`; the child becomes a detached root
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.node(child)?;
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(child)
    }

    /// Detach every child of `parent` into a fragment, preserving order
    pub fn take_children(&mut self, parent: NodeId) -> DomResult<DocumentFragment> {
        let mut fragment = DocumentFragment::new();
        let mut cursor = self.node(parent)?.first_child;
        while cursor.is_valid() {
            fragment.append(cursor);
            let node = &mut self.nodes[cursor.index()];
            let next = node.next_sibling;
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
            cursor = next;
        }
        let parent_node = &mut self.nodes[parent.index()];
        parent_node.first_child = NodeId::NONE;
        parent_node.last_child = NodeId::NONE;
        Ok(fragment)
    }

    /// Replace `old` with the fragment's nodes in one splice
    ///
    /// All checks run before any link is rewritten, so on error the tree is
    /// unchanged. `old` ends up detached.
    pub fn replace_with_fragment(
        &mut self,
        old: NodeId,
        mut fragment: DocumentFragment,
    ) -> DomResult<NodeId> {
        let parent = self.parent(old).ok_or(DomError::NoParent(old))?;
        let mut seen = HashSet::new();
        for &child in fragment.children() {
            if !seen.insert(child) {
                return Err(DomError::HierarchyRequest("node listed twice in fragment"));
            }
            if child == old {
                return Err(DomError::HierarchyRequest("node cannot replace itself"));
            }
            self.ensure_insertable(parent, child)?;
            if self.parent(child).is_some() {
                return Err(DomError::HierarchyRequest("fragment nodes must be detached"));
            }
        }

        let children = fragment.take_children();
        let (prev, next) = {
            let node = &self.nodes[old.index()];
            (node.prev_sibling, node.next_sibling)
        };
        self.clear_links(old);

        let (Some(&first), Some(&last)) = (children.first(), children.last()) else {
            self.relink_gap(parent, prev, next);
            return Ok(old);
        };

        for pair in children.windows(2) {
            self.nodes[pair[0].index()].next_sibling = pair[1];
            self.nodes[pair[1].index()].prev_sibling = pair[0];
        }
        for &child in &children {
            self.nodes[child.index()].parent = parent;
        }
        self.link_between(parent, prev, next, first, last);
        Ok(old)
    }

    /// Splice the already-chained run `first..=last` between `prev` and `next`
    fn link_between(
        &mut self,
        parent: NodeId,
        prev: NodeId,
        next: NodeId,
        first: NodeId,
        last: NodeId,
    ) {
        self.nodes[first.index()].parent = parent;
        self.nodes[last.index()].parent = parent;
        self.nodes[first.index()].prev_sibling = prev;
        self.nodes[last.index()].next_sibling = next;

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = first;
        } else {
            self.nodes[parent.index()].first_child = first;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = last;
        } else {
            self.nodes[parent.index()].last_child = last;
        }
    }

    /// Join `prev` and `next` after whatever sat between them was taken out
    fn relink_gap(&mut self, parent: NodeId, prev: NodeId, next: NodeId) {
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
    }

    fn clear_links(&mut self, id: NodeId) {
        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Unlink a node from its parent without freeing it
    fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }
        self.relink_gap(parent, prev, next);
        self.clear_links(id);
    }

    /// Set a node's text (text and comment nodes only)
    pub fn set_text(&mut self, id: NodeId, content: &str) -> DomResult<()> {
        match &mut self.node_mut(id)?.data {
            crate::NodeData::Text(t) | crate::NodeData::Comment(t) => {
                *t = content.to_string();
                Ok(())
            }
            _ => Err(DomError::InvalidNodeType(id)),
        }
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Iterate direct children as (id, node)
    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = (NodeId, &Node)> {
        let first = self.get(parent).map_or(NodeId::NONE, |n| n.first_child);
        std::iter::successors(
            self.get(first).map(|n| (first, n)),
            move |(_, n)| self.get(n.next_sibling).map(|next| (n.next_sibling, next)),
        )
    }

    /// Direct child ids in order
    pub fn child_ids(&self, parent: NodeId) -> Vec<NodeId> {
        self.children(parent).map(|(id, _)| id).collect()
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.parent(id);
        while let Some(p) = cursor {
            out.push(p);
            cursor = self.parent(p);
        }
        out
    }

    /// Descendants in pre-order, not including `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.child_ids(id).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.child_ids(next).into_iter().rev());
        }
        out
    }

    /// Inclusive containment, like `Node.contains`
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if self.get(ancestor).is_none() || self.get(node).is_none() {
            return false;
        }
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Attached to the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(NodeId::ROOT, id)
    }
}
