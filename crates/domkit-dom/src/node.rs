//! DOM Node - arena entry
//!
//! Links are stored as `NodeId`s into the owning `DomTree` arena rather than
//! pointers, so moving a subtree is a matter of rewriting a handful of ids.

use crate::{NodeId, DOMTokenList, ElementGeometry};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag_name)))
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self::with_data(NodeData::Text(content.to_string()))
    }

    /// Create a comment node
    pub fn comment(content: &str) -> Self {
        Self::with_data(NodeData::Comment(content.to_string()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Tag name, lower-cased
    tag_name: String,
    /// Attributes in insertion order
    attrs: Vec<Attribute>,
    /// Cached id attribute (very common lookup)
    id: Option<String>,
    /// Parsed `class` attribute
    class_list: DOMTokenList,
    /// Layout output for this element
    pub geometry: ElementGeometry,
}

impl ElementData {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: Vec::new(),
            id: None,
            class_list: DOMTokenList::new(),
            geometry: ElementGeometry::default(),
        }
    }

    /// Lower-cased tag name
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Cached `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Check for attribute presence
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "id" => self.id = Some(value.to_string()),
            "class" => self.class_list.set_value(value),
            _ => {}
        }

        // Check if attribute already exists
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
            attr.value = value.to_string();
            return;
        }
        self.attrs.push(Attribute { name, value: value.to_string() });
    }

    /// Remove an attribute, returning whether it was present
    pub fn remove_attr(&mut self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        let before = self.attrs.len();
        self.attrs.retain(|a| a.name != name);
        match name.as_str() {
            "id" => self.id = None,
            "class" => self.class_list = DOMTokenList::new(),
            _ => {}
        }
        self.attrs.len() != before
    }

    /// Iterate attributes
    pub fn attrs(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.iter()
    }

    /// Read-only `classList`
    pub fn class_list(&self) -> &DOMTokenList {
        &self.class_list
    }

    /// Mutate `classList`; the `class` attribute is kept in sync afterwards.
    pub fn update_class_list<R>(&mut self, f: impl FnOnce(&mut DOMTokenList) -> R) -> R {
        let result = f(&mut self.class_list);
        let value = self.class_list.value();
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == "class") {
            attr.value = value;
        } else if !value.is_empty() {
            self.attrs.push(Attribute { name: "class".to_string(), value });
        }
        result
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}
