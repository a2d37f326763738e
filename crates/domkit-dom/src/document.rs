//! Document - High-level document API

use crate::events::ListenerRegistry;
use crate::{
    DOMRect, DOMTokenList, DomError, DomResult, DomTree, Event, EventHandler, ListenerId, NodeId,
    Selector, Window,
};

/// HTML Document
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Host window (touch capabilities, viewport)
    window: Window,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Event listeners for every node in the tree
    listeners: ListenerRegistry,
}

impl Document {
    /// Create a new document with `<html><head></head><body></body></html>`
    pub fn new(url: &str) -> Self {
        Self::with_window(url, Window::default())
    }

    /// Create a document hosted in `window`
    pub fn with_window(url: &str, window: Window) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh nodes under fresh parents cannot violate hierarchy rules
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        tracing::debug!("Created document {}", url);

        Self {
            tree,
            url: url.to_string(),
            window,
            html_element: html,
            head_element: head,
            body_element: body,
            listeners: ListenerRegistry::default(),
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Host window
    pub fn window(&self) -> &Window {
        &self.window
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

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.tree.create_element(tag_name)
    }

    /// Create an element and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag_name: &str) -> DomResult<NodeId> {
        let id = self.tree.create_element(tag_name);
        self.tree.append_child(parent, id)
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&node| self.tree.element(node).and_then(|e| e.id()) == Some(id))
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.tree
            .element_mut(id)
            .ok_or(DomError::InvalidNodeType(id))?
            .set_attr(name, value);
        Ok(())
    }

    /// Read an attribute from an element
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.tree.element(id)?.get_attr(name)
    }

    /// Remove an attribute; false if the element did not have it
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<bool> {
        Ok(self
            .tree
            .element_mut(id)
            .ok_or(DomError::InvalidNodeType(id))?
            .remove_attr(name))
    }

    /// Attribute presence; non-elements have none
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.tree.element(id).is_some_and(|e| e.has_attr(name))
    }

    /// `element.classList`
    pub fn class_list(&self, id: NodeId) -> Option<&DOMTokenList> {
        self.tree.element(id).map(|e| e.class_list())
    }

    /// Mutate `element.classList`
    pub fn update_class_list<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut DOMTokenList) -> R,
    ) -> DomResult<R> {
        let elem = self.tree.element_mut(id).ok_or(DomError::InvalidNodeType(id))?;
        Ok(elem.update_class_list(f))
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Record a border box (document coordinates) for an element
    pub fn set_layout(&mut self, id: NodeId, rect: DOMRect) -> DomResult<()> {
        let elem = self.tree.element_mut(id).ok_or(DomError::InvalidNodeType(id))?;
        elem.geometry.layout = Some(rect);
        Ok(())
    }

    /// Override the client rect list (e.g. an inline box split over lines)
    pub fn set_client_rects(&mut self, id: NodeId, rects: Vec<DOMRect>) -> DomResult<()> {
        let elem = self.tree.element_mut(id).ok_or(DomError::InvalidNodeType(id))?;
        elem.geometry.fragments = Some(rects);
        Ok(())
    }

    /// Drop layout, as for `display: none`
    pub fn clear_layout(&mut self, id: NodeId) -> DomResult<()> {
        let elem = self.tree.element_mut(id).ok_or(DomError::InvalidNodeType(id))?;
        elem.geometry.layout = None;
        elem.geometry.fragments = None;
        Ok(())
    }

    /// Element that has layout and is attached to this document
    fn rendered_geometry(&self, id: NodeId) -> Option<&crate::ElementGeometry> {
        let elem = self.tree.element(id)?;
        (elem.geometry.is_rendered() && self.tree.is_connected(id)).then_some(&elem.geometry)
    }

    /// `getBoundingClientRect()`: viewport-relative, zero when not rendered
    pub fn get_bounding_client_rect(&self, id: NodeId) -> DOMRect {
        self.rendered_geometry(id)
            .map(|g| g.border_box().translate(-self.scroll_left(), -self.scroll_top()))
            .unwrap_or_default()
    }

    /// `getClientRects()`: viewport-relative, empty when not rendered
    pub fn get_client_rects(&self, id: NodeId) -> Vec<DOMRect> {
        let (dx, dy) = (-self.scroll_left(), -self.scroll_top());
        self.rendered_geometry(id)
            .map(|g| g.client_rects().iter().map(|r| r.translate(dx, dy)).collect())
            .unwrap_or_default()
    }

    /// `offsetWidth`
    pub fn offset_width(&self, id: NodeId) -> f64 {
        self.rendered_geometry(id).map_or(0.0, |g| g.border_box().width)
    }

    /// `offsetHeight`
    pub fn offset_height(&self, id: NodeId) -> f64 {
        self.rendered_geometry(id).map_or(0.0, |g| g.border_box().height)
    }

    /// `document.body.scrollTop`
    pub fn scroll_top(&self) -> f64 {
        self.tree.element(self.body_element).map_or(0.0, |e| e.geometry.scroll_top)
    }

    /// `document.body.scrollLeft`
    pub fn scroll_left(&self) -> f64 {
        self.tree.element(self.body_element).map_or(0.0, |e| e.geometry.scroll_left)
    }

    /// Scroll the body to (x, y)
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        if let Some(body) = self.tree.element_mut(self.body_element) {
            body.geometry.scroll_to(x, y);
        }
    }

    // ------------------------------------------------------------------
    // Selectors
    // ------------------------------------------------------------------

    /// `document.querySelectorAll(selector)` in document order
    pub fn query_selector_all(&self, selector: &str) -> DomResult<Vec<NodeId>> {
        self.query_selector_all_within(self.tree.root(), selector)
    }

    /// `root.querySelectorAll(selector)`; `root` itself is not a candidate
    pub fn query_selector_all_within(
        &self,
        root: NodeId,
        selector: &str,
    ) -> DomResult<Vec<NodeId>> {
        let list = Selector::parse(selector)?;
        Ok(self.tree
            .descendants(root)
            .into_iter()
            .filter(|&id| list.matches(&self.tree, id))
            .collect())
    }

    /// `document.querySelector(selector)`
    pub fn query_selector(&self, selector: &str) -> DomResult<Option<NodeId>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    /// `element.matches(selector)`
    pub fn matches(&self, id: NodeId, selector: &str) -> DomResult<bool> {
        Ok(Selector::parse(selector)?.matches(&self.tree, id))
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// `target.addEventListener(event_type, handler)`
    ///
    /// Registering the same handler twice for one target and type keeps a
    /// single listener and returns its existing id.
    pub fn add_event_listener(
        &mut self,
        target: NodeId,
        event_type: &str,
        handler: EventHandler,
    ) -> ListenerId {
        let (id, added) = self.listeners.add(target, event_type, handler);
        if added {
            tracing::trace!("Added '{}' listener {:?} on {:?}", event_type, id, target);
        }
        id
    }

    /// Remove a listener; false if it was not registered
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(id);
        if removed {
            tracing::trace!("Removed listener {:?}", id);
        }
        removed
    }

    /// Listener still registered
    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains(id)
    }

    /// Number of listeners for `event_type` on `target`
    pub fn listener_count(&self, target: NodeId, event_type: &str) -> usize {
        self.listeners.count(target, event_type)
    }

    /// Dispatch `event` at `target`, bubbling to the document if it bubbles
    ///
    /// Returns false if a listener called `prevent_default`.
    pub fn dispatch_event(&mut self, target: NodeId, mut event: Event) -> bool {
        event.target = target;

        let mut path = vec![target];
        if event.bubbles {
            path.extend(self.tree.ancestors(target));
        }

        for node in path {
            event.current_target = node;
            for (id, handler) in self.listeners.snapshot(node, &event.event_type) {
                // Removed by an earlier listener in this dispatch
                if !self.listeners.contains(id) {
                    continue;
                }
                handler(self, &mut event);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }

        !event.is_default_prevented()
    }

    /// Simulate a click on `target`
    pub fn click(&mut self, target: NodeId) -> bool {
        self.dispatch_event(target, Event::click())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
