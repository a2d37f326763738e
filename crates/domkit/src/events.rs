//! Event listener conveniences

use std::cell::Cell;
use std::rc::Rc;

use domkit_dom::{Document, Event, EventHandler, ListenerId, NodeId};

use crate::query::is_visible;

/// Class removed by [`hide_on_click_outside`]
pub const DEFAULT_HIDE_CLASS: &str = "hover";

/// Attach `handler` to `element` once per name in `event_names`
///
/// Names are not deduplicated here; registering the same handler twice for
/// one name collapses to a single listener, and its id is repeated.
pub fn add_multiple_event_listener(
    doc: &mut Document,
    element: NodeId,
    event_names: &[&str],
    handler: EventHandler,
) -> Vec<ListenerId> {
    event_names
        .iter()
        .map(|name| doc.add_event_listener(element, name, Rc::clone(&handler)))
        .collect()
}

/// [`hide_on_click_outside_with_class`] with the `"hover"` class
pub fn hide_on_click_outside(doc: &mut Document, element: NodeId) -> ListenerId {
    hide_on_click_outside_with_class(doc, element, DEFAULT_HIDE_CLASS)
}

/// Remove `class_name` from `element` on the first click outside it
///
/// Installs a document-level click listener. A click whose target lies
/// outside `element` while `element` is visible removes the class and
/// uninstalls the listener; other clicks leave it armed. Call again to re-arm.
/// The returned id can be passed to `Document::remove_event_listener` to
/// disarm early.
pub fn hide_on_click_outside_with_class(
    doc: &mut Document,
    element: NodeId,
    class_name: &str,
) -> ListenerId {
    let own_id: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
    let slot = Rc::clone(&own_id);
    let class_name = class_name.to_string();

    let handler: EventHandler = Rc::new(move |doc: &mut Document, event: &mut Event| {
        if doc.tree().contains(element, event.target) || !is_visible(doc, element) {
            return;
        }

        let removed = doc.update_class_list(element, |list| list.remove(&[class_name.as_str()]));
        if let Err(err) = removed {
            tracing::warn!("Could not remove class '{}' from {:?}: {}", class_name, element, err);
        }
        if let Some(id) = slot.take() {
            doc.remove_event_listener(id);
            tracing::debug!("Outside click on {:?} dismissed {:?}", event.target, element);
        }
    });

    let root = doc.tree().root();
    let id = doc.add_event_listener(root, "click", handler);
    own_id.set(Some(id));
    id
}
