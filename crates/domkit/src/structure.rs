//! DOM structure: wrap and unwrap
//!
//! Both operations validate before touching the tree, so a failed call leaves
//! the document exactly as it was.

use domkit_dom::{Document, DomError, DomResult, NodeId};

/// Put `wrapper` where `element` is, then move `element` into it
///
/// `element` becomes the last child of `wrapper`; any children `wrapper`
/// already had stay in front of it.
pub fn wrap(doc: &mut Document, element: NodeId, wrapper: NodeId) -> DomResult<()> {
    let tree = doc.tree_mut();
    let parent = tree.parent(element).ok_or(DomError::NoParent(element))?;
    if tree.element(wrapper).is_none() {
        return Err(match tree.get(wrapper) {
            Some(_) => DomError::InvalidNodeType(wrapper),
            None => DomError::NotFound(wrapper),
        });
    }
    if wrapper == element {
        return Err(DomError::HierarchyRequest("an element cannot wrap itself"));
    }

    // Fails without side effects when `wrapper` is an ancestor of `element`
    tree.insert_before(parent, wrapper, Some(element))?;
    tree.append_child(wrapper, element)?;

    tracing::debug!("Wrapped {:?} in {:?}", element, wrapper);
    Ok(())
}

/// Replace `wrapper` with its children, in order, and detach it
///
/// The children are staged in a detached fragment and spliced into the
/// wrapper's slot in a single step.
pub fn unwrap(doc: &mut Document, wrapper: NodeId) -> DomResult<()> {
    let tree = doc.tree_mut();
    if tree.get(wrapper).is_none() {
        return Err(DomError::NotFound(wrapper));
    }
    if tree.parent(wrapper).is_none() {
        return Err(DomError::NoParent(wrapper));
    }

    // Staged children are detached and distinct, so the splice cannot fail
    let staged = tree.take_children(wrapper)?;
    let count = staged.len();
    tree.replace_with_fragment(wrapper, staged)?;

    tracing::debug!("Unwrapped {:?} ({} children moved up)", wrapper, count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(doc: &mut Document, n: usize) -> (NodeId, Vec<NodeId>) {
        let ul = doc.append_element(doc.body(), "ul").unwrap();
        let items = (0..n).map(|_| doc.append_element(ul, "li").unwrap()).collect();
        (ul, items)
    }

    #[test]
    fn test_wrap_takes_element_position() {
        let mut doc = Document::default();
        let (ul, items) = list(&mut doc, 3);
        let wrapper = doc.create_element("div");

        wrap(&mut doc, items[1], wrapper).unwrap();

        assert_eq!(doc.tree().child_ids(ul), vec![items[0], wrapper, items[2]]);
        assert_eq!(doc.tree().child_ids(wrapper), vec![items[1]]);
    }

    #[test]
    fn test_wrap_appends_after_existing_children() {
        let mut doc = Document::default();
        let (_, items) = list(&mut doc, 1);
        let wrapper = doc.create_element("label");
        let caption = doc.tree_mut().create_text("Name");
        doc.tree_mut().append_child(wrapper, caption).unwrap();

        wrap(&mut doc, items[0], wrapper).unwrap();
        assert_eq!(doc.tree().child_ids(wrapper), vec![caption, items[0]]);
    }

    #[test]
    fn test_wrap_detached_element_fails() {
        let mut doc = Document::default();
        let loose = doc.create_element("span");
        let wrapper = doc.create_element("div");

        assert_eq!(wrap(&mut doc, loose, wrapper), Err(DomError::NoParent(loose)));
        assert_eq!(doc.tree().parent(wrapper), None);
    }

    #[test]
    fn test_wrap_rejects_text_wrapper_untouched() {
        let mut doc = Document::default();
        let (ul, items) = list(&mut doc, 2);
        let text = doc.tree_mut().create_text("x");

        assert_eq!(wrap(&mut doc, items[0], text), Err(DomError::InvalidNodeType(text)));
        assert_eq!(doc.tree().child_ids(ul), items);
    }

    #[test]
    fn test_wrap_in_ancestor_fails_untouched() {
        let mut doc = Document::default();
        let (ul, items) = list(&mut doc, 2);
        let body = doc.body();
        let body_children = doc.tree().child_ids(body);

        assert!(matches!(wrap(&mut doc, items[0], ul), Err(DomError::HierarchyRequest(_))));
        assert!(matches!(wrap(&mut doc, items[1], body), Err(DomError::HierarchyRequest(_))));
        assert!(matches!(wrap(&mut doc, ul, ul), Err(DomError::HierarchyRequest(_))));

        assert_eq!(doc.tree().child_ids(ul), items);
        assert_eq!(doc.tree().child_ids(body), body_children);
        assert_eq!(doc.tree().parent(ul), Some(body));
    }

    #[test]
    fn test_unwrap_preserves_order() {
        let mut doc = Document::default();
        let (ul, items) = list(&mut doc, 3);
        let body = doc.body();
        let before = doc.append_element(body, "p").unwrap();
        doc.tree_mut().insert_before(body, before, Some(ul)).unwrap();
        let after = doc.append_element(body, "p").unwrap();

        unwrap(&mut doc, ul).unwrap();

        assert_eq!(
            doc.tree().child_ids(body),
            vec![before, items[0], items[1], items[2], after]
        );
        assert_eq!(doc.tree().parent(ul), None);
        assert!(doc.tree().child_ids(ul).is_empty());
    }

    #[test]
    fn test_unwrap_empty_wrapper_removes_it() {
        let mut doc = Document::default();
        let (ul, _) = list(&mut doc, 0);
        unwrap(&mut doc, ul).unwrap();
        let body = doc.body();
        assert!(doc.tree().child_ids(body).is_empty());
    }

    #[test]
    fn test_unwrap_detached_fails() {
        let mut doc = Document::default();
        let wrapper = doc.create_element("div");
        let child = doc.append_element(wrapper, "span").unwrap();

        assert_eq!(unwrap(&mut doc, wrapper), Err(DomError::NoParent(wrapper)));
        assert_eq!(doc.tree().child_ids(wrapper), vec![child]);
    }

    #[test]
    fn test_wrap_then_unwrap_round_trips() {
        let mut doc = Document::default();
        let (ul, items) = list(&mut doc, 3);
        let wrapper = doc.create_element("div");

        wrap(&mut doc, items[2], wrapper).unwrap();
        unwrap(&mut doc, wrapper).unwrap();

        assert_eq!(doc.tree().child_ids(ul), items);
        assert!(!doc.tree().is_connected(wrapper));
    }
}
