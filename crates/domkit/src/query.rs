//! Boolean and enumeration queries over the document

use std::sync::OnceLock;

use domkit_dom::{Document, DomResult, NodeId, Selector, Window};

static IS_TOUCH_DEVICE: OnceLock<bool> = OnceLock::new();

/// Selectors for element categories that can take keyboard focus
pub const FOCUSABLE_SELECTORS: [&str; 6] = [
    "a[href]",
    "button:not([disabled])",
    "input:not([disabled])",
    "select:not([disabled])",
    "textarea:not([disabled])",
    "[tabindex]:not([tabindex=\"-1\"])",
];

/// Rendered with a non-zero size, or with at least one client rect
///
/// `NodeId::NONE`, unknown ids, non-elements, detached elements and
/// `display: none` elements are all not visible.
pub fn is_visible(doc: &Document, element: NodeId) -> bool {
    if !element.is_valid() || doc.tree().element(element).is_none() {
        return false;
    }
    doc.offset_width(element) != 0.0
        || doc.offset_height(element) != 0.0
        || !doc.get_client_rects(element).is_empty()
}

/// Touch capability of `window`: a touchstart hook or any touch points
pub fn supports_touch(window: &Window) -> bool {
    window.ontouchstart
        || window.navigator.max_touch_points > 0
        || window.navigator.ms_max_touch_points > 0
}

/// Fix the process-wide touch flag from `window`
///
/// Only the first initialisation counts; the settled value is returned.
pub fn init_touch_detection(window: &Window) -> bool {
    *IS_TOUCH_DEVICE.get_or_init(|| {
        let touch = supports_touch(window);
        tracing::debug!("Touch device detection: {}", touch);
        touch
    })
}

/// Process-wide touch flag, detected from `Window::default()` if nothing
/// initialised it first
pub fn is_touch_device() -> bool {
    match IS_TOUCH_DEVICE.get() {
        Some(&touch) => touch,
        None => init_touch_detection(&Window::default()),
    }
}

/// The focusable selector list, in a fixed order
pub fn focusable_elements() -> &'static [&'static str] {
    &FOCUSABLE_SELECTORS
}

/// Focusable elements inside `root`, in document order
///
/// Elements that qualify only through `tabindex` need an integer value of 0 or
/// more; `"-2"` or `"abc"` do not count.
pub fn focusable_within(doc: &Document, root: NodeId) -> DomResult<Vec<NodeId>> {
    // Every entry but the trailing `[tabindex]` one
    let native = &FOCUSABLE_SELECTORS[..FOCUSABLE_SELECTORS.len() - 1];
    let native = Selector::parse(&native.join(", "))?;
    let candidates = doc.query_selector_all_within(root, &FOCUSABLE_SELECTORS.join(", "))?;

    Ok(candidates
        .into_iter()
        .filter(|&el| native.matches(doc.tree(), el) || has_tab_order(doc, el))
        .collect())
}

fn has_tab_order(doc: &Document, element: NodeId) -> bool {
    doc.get_attribute(element, "tabindex")
        .and_then(|value| value.trim().parse::<i32>().ok())
        .is_some_and(|index| index >= 0)
}

/// Some element other than `target` matches `selector` and contains `target`
pub fn has_parent_with_matching_selector(
    doc: &Document,
    target: NodeId,
    selector: &str,
) -> DomResult<bool> {
    let candidates = doc.query_selector_all(selector)?;
    Ok(candidates
        .into_iter()
        .any(|el| el != target && doc.tree().contains(el, target)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domkit_dom::{DOMRect, DomError, Navigator};

    #[test]
    fn test_is_visible() {
        let mut doc = Document::default();
        let div = doc.append_element(doc.body(), "div").unwrap();

        // display: none
        assert!(!is_visible(&doc, div));

        // zero-size box still has a client rect
        doc.set_layout(div, DOMRect::from_xywh(0.0, 0.0, 0.0, 0.0)).unwrap();
        assert!(is_visible(&doc, div));

        // zero size, no client rects
        doc.set_client_rects(div, Vec::new()).unwrap();
        assert!(!is_visible(&doc, div));

        // width alone is enough
        doc.set_layout(div, DOMRect::from_xywh(0.0, 0.0, 10.0, 0.0)).unwrap();
        assert!(is_visible(&doc, div));

        // height alone is enough
        doc.set_layout(div, DOMRect::from_xywh(0.0, 0.0, 0.0, 10.0)).unwrap();
        assert!(is_visible(&doc, div));

        assert!(!is_visible(&doc, NodeId::NONE));
    }

    #[test]
    fn test_detached_is_not_visible() {
        let mut doc = Document::default();
        let div = doc.create_element("div");
        doc.set_layout(div, DOMRect::from_xywh(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(!is_visible(&doc, div));
    }

    #[test]
    fn test_supports_touch() {
        assert!(!supports_touch(&Window::default()));
        assert!(supports_touch(&Window::touch()));

        let hook_only = Window { ontouchstart: true, ..Window::default() };
        assert!(supports_touch(&hook_only));

        let legacy = Window {
            navigator: Navigator { max_touch_points: 0, ms_max_touch_points: 2 },
            ..Window::default()
        };
        assert!(supports_touch(&legacy));
    }

    #[test]
    fn test_is_touch_device_is_stable() {
        let first = is_touch_device();
        assert_eq!(init_touch_detection(&Window::touch()), first);
        assert_eq!(is_touch_device(), first);
    }

    #[test]
    fn test_focusable_list() {
        assert_eq!(focusable_elements().len(), 6);
        assert_eq!(focusable_elements()[0], "a[href]");
    }

    #[test]
    fn test_focusable_within() {
        let mut doc = Document::default();
        let form = doc.append_element(doc.body(), "form").unwrap();
        let link = doc.append_element(form, "a").unwrap();
        let _no_href = doc.append_element(form, "a").unwrap();
        let disabled = doc.append_element(form, "button").unwrap();
        let input = doc.append_element(form, "input").unwrap();
        let skipped = doc.append_element(form, "div").unwrap();
        let tabbable = doc.append_element(form, "div").unwrap();
        doc.set_attribute(link, "href", "#top").unwrap();
        doc.set_attribute(disabled, "disabled", "").unwrap();
        doc.set_attribute(skipped, "tabindex", "-1").unwrap();
        doc.set_attribute(tabbable, "tabindex", "0").unwrap();

        assert_eq!(focusable_within(&doc, form).unwrap(), vec![link, input, tabbable]);
    }

    #[test]
    fn test_focusable_within_skips_negative_tabindex() {
        let mut doc = Document::default();
        let dialog = doc.append_element(doc.body(), "dialog").unwrap();
        let minus_two = doc.append_element(dialog, "div").unwrap();
        let garbage = doc.append_element(dialog, "div").unwrap();
        let padded = doc.append_element(dialog, "span").unwrap();
        let button = doc.append_element(dialog, "button").unwrap();
        doc.set_attribute(minus_two, "tabindex", "-2").unwrap();
        doc.set_attribute(garbage, "tabindex", "abc").unwrap();
        doc.set_attribute(padded, "tabindex", " 3 ").unwrap();
        // native controls stay focusable whatever their tabindex
        doc.set_attribute(button, "tabindex", "-5").unwrap();

        assert_eq!(focusable_within(&doc, dialog).unwrap(), vec![padded, button]);
    }

    #[test]
    fn test_has_parent_with_matching_selector() {
        let mut doc = Document::default();
        let menu = doc.append_element(doc.body(), "nav").unwrap();
        doc.set_attribute(menu, "class", "menu").unwrap();
        let item = doc.append_element(menu, "a").unwrap();
        doc.set_attribute(item, "class", "menu").unwrap();
        let outside = doc.append_element(doc.body(), "a").unwrap();
        doc.set_attribute(outside, "class", "menu").unwrap();

        assert!(has_parent_with_matching_selector(&doc, item, ".menu").unwrap());
        // matches itself only
        assert!(!has_parent_with_matching_selector(&doc, outside, ".menu").unwrap());
        assert!(!has_parent_with_matching_selector(&doc, item, ".dropdown").unwrap());
        assert!(matches!(
            has_parent_with_matching_selector(&doc, item, "..menu"),
            Err(DomError::Syntax { .. })
        ));
    }
}
