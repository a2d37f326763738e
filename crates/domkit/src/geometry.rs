//! Element offsets relative to the document or an ancestor

use std::ops::Sub;

use domkit_dom::{Document, NodeId};
use serde::{Deserialize, Serialize};

/// Pixel offset (top, left)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub top: f64,
    pub left: f64,
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        Offset {
            top: self.top - rhs.top,
            left: self.left - rhs.left,
        }
    }
}

/// Position of `element` within the whole scrollable document
///
/// Viewport-relative bounding rect plus the body's scroll offset.
pub fn offset_of(doc: &Document, element: NodeId) -> Offset {
    let rect = doc.get_bounding_client_rect(element);
    Offset {
        top: rect.top() + doc.scroll_top(),
        left: rect.left() + doc.scroll_left(),
    }
}

/// Position of `element` relative to `parent`
///
/// Plain difference of the two document offsets; scroll positions of
/// containers in between are not taken into account.
pub fn child_offset(doc: &Document, element: NodeId, parent: NodeId) -> Offset {
    offset_of(doc, element) - offset_of(doc, parent)
}
