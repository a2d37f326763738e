//! Geometry APIs
//!
//! DOMRect plus the per-element layout record that `getBoundingClientRect`,
//! `getClientRects` and scroll offsets are derived from.

/// DOMRect - rectangle geometry
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DOMRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DOMRect {
    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Top edge (same as y)
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Left edge (same as x)
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Same rect shifted by (dx, dy)
    pub fn translate(&self, dx: f64, dy: f64) -> DOMRect {
        DOMRect::from_xywh(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Element geometry state, written by whatever performs layout
///
/// `layout` is the border box in document coordinates; `None` means the
/// element generates no box (`display: none`).
#[derive(Debug, Clone, Default)]
pub struct ElementGeometry {
    pub layout: Option<DOMRect>,
    /// Line/column fragments; when unset the border box is the only rect
    pub fragments: Option<Vec<DOMRect>>,

    // Scroll properties
    pub scroll_top: f64,
    pub scroll_left: f64,
}

impl ElementGeometry {
    /// Element generates a box
    pub fn is_rendered(&self) -> bool {
        self.layout.is_some()
    }

    /// Border box in document coordinates, zero when not rendered
    pub fn border_box(&self) -> DOMRect {
        self.layout.unwrap_or_default()
    }

    /// Client rects in document coordinates
    pub fn client_rects(&self) -> Vec<DOMRect> {
        match (&self.layout, &self.fragments) {
            (None, _) => Vec::new(),
            (Some(_), Some(fragments)) => fragments.clone(),
            (Some(rect), None) => vec![*rect],
        }
    }

    /// Scroll to position (negative offsets clamp to 0)
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        self.scroll_left = x.max(0.0);
        self.scroll_top = y.max(0.0);
    }
}
