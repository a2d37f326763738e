//! Window and Navigator
//!
//! The slice of `window`/`navigator` state the helpers read: touch
//! capability flags and the viewport size.

use serde::{Deserialize, Serialize};

/// `navigator` touch properties
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Navigator {
    /// `navigator.maxTouchPoints`
    pub max_touch_points: u32,
    /// `navigator.msMaxTouchPoints` (legacy vendor-prefixed)
    pub ms_max_touch_points: u32,
}

/// Host window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Window {
    /// `'ontouchstart' in window`
    pub ontouchstart: bool,
    pub navigator: Navigator,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            ontouchstart: false,
            navigator: Navigator::default(),
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

impl Window {
    /// A typical touch-screen phone
    pub fn touch() -> Self {
        Self {
            ontouchstart: true,
            navigator: Navigator { max_touch_points: 5, ms_max_touch_points: 0 },
            viewport_width: 390.0,
            viewport_height: 844.0,
        }
    }
}
