//! Library Configuration

use domkit_dom::{Document, ListenerId, NodeId, Window};
use serde::{Deserialize, Serialize};

use crate::events::{hide_on_click_outside_with_class, DEFAULT_HIDE_CLASS};

/// domkit configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Class removed by outside-click dismissal
    pub hide_class: String,

    /// Host window the documents run in
    pub window: Window,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hide_class: DEFAULT_HIDE_CLASS.to_string(),
            window: Window::default(),
        }
    }
}

impl Config {
    /// Settle process-wide state (touch detection) from this configuration
    ///
    /// Returns the touch flag now in effect, which may come from an earlier
    /// initialisation.
    pub fn apply(&self) -> bool {
        crate::query::init_touch_detection(&self.window)
    }

    /// New document hosted in the configured window
    pub fn document(&self, url: &str) -> Document {
        Document::with_window(url, self.window.clone())
    }

    /// Outside-click dismissal removing the configured `hide_class`
    pub fn hide_on_click_outside(&self, doc: &mut Document, element: NodeId) -> ListenerId {
        hide_on_click_outside_with_class(doc, element, &self.hide_class)
    }
}
