//! domkit
//!
//! Small, independent helpers for code that drives a document:
//!
//! - timing control: [`debounce`], [`throttle`]
//! - structure: [`wrap`], [`unwrap`]
//! - geometry: [`offset_of`], [`child_offset`]
//! - events: [`add_multiple_event_listener`], [`hide_on_click_outside`]
//! - queries: [`is_visible`], [`is_touch_device`], [`focusable_elements`],
//!   [`has_parent_with_matching_selector`]
//!
//! The document and the timer queue are the host crates re-exported as
//! [`dom`] and [`timers`].
//!
//! # Example
//! ```rust,ignore
//! use domkit::{debounce, timers::EventLoop};
//!
//! let event_loop = EventLoop::new();
//! let save = debounce(&event_loop, 300, |text: String| println!("saving {text}"));
//! save.call("h".into());
//! save.call("hi".into());
//! event_loop.run_until_idle(); // prints "saving hi" once
//! ```

mod config;
mod events;
mod geometry;
mod query;
mod structure;
mod timing;

pub use config::Config;
pub use events::{
    add_multiple_event_listener, hide_on_click_outside, hide_on_click_outside_with_class,
    DEFAULT_HIDE_CLASS,
};
pub use geometry::{child_offset, offset_of, Offset};
pub use query::{
    focusable_elements, focusable_within, has_parent_with_matching_selector, init_touch_detection,
    is_touch_device, is_visible, supports_touch, FOCUSABLE_SELECTORS,
};
pub use structure::{unwrap, wrap};
pub use timing::{debounce, throttle, Debounced, Throttled};

pub use domkit_dom::{DomError, DomResult};

// Re-export host crates
pub use domkit_dom as dom;
pub use domkit_timers as timers;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
