//! domkit timers - host task queue
//!
//! Single-threaded event loop providing `setTimeout`/`clearTimeout` over a
//! virtual millisecond clock. Time only moves when the embedder advances it,
//! which keeps timing-dependent code deterministic.

mod event_loop;

pub use event_loop::{EventLoop, TimerId};
