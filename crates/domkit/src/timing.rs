//! Timing control: debounce and throttle
//!
//! Both wrappers defer work through the host `EventLoop`; nothing blocks.
//! The "call context" of a browser callback has no separate slot here: pass
//! it as part of the argument value (e.g. a `(target, event)` tuple) and the
//! most-recent-call rules apply to it as well.

use std::cell::RefCell;
use std::rc::Rc;

use domkit_timers::{EventLoop, TimerId};

type SharedCallback<A> = Rc<RefCell<dyn FnMut(A) + 'static>>;

/// Per-wrapper timer state
#[derive(Debug, Default)]
struct TimingState {
    /// Deferred call that a later call may still supersede
    pending: Option<TimerId>,
    /// Time of the most recent accepted call (throttle only)
    last: Option<u64>,
}

fn invoke<A: 'static>(callback: &RefCell<dyn FnMut(A) + 'static>, args: A) {
    match callback.try_borrow_mut() {
        Ok(mut f) => (&mut *f)(args),
        Err(_) => tracing::warn!("Dropped re-entrant call to a running timing-controlled callback"),
    }
}

/// Delay `callback` until `delay_ms` have passed without another call
///
/// Every call cancels the previously scheduled invocation, so a burst of
/// calls produces exactly one invocation, with the arguments of the last
/// call, `delay_ms` after that call.
pub fn debounce<A: 'static>(
    event_loop: &EventLoop,
    delay_ms: u64,
    callback: impl FnMut(A) + 'static,
) -> Debounced<A> {
    Debounced {
        event_loop: event_loop.clone(),
        delay_ms,
        callback: Rc::new(RefCell::new(callback)),
        state: Rc::new(RefCell::new(TimingState::default())),
    }
}

/// Debounced callable returned by [`debounce`]
pub struct Debounced<A: 'static> {
    event_loop: EventLoop,
    delay_ms: u64,
    callback: SharedCallback<A>,
    state: Rc<RefCell<TimingState>>,
}

impl<A: 'static> Debounced<A> {
    pub fn call(&self, args: A) {
        let mut state = self.state.borrow_mut();
        if let Some(id) = state.pending.take() {
            self.event_loop.clear_timeout(id);
        }

        let callback = Rc::clone(&self.callback);
        let shared = Rc::clone(&self.state);
        let id = self.event_loop.set_timeout(self.delay_ms, move || {
            shared.borrow_mut().pending = None;
            invoke(&callback, args);
        });
        state.pending = Some(id);
    }

    /// An invocation is scheduled and not yet run
    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending.is_some()
    }
}

impl<A: 'static> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            event_loop: self.event_loop.clone(),
            delay_ms: self.delay_ms,
            callback: Rc::clone(&self.callback),
            state: Rc::clone(&self.state),
        }
    }
}

/// Run `callback` at most once per `delay_ms` window, with a trailing call
///
/// A call outside the cooldown runs immediately and starts a new window.
/// Calls inside the cooldown replace one another; only the last of them runs,
/// `delay_ms` after it was made. When that deferred call runs, the window is
/// measured from the time the call was *made*, not from when it ran.
pub fn throttle<A: 'static>(
    event_loop: &EventLoop,
    delay_ms: u64,
    callback: impl FnMut(A) + 'static,
) -> Throttled<A> {
    Throttled {
        event_loop: event_loop.clone(),
        delay_ms,
        callback: Rc::new(RefCell::new(callback)),
        state: Rc::new(RefCell::new(TimingState::default())),
    }
}

/// Throttled callable returned by [`throttle`]
pub struct Throttled<A: 'static> {
    event_loop: EventLoop,
    delay_ms: u64,
    callback: SharedCallback<A>,
    state: Rc<RefCell<TimingState>>,
}

impl<A: 'static> Throttled<A> {
    pub fn call(&self, args: A) {
        let now = self.event_loop.now();
        let mut state = self.state.borrow_mut();
        let last = state.last;

        match last {
            Some(last) if now < last.saturating_add(self.delay_ms) => {
                if let Some(id) = state.pending.take() {
                    self.event_loop.clear_timeout(id);
                }

                let callback = Rc::clone(&self.callback);
                let shared = Rc::clone(&self.state);
                let id = self.event_loop.set_timeout(self.delay_ms, move || {
                    {
                        let mut state = shared.borrow_mut();
                        state.last = Some(now);
                        state.pending = None;
                    }
                    invoke(&callback, args);
                });
                state.pending = Some(id);
            }
            _ => {
                // A deferred call from the previous window is left in place
                state.last = Some(now);
                drop(state);
                invoke(&self.callback, args);
            }
        }
    }

    /// A trailing invocation is scheduled and not yet run
    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending.is_some()
    }
}

impl<A: 'static> Clone for Throttled<A> {
    fn clone(&self) -> Self {
        Self {
            event_loop: self.event_loop.clone(),
            delay_ms: self.delay_ms,
            callback: Rc::clone(&self.callback),
            state: Rc::clone(&self.state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Rc<RefCell<Vec<(u64, &'static str)>>>;

    fn logging(ev: &EventLoop) -> (Log, impl FnMut(&'static str) + 'static) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let clock = ev.clone();
        (log, move |arg: &'static str| sink.borrow_mut().push((clock.now(), arg)))
    }

    #[test]
    fn test_debounce_fires_once_with_last_args() {
        let ev = EventLoop::new();
        let (log, cb) = logging(&ev);
        let debounced = debounce(&ev, 100, cb);

        debounced.call("a");
        ev.advance(40);
        debounced.call("b");
        ev.advance(40);
        debounced.call("c");
        assert!(debounced.is_pending());

        ev.advance(99);
        assert!(log.borrow().is_empty());
        ev.advance(1);
        assert_eq!(*log.borrow(), vec![(180, "c")]);
        assert!(!debounced.is_pending());

        ev.run_until_idle();
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_debounce_separate_bursts() {
        let ev = EventLoop::new();
        let (log, cb) = logging(&ev);
        let debounced = debounce(&ev, 50, cb);

        debounced.call("first");
        ev.advance(60);
        debounced.call("second");
        ev.run_until_idle();
        assert_eq!(*log.borrow(), vec![(50, "first"), (110, "second")]);
    }

    #[test]
    fn test_debounce_clones_share_state() {
        let ev = EventLoop::new();
        let (log, cb) = logging(&ev);
        let debounced = debounce(&ev, 10, cb);
        let other = debounced.clone();

        debounced.call("x");
        other.call("y");
        ev.run_until_idle();
        assert_eq!(*log.borrow(), vec![(10, "y")]);
    }

    #[test]
    fn test_throttle_trailing_call_wins() {
        let ev = EventLoop::new();
        let (log, cb) = logging(&ev);
        let throttled = throttle(&ev, 100, cb);

        throttled.call("call-0");
        ev.advance(10);
        throttled.call("call-1");
        ev.advance(10);
        throttled.call("call-2");

        assert_eq!(*log.borrow(), vec![(0, "call-0")]);
        ev.run_until_idle();
        assert_eq!(*log.borrow(), vec![(0, "call-0"), (120, "call-2")]);
    }

    #[test]
    fn test_throttle_window_measured_from_call_time() {
        let ev = EventLoop::new();
        let (log, cb) = logging(&ev);
        let throttled = throttle(&ev, 100, cb);

        throttled.call("a");
        ev.advance(50);
        throttled.call("b"); // deferred to t=150, window restarts at t=50
        ev.advance(100);
        assert_eq!(log.borrow().last(), Some(&(150, "b")));

        // t=150 is exactly last + delay: runs immediately
        throttled.call("c");
        assert_eq!(log.borrow().last(), Some(&(150, "c")));
        assert!(!throttled.is_pending());
    }

    #[test]
    fn test_throttle_outside_window_is_immediate() {
        let ev = EventLoop::new();
        let (log, cb) = logging(&ev);
        let throttled = throttle(&ev, 30, cb);

        for arg in ["a", "b", "c"] {
            throttled.call(arg);
            ev.advance(30);
        }
        assert_eq!(*log.borrow(), vec![(0, "a"), (30, "b"), (60, "c")]);
    }

    #[test]
    fn test_throttle_immediate_call_keeps_older_deferred_call() {
        let ev = EventLoop::new();
        let (log, cb) = logging(&ev);
        let throttled = throttle(&ev, 100, cb);

        throttled.call("a");
        ev.advance(90);
        throttled.call("b"); // deferred to t=190
        ev.advance(10);
        throttled.call("c"); // window over: runs now, "b" stays scheduled
        assert_eq!(*log.borrow(), vec![(0, "a"), (100, "c")]);
        assert!(throttled.is_pending());

        ev.advance(90);
        assert_eq!(log.borrow().last(), Some(&(190, "b")));

        // "b" reset the window start to t=90, so t=190 is already outside it
        throttled.call("d");
        assert_eq!(log.borrow().last(), Some(&(190, "d")));
        assert!(!throttled.is_pending());
    }

    #[test]
    fn test_reentrant_call_is_dropped() {
        let ev = EventLoop::new();
        let runs = Rc::new(RefCell::new(0));
        let slot: Rc<RefCell<Option<Throttled<()>>>> = Rc::new(RefCell::new(None));

        let counter = runs.clone();
        let inner = slot.clone();
        let throttled = throttle(&ev, 0, move |_: ()| {
            *counter.borrow_mut() += 1;
            if let Some(me) = inner.borrow().as_ref() {
                me.call(());
            }
        });
        *slot.borrow_mut() = Some(throttled.clone());

        throttled.call(());
        assert_eq!(*runs.borrow(), 1);

        // Break the Rc cycle
        slot.borrow_mut().take();
    }
}
