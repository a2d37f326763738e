//! Event Loop Implementation
//!
//! Timer queue driven by a virtual clock.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Timer handle returned by `set_timeout`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

/// Timer task
struct Timer {
    id: TimerId,
    /// Virtual time at which the timer is due
    deadline: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct LoopState {
    /// Pending timers
    timers: Vec<Timer>,
    /// Next timer ID
    next_timer_id: u32,
    /// Current timestamp (ms)
    current_time: u64,
}

impl LoopState {
    /// Earliest due timer at or before `limit`; ties go to the older id
    fn take_due(&mut self, limit: u64) -> Option<Timer> {
        let index = self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= limit)
            .min_by_key(|(_, t)| (t.deadline, t.id))
            .map(|(i, _)| i)?;
        Some(self.timers.remove(index))
    }
}

/// Handle to a single-threaded event loop
///
/// Clones share the same queue and clock.
#[derive(Clone, Default)]
pub struct EventLoop {
    state: Rc<RefCell<LoopState>>,
}

impl EventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time (ms since the loop was created)
    pub fn now(&self) -> u64 {
        self.state.borrow().current_time
    }

    /// Run `callback` once, `delay_ms` from now
    pub fn set_timeout(&self, delay_ms: u64, callback: impl FnOnce() + 'static) -> TimerId {
        let mut state = self.state.borrow_mut();
        state.next_timer_id += 1;
        let id = TimerId(state.next_timer_id);
        let deadline = state.current_time.saturating_add(delay_ms);
        state.timers.push(Timer {
            id,
            deadline,
            callback: Box::new(callback),
        });
        tracing::trace!("Scheduled timer {:?} for t={}", id, deadline);
        id
    }

    /// Cancel a pending timer; false if it already fired or never existed
    pub fn clear_timeout(&self, id: TimerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.timers.len();
        state.timers.retain(|t| t.id != id);
        let cleared = state.timers.len() != before;
        if cleared {
            tracing::trace!("Cleared timer {:?}", id);
        }
        cleared
    }

    /// Advance time and run due timers
    ///
    /// Each callback observes `now()` equal to its own deadline, so timers it
    /// schedules are measured from that instant and may fire in this same call.
    pub fn advance(&self, delta_ms: u64) {
        let target = self.now().saturating_add(delta_ms);
        while let Some(timer) = self.next_due(target) {
            self.fire(timer);
        }
        self.state.borrow_mut().current_time = target;
    }

    /// Run timers until the queue is empty, jumping the clock between deadlines
    pub fn run_until_idle(&self) {
        while let Some(timer) = self.next_due(u64::MAX) {
            self.fire(timer);
        }
    }

    fn next_due(&self, limit: u64) -> Option<Timer> {
        let mut state = self.state.borrow_mut();
        let timer = state.take_due(limit)?;
        state.current_time = state.current_time.max(timer.deadline);
        Some(timer)
    }

    fn fire(&self, timer: Timer) {
        tracing::trace!("Firing timer {:?} at t={}", timer.id, timer.deadline);
        // No borrow is held here, callbacks may schedule or clear timers
        (timer.callback)();
    }

    /// Check if there are pending timers
    pub fn has_pending(&self) -> bool {
        !self.state.borrow().timers.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Get time until next timer fires
    pub fn time_until_next(&self) -> Option<Duration> {
        let state = self.state.borrow();
        state.timers
            .iter()
            .map(|t| t.deadline.saturating_sub(state.current_time))
            .min()
            .map(Duration::from_millis)
    }
}

impl fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("EventLoop")
            .field("current_time", &state.current_time)
            .field("pending", &state.timers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder() -> (Rc<RefCell<Vec<(u32, u64)>>>, impl Fn(u32, &EventLoop) -> Box<dyn FnOnce()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let make = move |tag: u32, ev: &EventLoop| -> Box<dyn FnOnce()> {
            let sink = sink.clone();
            let ev = ev.clone();
            Box::new(move || sink.borrow_mut().push((tag, ev.now())))
        };
        (log, make)
    }

    #[test]
    fn test_timeout() {
        let ev = EventLoop::new();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        ev.set_timeout(100, move || flag.set(true));

        ev.advance(50);
        assert!(!fired.get());
        assert_eq!(ev.time_until_next(), Some(Duration::from_millis(50)));

        ev.advance(60);
        assert!(fired.get());
        assert!(!ev.has_pending());
        assert_eq!(ev.now(), 110);
    }

    #[test]
    fn test_clear_timeout() {
        let ev = EventLoop::new();
        let id1 = ev.set_timeout(100, || {});
        let id2 = ev.set_timeout(200, || {});
        assert_eq!(ev.pending_count(), 2);

        assert!(ev.clear_timeout(id1));
        assert!(!ev.clear_timeout(id1));
        assert!(ev.has_pending());

        ev.clear_timeout(id2);
        assert!(!ev.has_pending());
    }

    #[test]
    fn test_deadline_order_and_clock() {
        let ev = EventLoop::new();
        let (log, make) = recorder();
        ev.set_timeout(30, make(1, &ev));
        ev.set_timeout(10, make(2, &ev));
        ev.set_timeout(10, make(3, &ev));

        ev.advance(100);
        assert_eq!(*log.borrow(), vec![(2, 10), (3, 10), (1, 30)]);
    }

    #[test]
    fn test_nested_schedule_in_same_advance() {
        let ev = EventLoop::new();
        let (log, make) = recorder();
        let inner = make(2, &ev);
        let handle = ev.clone();
        ev.set_timeout(10, move || {
            handle.set_timeout(15, inner);
        });

        ev.advance(30);
        assert_eq!(*log.borrow(), vec![(2, 25)]);
    }

    #[test]
    fn test_run_until_idle() {
        let ev = EventLoop::new();
        let (log, make) = recorder();
        ev.set_timeout(500, make(1, &ev));
        ev.run_until_idle();
        assert_eq!(*log.borrow(), vec![(1, 500)]);
        assert_eq!(ev.now(), 500);
        assert_eq!(ev.time_until_next(), None);
    }
}
