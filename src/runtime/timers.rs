use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

/// Handle of a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Single-threaded virtual-time timer queue.
///
/// Time only moves when the owner pops due timers, so every suspension point (debounce delays,
/// layout-settle ticks, preview deadlines) is explicit and deterministic.
///
/// Determinism rule: timers with the same deadline fire in scheduling order.
pub struct TimerQueue<E> {
    now: Duration,
    next_id: u64,
    heap: BinaryHeap<Reverse<(Duration, u64)>>,
    pending: HashMap<u64, E>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            heap: BinaryHeap::new(),
            pending: HashMap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `event` to fire `after` from now. A zero delay fires on the next tick.
    pub fn schedule(&mut self, after: Duration, event: E) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.heap.push(Reverse((self.now + after, id)));
        self.pending.insert(id, event);
        TimerId(id)
    }

    /// Cancel a pending timer, returning its event if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<E> {
        self.pending.remove(&id.0)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id.0)
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deadline of the earliest live timer.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.discard_cancelled();
        self.heap.peek().map(|Reverse((at, _))| *at)
    }

    /// Pop the earliest live timer whose deadline is `<= until`, moving virtual time to it.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, E)> {
        self.discard_cancelled();
        let Reverse((at, id)) = *self.heap.peek()?;
        if at > until {
            return None;
        }
        self.heap.pop();
        self.now = self.now.max(at);
        let event = self.pending.remove(&id)?;
        Some((TimerId(id), event))
    }

    /// Move virtual time forward without firing anything. Never moves backwards.
    pub fn set_now(&mut self, t: Duration) {
        self.now = self.now.max(t);
    }

    fn discard_cancelled(&mut self) {
        while let Some(Reverse((_, id))) = self.heap.peek() {
            if self.pending.contains_key(id) {
                break;
            }
            self.heap.pop();
        }
    }
}

/// Re-armable delay: arming again before the deadline replaces the pending timer.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<TimerId>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// (Re)arm, cancelling any timer armed earlier.
    pub fn arm<E>(&mut self, timers: &mut TimerQueue<E>, event: E) -> TimerId {
        if let Some(prev) = self.pending.take() {
            timers.cancel(prev);
        }
        let id = timers.schedule(self.delay, event);
        self.pending = Some(id);
        id
    }

    /// Acknowledge a fired timer. Returns `false` for stale timers this debouncer no longer owns.
    pub fn fired(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Cancel the pending timer. Returns `true` when one was pending, in which case the caller
    /// should perform the debounced work immediately.
    pub fn flush<E>(&mut self, timers: &mut TimerQueue<E>) -> bool {
        match self.pending.take() {
            Some(id) => timers.cancel(id).is_some(),
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/timers.rs"]
mod tests;
