//! Timer Scheduling
//!
//! The core never sleeps. Delays (the simulated typing latency, the picker's
//! selection feedback) are registered with a [`Scheduler`] and come back as
//! [`TimerId`]s once they are due. The surface polls for due timers once per
//! frame and hands them to the conductor, so every state change still runs
//! on the surface's single event loop.
//!
//! Two clocks are provided:
//! - [`SystemScheduler`]: monotonic wall time, used by the terminal UI
//! - [`VirtualScheduler`]: manually advanced time, used by tests

use std::time::{Duration, Instant};

/// Handle for a scheduled timer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Something that can fire timers after a delay
pub trait Scheduler {
    /// Schedule a timer to become due after `delay`
    fn after(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer. Returns whether it was still pending.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Remove and return every due timer, earliest deadline first
    fn due(&mut self) -> Vec<TimerId>;

    /// Number of timers still pending
    fn pending(&self) -> usize;
}

/// Deadline-ordered timer storage shared by both clocks
#[derive(Debug)]
struct TimerQueue<T> {
    next_id: u64,
    timers: Vec<(T, TimerId)>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            timers: Vec::new(),
        }
    }
}

impl<T: Copy + Ord> TimerQueue<T> {
    fn push(&mut self, deadline: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        // Stable insert: equal deadlines fire in scheduling order
        let pos = self.timers.partition_point(|(d, _)| *d <= deadline);
        self.timers.insert(pos, (deadline, id));
        id
    }

    fn remove(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|(_, t)| *t != id);
        self.timers.len() != before
    }

    fn drain_until(&mut self, now: T) -> Vec<TimerId> {
        let split = self.timers.partition_point(|(d, _)| *d <= now);
        self.timers.drain(..split).map(|(_, id)| id).collect()
    }
}

/// Scheduler backed by the monotonic system clock
#[derive(Debug, Default)]
pub struct SystemScheduler {
    queue: TimerQueue<Instant>,
}

impl SystemScheduler {
    /// Create an empty scheduler
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for SystemScheduler {
    fn after(&mut self, delay: Duration) -> TimerId {
        self.queue.push(Instant::now() + delay)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.queue.remove(id)
    }

    fn due(&mut self) -> Vec<TimerId> {
        self.queue.drain_until(Instant::now())
    }

    fn pending(&self) -> usize {
        self.queue.timers.len()
    }
}

/// Scheduler with a hand-cranked clock
///
/// Time only moves when [`VirtualScheduler::advance`] is called, which lets
/// tests step through delays synchronously.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    queue: TimerQueue<Duration>,
}

impl VirtualScheduler {
    /// Create a scheduler at virtual time zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the virtual clock forward
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Current virtual time
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }
}

impl Scheduler for VirtualScheduler {
    fn after(&mut self, delay: Duration) -> TimerId {
        self.queue.push(self.now + delay)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.queue.remove(id)
    }

    fn due(&mut self) -> Vec<TimerId> {
        self.queue.drain_until(self.now)
    }

    fn pending(&self) -> usize {
        self.queue.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_virtual_timer_fires_at_deadline() {
        let mut scheduler = VirtualScheduler::new();
        let id = scheduler.after(Duration::from_millis(1500));

        scheduler.advance(Duration::from_millis(1499));
        assert!(scheduler.due().is_empty());

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(scheduler.due(), vec![id]);
        // Fired timers are gone
        assert!(scheduler.due().is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_virtual_timers_fire_in_deadline_order() {
        let mut scheduler = VirtualScheduler::new();
        let slow = scheduler.after(Duration::from_millis(300));
        let fast = scheduler.after(Duration::from_millis(100));
        let tie = scheduler.after(Duration::from_millis(300));

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(scheduler.due(), vec![fast, slow, tie]);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = VirtualScheduler::new();
        let id = scheduler.after(Duration::from_millis(10));
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));

        scheduler.advance(Duration::from_millis(20));
        assert!(scheduler.due().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut scheduler = VirtualScheduler::new();
        let a = scheduler.after(Duration::ZERO);
        let b = scheduler.after(Duration::ZERO);
        assert_ne!(a, b);
    }

    #[test]
    fn test_system_zero_delay_is_due() {
        let mut scheduler = SystemScheduler::new();
        let id = scheduler.after(Duration::ZERO);
        let later = scheduler.after(Duration::from_secs(3600));
        assert_eq!(scheduler.due(), vec![id]);
        assert_eq!(scheduler.pending(), 1);
        assert!(scheduler.cancel(later));
    }
}
