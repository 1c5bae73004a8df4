//! Virtual-clock interval timers
//!
//! Single-threaded and cooperative: the owner feeds the current time in and
//! drains due firings one at a time with [`Scheduler::pop_due`]. Handlers may
//! cancel or create timers between pops.

/// Opaque handle returned by [`Scheduler::set_interval`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// What a timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Frame update
    Tick,
    /// Obstacle population churn
    SpawnRefresh,
}

/// One due firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Firing {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    /// Scheduled time of this firing (ms)
    pub at_ms: u64,
}

#[derive(Debug, Clone)]
struct Interval {
    handle: TimerHandle,
    kind: TimerKind,
    period_ms: u64,
    next_due_ms: u64,
}

/// Set of repeating timers
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    intervals: Vec<Interval>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a repeating timer whose first firing is one period after `now_ms`
    pub fn set_interval(&mut self, kind: TimerKind, period_ms: u64, now_ms: u64) -> TimerHandle {
        let period_ms = period_ms.max(1);
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.intervals.push(Interval {
            handle,
            kind,
            period_ms,
            next_due_ms: now_ms + period_ms,
        });
        handle
    }

    /// Stop a timer. Unknown or already-cancelled handles are ignored.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.intervals.len();
        self.intervals.retain(|i| i.handle != handle);
        self.intervals.len() != before
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.intervals.iter().any(|i| i.handle == handle)
    }

    /// Number of live timers of a kind
    pub fn active_count(&self, kind: TimerKind) -> usize {
        self.intervals.iter().filter(|i| i.kind == kind).count()
    }

    /// Take the earliest firing due at or before `now_ms`.
    ///
    /// Ties go to the older timer. A timer that is several periods behind
    /// fires once per pop until it catches up with `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Firing> {
        let interval = self
            .intervals
            .iter_mut()
            .filter(|i| i.next_due_ms <= now_ms)
            .min_by_key(|i| (i.next_due_ms, i.handle))?;

        let firing = Firing {
            handle: interval.handle,
            kind: interval.kind,
            at_ms: interval.next_due_ms,
        };

        interval.next_due_ms += interval.period_ms;

        Some(firing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_fires_each_period() {
        let mut sched = Scheduler::new();
        let h = sched.set_interval(TimerKind::Tick, 33, 0);

        assert_eq!(sched.pop_due(32), None);
        let f = sched.pop_due(33).unwrap();
        assert_eq!((f.handle, f.kind, f.at_ms), (h, TimerKind::Tick, 33));
        assert_eq!(sched.pop_due(33), None);
        assert_eq!(sched.pop_due(66).unwrap().at_ms, 66);
    }

    #[test]
    fn test_firings_come_in_time_order() {
        let mut sched = Scheduler::new();
        sched.set_interval(TimerKind::SpawnRefresh, 50, 0);
        sched.set_interval(TimerKind::Tick, 20, 0);

        let mut order = Vec::new();
        while let Some(f) = sched.pop_due(60) {
            order.push((f.kind, f.at_ms));
        }
        assert_eq!(
            order,
            vec![
                (TimerKind::Tick, 20),
                (TimerKind::Tick, 40),
                (TimerKind::SpawnRefresh, 50),
                (TimerKind::Tick, 60),
            ]
        );
    }

    #[test]
    fn test_ties_go_to_older_timer() {
        let mut sched = Scheduler::new();
        let first = sched.set_interval(TimerKind::SpawnRefresh, 10, 0);
        let second = sched.set_interval(TimerKind::Tick, 10, 0);
        assert_eq!(sched.pop_due(10).unwrap().handle, first);
        assert_eq!(sched.pop_due(10).unwrap().handle, second);
    }

    #[test]
    fn test_late_timer_catches_up() {
        let mut sched = Scheduler::new();
        sched.set_interval(TimerKind::Tick, 10, 0);
        let mut fired = 0;
        while sched.pop_due(100).is_some() {
            fired += 1;
        }
        assert_eq!(fired, 10);
        assert_eq!(sched.pop_due(109), None);
        assert_eq!(sched.pop_due(110).unwrap().at_ms, 110);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut sched = Scheduler::new();
        let h = sched.set_interval(TimerKind::Tick, 10, 0);
        assert!(sched.is_active(h));
        assert!(sched.cancel(h));
        assert!(!sched.cancel(h));
        assert!(!sched.is_active(h));
        assert_eq!(sched.active_count(TimerKind::Tick), 0);
        assert_eq!(sched.pop_due(100), None);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut sched = Scheduler::new();
        sched.set_interval(TimerKind::Tick, 0, 5);
        assert_eq!(sched.pop_due(5), None);
        assert_eq!(sched.pop_due(6).unwrap().at_ms, 6);
    }
}
