//! The visible surface and its frame tick

use super::entity::Color;
use super::scheduler::{Scheduler, TimerHandle, TimerKind};

/// Drawing target for one frame
pub trait Canvas {
    fn clear_region(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn draw_filled_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
}

/// Visible surface dimensions, fixed for an arena's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size_f32(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}

/// Owns the surface and the fixed-rate frame tick
#[derive(Debug)]
pub struct Arena {
    surface: Surface,
    tick_period_ms: u64,
    tick: Option<TimerHandle>,
}

impl Arena {
    pub fn new(surface: Surface, tick_period_ms: u64) -> Self {
        Self {
            surface,
            tick_period_ms,
            tick: None,
        }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn tick_handle(&self) -> Option<TimerHandle> {
        self.tick
    }

    pub fn is_running(&self, scheduler: &Scheduler) -> bool {
        self.tick.is_some_and(|h| scheduler.is_active(h))
    }

    /// Start ticking, replacing any tick this arena already had
    pub fn start(&mut self, scheduler: &mut Scheduler, now_ms: u64) {
        self.stop(scheduler);
        self.tick = Some(scheduler.set_interval(TimerKind::Tick, self.tick_period_ms, now_ms));
    }

    /// Cancel the tick; harmless when not running
    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        if let Some(handle) = self.tick.take() {
            scheduler.cancel(handle);
        }
    }

    /// Erase the previous frame
    pub fn clear<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let (w, h) = self.surface.size_f32();
        canvas.clear_region(0.0, 0.0, w, h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingCanvas {
        clears: Vec<(f32, f32, f32, f32)>,
    }

    impl Canvas for CountingCanvas {
        fn clear_region(&mut self, x: f32, y: f32, w: f32, h: f32) {
            self.clears.push((x, y, w, h));
        }
        fn draw_filled_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _color: Color) {}
    }

    #[test]
    fn test_restart_replaces_tick() {
        let mut sched = Scheduler::new();
        let mut arena = Arena::new(Surface::new(100, 50), 33);

        arena.start(&mut sched, 0);
        let first = arena.tick_handle().unwrap();
        arena.start(&mut sched, 10);

        assert_eq!(sched.active_count(TimerKind::Tick), 1);
        assert!(!sched.is_active(first));
        assert!(arena.is_running(&sched));
        assert_eq!(sched.pop_due(43).unwrap().at_ms, 43);
    }

    #[test]
    fn test_stop_twice_is_noop() {
        let mut sched = Scheduler::new();
        let mut arena = Arena::new(Surface::new(100, 50), 33);
        arena.stop(&mut sched);
        arena.start(&mut sched, 0);
        arena.stop(&mut sched);
        arena.stop(&mut sched);
        assert!(!arena.is_running(&sched));
        assert_eq!(sched.active_count(TimerKind::Tick), 0);
    }

    #[test]
    fn test_clear_covers_surface() {
        let arena = Arena::new(Surface::new(100, 50), 33);
        let mut canvas = CountingCanvas::default();
        arena.clear(&mut canvas);
        assert_eq!(canvas.clears, vec![(0.0, 0.0, 100.0, 50.0)]);
    }
}
