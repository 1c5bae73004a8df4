//! Platform collaborators
//!
//! The session only talks to the outside world through these traits:
//! - [`Canvas`]: clear / draw rectangles
//! - [`Overlays`]: start and end-of-run dialogs
//!
//! [`terminal`] implements both for a crossterm terminal.

pub mod terminal;

pub use crate::sim::Canvas;
pub use terminal::{ScreenGuard, TerminalFrontend};

/// Dialog show/hide signals, sent only at phase boundaries
pub trait Overlays {
    fn show_start_overlay(&mut self);
    fn hide_start_overlay(&mut self);
    fn show_end_overlay(&mut self, score: &str, best_score: &str);
    fn hide_end_overlay(&mut self);
}

/// Everything a session needs to present itself
pub trait Frontend: Canvas + Overlays {}

impl<T: Canvas + Overlays + ?Sized> Frontend for T {}
