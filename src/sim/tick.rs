//! Per-frame step
//!
//! Order matters: collisions are checked against last frame's positions,
//! then everything moves, then everything is redrawn.

use super::arena::{Arena, Canvas};
use super::state::{Field, GamePhase};

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The player hit this obstacle; nothing was moved or drawn
    Collided { obstacle: usize },
    /// Entities advanced and were redrawn
    Advanced,
    /// Phase is Ended, nothing to do
    Frozen,
}

/// Advance the field by one tick and redraw it
pub fn tick<C: Canvas + ?Sized>(field: &mut Field, phase: GamePhase, arena: &Arena, canvas: &mut C) -> FrameOutcome {
    let running = phase == GamePhase::Running;

    if running {
        if let Some(obstacle) = field.first_collision() {
            return FrameOutcome::Collided { obstacle };
        }
    }

    if phase == GamePhase::Ended {
        return FrameOutcome::Frozen;
    }

    arena.clear(canvas);

    if running {
        if let Some(player) = field.player.as_mut() {
            player.advance();
        }
    }
    for obstacle in &mut field.obstacles {
        obstacle.advance();
    }

    if running {
        if let Some(player) = field.player.as_ref() {
            player.draw(canvas);
        }
    }
    for obstacle in &field.obstacles {
        obstacle.draw(canvas);
    }

    FrameOutcome::Advanced
}
