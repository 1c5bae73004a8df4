//! Simulation module
//!
//! Everything that moves and decides lives here. No terminal, storage or
//! wall-clock dependencies:
//! - Time is fed in as milliseconds
//! - Seeded RNG only
//! - Drawing goes through the [`Canvas`] trait

pub mod arena;
pub mod collision;
pub mod entity;
pub mod scheduler;
pub mod spawner;
pub mod state;
pub mod tick;

pub use arena::{Arena, Canvas, Surface};
pub use collision::Aabb;
pub use entity::{Color, Direction, Entity, Role};
pub use scheduler::{Firing, Scheduler, TimerHandle, TimerKind};
pub use spawner::{SpawnParams, Spawner};
pub use state::{Field, GamePhase};
pub use tick::{FrameOutcome, tick};
