//! Gray Dodge - survive a drifting field of gray blocks
//!
//! Core modules:
//! - `sim`: Entities, spawn policy, interval scheduler and the per-frame step
//! - `session`: Menu / Running / Ended phase machine
//! - `highscores`: Best score cache and replacement policy
//! - `persistence`: Best score storage backends
//! - `platform`: Rendering, overlay and input collaborators (terminal frontend)
//! - `settings`: Data-driven game configuration

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, StoreError};
pub use highscores::BestScore;
pub use session::Session;
pub use settings::GameConfig;

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    /// Frame updates per second
    pub const FPS: u32 = 30;
    /// Obstacles generated per spawn batch
    pub const NUM_OBSTACLES: usize = 100;
    /// Spawn-refresh period (every 3 seconds)
    pub const SPAWN_INTERVAL_MS: u64 = 3 * 1000;

    /// Per-axis obstacle speed range (surface units per tick)
    pub const MIN_SPEED: f32 = 0.1;
    pub const MAX_SPEED: f32 = 2.0;

    /// Obstacle side length range
    pub const MIN_WIDTH: f32 = 2.0;
    pub const MAX_WIDTH: f32 = 10.0;

    /// How far past the surface edges obstacles may spawn
    pub const SPAWN_OFFSET: f32 = MAX_WIDTH * 10.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = MAX_SPEED;
    pub const PLAYER_SIZE: f32 = MAX_WIDTH;

    /// Surface dimensions
    pub const SURFACE_WIDTH: u32 = 800;
    pub const SURFACE_HEIGHT: u32 = 480;
}

/// Format a duration in milliseconds as `MM:SS:mmm`
///
/// Minutes are not wrapped into hours, so an hour reads `60:00:000`.
pub fn format_score(score_ms: u64) -> String {
    let minutes = score_ms / (60 * 1000);
    let seconds = (score_ms % (60 * 1000)) / 1000;
    let millis = score_ms % 1000;
    format!("{:02}:{:02}:{:03}", minutes, seconds, millis)
}
