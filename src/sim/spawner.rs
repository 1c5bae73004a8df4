//! Obstacle spawn policy
//!
//! Obstacles are always born outside the visible surface and drift across it.
//! Every spawn-refresh culls the ones that are not fully on screen and adds a
//! fresh batch.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Color, Entity};
use crate::settings::GameConfig;

/// Gray channel range (upper bound exclusive)
const GRAY_MIN: u8 = 100;
const GRAY_MAX: u8 = 220;

/// Spawn parameters extracted from [`GameConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    pub batch_size: usize,
    pub max_obstacles: Option<usize>,
    pub min_width: f32,
    pub max_width: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub offset: f32,
}

impl From<&GameConfig> for SpawnParams {
    fn from(config: &GameConfig) -> Self {
        Self {
            batch_size: config.num_obstacles,
            max_obstacles: config.max_obstacles,
            min_width: config.min_width,
            max_width: config.max_width,
            min_speed: config.min_speed,
            max_speed: config.max_speed,
            offset: config.spawn_offset,
        }
    }
}

/// Seeded obstacle factory
#[derive(Debug, Clone)]
pub struct Spawner {
    params: SpawnParams,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(params: SpawnParams, seed: u64) -> Self {
        Self {
            params,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Create one obstacle somewhere in the band around the surface.
    ///
    /// Positions are rejection-sampled until both coordinates fall outside
    /// the surface, using the global max width rather than the obstacle's own.
    /// There is no iteration cap: a non-positive offset never terminates,
    /// which [`GameConfig::validate`] rules out.
    pub fn spawn_one(&mut self, surface_w: f32, surface_h: f32) -> Entity {
        let p = self.params;

        let gray = self.rng.random_range(GRAY_MIN..GRAY_MAX);
        let width = self.sample(p.min_width, p.max_width);

        let (x, y) = loop {
            let x = self.sample(-p.offset, surface_w + p.offset);
            let y = self.sample(-p.offset, surface_h + p.offset);
            if (x < -p.max_width || x > surface_w) && (y < -p.max_width || y > surface_h) {
                break (x, y);
            }
        };

        let vel = Vec2::new(self.random_component_speed(), self.random_component_speed());

        Entity::obstacle(Vec2::new(x, y), width, vel, Color::Gray(gray))
    }

    /// Append a fresh batch to `existing` and return the combined collection
    pub fn spawn_batch(&mut self, mut existing: Vec<Entity>, surface_w: f32, surface_h: f32) -> Vec<Entity> {
        existing.reserve(self.params.batch_size);
        for _ in 0..self.params.batch_size {
            existing.push(self.spawn_one(surface_w, surface_h));
        }
        existing
    }

    /// Keep the obstacles fully on the surface, drop the rest and add a new batch.
    ///
    /// With `max_obstacles` set, the oldest survivors are kept first and the
    /// rest are dropped so the new batch always fits.
    pub fn refresh(&mut self, current: Vec<Entity>, surface_w: f32, surface_h: f32) -> Vec<Entity> {
        let mut kept: Vec<Entity> = current
            .into_iter()
            .filter(|e| e.is_within_surface(surface_w, surface_h))
            .collect();

        if let Some(cap) = self.params.max_obstacles {
            kept.truncate(cap.saturating_sub(self.params.batch_size));
        }

        let kept_count = kept.len();
        let obstacles = self.spawn_batch(kept, surface_w, surface_h);
        log::debug!(
            "Spawn refresh: kept {} on-surface obstacles, {} total",
            kept_count,
            obstacles.len()
        );
        obstacles
    }

    /// Uniform in `[lo, hi)`, or `lo` for an empty range
    fn sample(&mut self, lo: f32, hi: f32) -> f32 {
        if hi > lo { self.rng.random_range(lo..hi) } else { lo }
    }

    /// Magnitude in the speed range with a random sign
    fn random_component_speed(&mut self) -> f32 {
        let magnitude = self.sample(self.params.min_speed, self.params.max_speed);
        if self.rng.random_bool(0.5) { magnitude } else { -magnitude }
    }
}
