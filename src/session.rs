//! Session phase machine
//!
//! A session owns every piece of mutable game state: the scheduler and its
//! two timers, the arena, the spawner, the player and the obstacles. Every
//! phase change cancels the running timers before creating new ones, so at
//! most one tick and one spawn-refresh timer exist at any time.

use glam::Vec2;

use crate::error::ConfigError;
use crate::format_score;
use crate::highscores::BestScore;
use crate::persistence::ScoreStore;
use crate::platform::Frontend;
use crate::settings::GameConfig;
use crate::sim::{
    Arena, Direction, Entity, Field, FrameOutcome, GamePhase, Scheduler, SpawnParams, Spawner, Surface,
    TimerHandle, TimerKind, tick,
};

/// Upper bound on timer firings handled by one [`Session::advance`] call
pub const MAX_FIRINGS_PER_ADVANCE: usize = 256;

/// One game instance
#[derive(Debug)]
pub struct Session<S: ScoreStore> {
    config: GameConfig,
    phase: GamePhase,
    scheduler: Scheduler,
    arena: Arena,
    spawner: Spawner,
    field: Field,
    spawn_timer: Option<TimerHandle>,
    start_time_ms: Option<u64>,
    last_score_ms: Option<u64>,
    best: BestScore,
    store: S,
}

impl<S: ScoreStore> Session<S> {
    /// Create an idle session. Nothing runs until [`Session::show_main_menu`]
    /// or [`Session::start_game`] is called.
    pub fn new(config: GameConfig, store: S, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let arena = Self::make_arena(&config);
        let spawner = Spawner::new(SpawnParams::from(&config), seed);
        log::info!(
            "Session created: {}x{} surface, {} fps, seed {}",
            config.surface_width,
            config.surface_height,
            config.fps,
            seed
        );
        Ok(Self {
            config,
            phase: GamePhase::Menu,
            scheduler: Scheduler::new(),
            arena,
            spawner,
            field: Field::default(),
            spawn_timer: None,
            start_time_ms: None,
            last_score_ms: None,
            best: BestScore::new(),
            store,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> Option<&Entity> {
        self.field.player.as_ref()
    }

    pub fn obstacles(&self) -> &[Entity] {
        &self.field.obstacles
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Cached best score (loaded lazily at the end of the first run)
    pub fn best_score(&self) -> Option<u64> {
        self.best.get()
    }

    /// Score of the most recently finished run
    pub fn last_score(&self) -> Option<u64> {
        self.last_score_ms
    }

    /// Time survived so far, while running
    pub fn elapsed_ms(&self, now_ms: u64) -> Option<u64> {
        match self.phase {
            GamePhase::Running => self.start_time_ms.map(|start| now_ms.saturating_sub(start)),
            _ => None,
        }
    }

    /// Enter the idle menu: obstacles drift in the background, no player
    pub fn show_main_menu<F: Frontend + ?Sized>(&mut self, now_ms: u64, ui: &mut F) {
        self.cancel_timers();
        self.arena.clear(ui);
        ui.hide_end_overlay();

        self.phase = GamePhase::Menu;
        self.start_time_ms = None;
        self.arena = Self::make_arena(&self.config);
        self.field = Field {
            player: None,
            obstacles: self.fresh_batch(),
        };
        self.start_timers(now_ms);

        ui.show_start_overlay();
        log::info!("Main menu");
    }

    /// Begin a run with a fresh arena, player and obstacle batch
    pub fn start_game<F: Frontend + ?Sized>(&mut self, now_ms: u64, ui: &mut F) {
        if self.phase == GamePhase::Ended {
            ui.hide_end_overlay();
        }
        ui.hide_start_overlay();
        self.cancel_timers();
        self.arena.clear(ui);

        self.arena = Self::make_arena(&self.config);
        let (w, h) = self.arena.surface().size_f32();
        self.field = Field {
            player: Some(Entity::player(Vec2::new(w / 2.0, h / 2.0), self.config.player_size)),
            obstacles: self.fresh_batch(),
        };

        self.phase = GamePhase::Running;
        self.start_timers(now_ms);
        self.start_time_ms = Some(now_ms);
        log::info!("Game started at {} ms", now_ms);
    }

    /// Apply a direction key. Input is only bound while running.
    pub fn steer(&mut self, direction: Direction) {
        if self.phase != GamePhase::Running {
            return;
        }
        if let Some(player) = self.field.player.as_mut() {
            player.steer(direction, self.config.player_speed);
        }
    }

    /// Run timer firings due at or before `now_ms` in time order; returns how
    /// many fired.
    ///
    /// At most [`MAX_FIRINGS_PER_ADVANCE`] run per call. Anything still due
    /// stays pending and runs on the next call, so a large clock jump is worked
    /// off over several frames instead of stalling one.
    pub fn advance<F: Frontend + ?Sized>(&mut self, now_ms: u64, ui: &mut F) -> usize {
        let mut fired = 0;
        while fired < MAX_FIRINGS_PER_ADVANCE {
            let Some(firing) = self.scheduler.pop_due(now_ms) else {
                break;
            };
            fired += 1;
            match firing.kind {
                TimerKind::Tick => self.update_frame(firing.at_ms, ui),
                TimerKind::SpawnRefresh => self.refresh_obstacles(),
            }
        }
        fired
    }

    /// One frame: collision check, then move and redraw
    pub fn update_frame<F: Frontend + ?Sized>(&mut self, at_ms: u64, ui: &mut F) {
        if let FrameOutcome::Collided { obstacle } = tick(&mut self.field, self.phase, &self.arena, ui) {
            log::debug!("Player hit obstacle {} at {} ms", obstacle, at_ms);
            self.end_game(at_ms, ui);
        }
    }

    /// Cull off-surface obstacles and add a new batch
    pub fn refresh_obstacles(&mut self) {
        let (w, h) = self.arena.surface().size_f32();
        let current = std::mem::take(&mut self.field.obstacles);
        self.field.obstacles = self.spawner.refresh(current, w, h);
    }

    fn end_game<F: Frontend + ?Sized>(&mut self, at_ms: u64, ui: &mut F) {
        let score = at_ms.saturating_sub(self.start_time_ms.unwrap_or(at_ms));

        self.phase = GamePhase::Ended;
        self.cancel_timers();
        self.field.player = None;
        self.last_score_ms = Some(score);

        self.best.record(score, &mut self.store);
        let best = self.best.get().unwrap_or(score);

        log::info!("Game over: survived {} (best {})", format_score(score), format_score(best));
        ui.show_end_overlay(&format_score(score), &format_score(best));
    }

    fn start_timers(&mut self, now_ms: u64) {
        self.spawn_timer = Some(self.scheduler.set_interval(
            TimerKind::SpawnRefresh,
            self.config.spawn_interval_ms,
            now_ms,
        ));
        self.arena.start(&mut self.scheduler, now_ms);
    }

    fn cancel_timers(&mut self) {
        if let Some(handle) = self.spawn_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.arena.stop(&mut self.scheduler);
    }

    fn fresh_batch(&mut self) -> Vec<Entity> {
        let (w, h) = self.arena.surface().size_f32();
        self.spawner.spawn_batch(Vec::new(), w, h)
    }

    fn make_arena(config: &GameConfig) -> Arena {
        Arena::new(
            Surface::new(config.surface_width, config.surface_height),
            config.tick_interval_ms(),
        )
    }
}
