//! Run state and the controller that owns the whole simulation
//!
//! One `RunController` holds every piece of mutable game state. The host
//! feeds it frame deltas and input commands; nothing here is global.

use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::obstacles::{InvalidObstacle, ObstacleField, ObstacleSpec};
use super::player::Player;
use super::rng::{EntropySource, UniformSource};
use super::score::{GameOverReport, ScoreKeeper};
use crate::best_score::BestScore;
use crate::consts::*;
use crate::ground_line;
use crate::persistence::{KeyValueStore, MemoryStore};
use crate::tuning::Tuning;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Waiting for the first start
    Ready,
    /// Simulation advancing
    Running,
    /// Collision happened; state frozen until restart
    GameOver,
}

/// Abstract input commands (device mapping is the host's job)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Jump,
    Restart,
}

/// Notable things that happened, for audio/HUD on the host side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Jumped,
    Landed,
    ObstacleSpawned { id: u32 },
    GameOver(GameOverReport),
}

/// World dimensions supplied by the host each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub world_width: f32,
    pub ground_y: f32,
}

impl Viewport {
    pub fn new(world_width: f32, ground_y: f32) -> Self {
        Self {
            world_width,
            ground_y,
        }
    }

    /// Ground line at the standard fraction of the canvas height
    pub fn from_canvas(width: f32, height: f32) -> Self {
        Self::new(width, ground_line(height))
    }

    pub fn is_valid(&self) -> bool {
        self.world_width.is_finite()
            && self.world_width > 0.0
            && self.ground_y.is_finite()
            && self.ground_y > 0.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_canvas(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT)
    }
}

/// Owns the player, obstacles, difficulty, score and best-score storage
pub struct RunController<R: UniformSource = EntropySource> {
    pub(crate) tuning: Tuning,
    pub(crate) viewport: Viewport,
    pub(crate) phase: RunPhase,
    pub(crate) player: Player,
    pub(crate) field: ObstacleField,
    pub(crate) difficulty: Difficulty,
    pub(crate) score: ScoreKeeper,
    pub(crate) rng: R,
    pub(crate) store: Box<dyn KeyValueStore>,
    pub(crate) events: Vec<GameEvent>,
    /// Frames simulated in the current run
    pub(crate) frame: u64,
    /// Seconds simulated in the current run
    pub(crate) elapsed: f32,
}

impl RunController<EntropySource> {
    /// Default tuning, default viewport, unseeded randomness, best score read
    /// from `store`
    pub fn with_store(store: impl KeyValueStore + 'static) -> Self {
        Self::new(Tuning::default(), Viewport::default(), EntropySource::new(), store)
    }
}

impl<R: UniformSource> RunController<R> {
    pub fn new(
        tuning: Tuning,
        viewport: Viewport,
        rng: R,
        store: impl KeyValueStore + 'static,
    ) -> Self {
        let store: Box<dyn KeyValueStore> = Box::new(store);
        let best = BestScore::load(&*store);
        Self {
            player: Player::new(viewport.ground_y),
            field: ObstacleField::new(tuning.initial_spawn_delay),
            difficulty: Difficulty::new(tuning.base_speed, tuning.speed_ramp),
            score: ScoreKeeper::new(tuning.score_rate, best.value),
            phase: RunPhase::Ready,
            tuning,
            viewport,
            rng,
            store,
            events: Vec::new(),
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Controller with a throwaway in-memory store
    pub fn ephemeral(tuning: Tuning, viewport: Viewport, rng: R) -> Self {
        Self::new(tuning, viewport, rng, MemoryStore::new())
    }

    /// Start a fresh run from any phase
    pub fn reset(&mut self) {
        self.player.reset(self.viewport.ground_y);
        self.score.reset();
        self.difficulty.reset();
        self.field.reset(self.tuning.initial_spawn_delay);
        self.frame = 0;
        self.elapsed = 0.0;
        self.phase = RunPhase::Running;
        self.events.push(GameEvent::Started);
        log::info!("Run started (best {})", self.score.best());
    }

    /// Restart only when no run is in progress. Returns true if a run started.
    pub fn restart_requested(&mut self) -> bool {
        if self.phase == RunPhase::Running {
            return false;
        }
        self.reset();
        true
    }

    /// Jump if running and grounded. Returns true if the jump happened.
    pub fn jump(&mut self) -> bool {
        if self.phase != RunPhase::Running {
            return false;
        }
        let jumped = self.player.jump();
        if jumped {
            self.events.push(GameEvent::Jumped);
        }
        jumped
    }

    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Jump => self.jump(),
            Command::Restart => self.restart_requested(),
        }
    }

    /// Take a new viewport from the host. Invalid sizes are ignored.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if !viewport.is_valid() {
            log::warn!("Ignoring invalid viewport {viewport:?}");
            return;
        }
        self.viewport = viewport;
        if self.phase != RunPhase::GameOver {
            self.player.follow_ground(viewport.ground_y);
        }
    }

    /// Place an externally described obstacle on the ground line
    pub fn insert_obstacle(&mut self, spec: ObstacleSpec) -> Result<u32, InvalidObstacle> {
        self.field.insert(spec, self.viewport.ground_y)
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// End the run: freeze, settle the best score and persist it if improved
    pub(crate) fn game_over(&mut self) -> GameOverReport {
        self.phase = RunPhase::GameOver;
        let report = self.score.finalize();
        if report.new_best {
            if let Err(e) = BestScore::new(report.best).save(&mut *self.store) {
                log::warn!("Could not save best score: {e}");
            }
        }
        self.events.push(GameEvent::GameOver(report));
        log::info!(
            "Game over after {:.1}s: score {} (best {}{})",
            self.elapsed,
            report.score,
            report.best,
            if report.new_best { ", new best" } else { "" }
        );
        report
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.field
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn speed(&self) -> f32 {
        self.difficulty.speed
    }

    pub fn score(&self) -> &ScoreKeeper {
        &self.score
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
