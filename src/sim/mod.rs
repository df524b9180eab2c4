//! Simulation module
//!
//! All gameplay logic lives here:
//! - Variable timestep, clamped by the controller
//! - Randomness injected through `UniformSource`
//! - Fixed per-frame update order
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod obstacles;
pub mod player;
pub mod rng;
pub mod score;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Rect, any_overlap, overlaps};
pub use difficulty::Difficulty;
pub use obstacles::{InvalidObstacle, Obstacle, ObstacleField, ObstacleSpec, next_spawn_interval};
pub use player::Player;
pub use rng::{EntropySource, ScriptedSource, SeededSource, UniformSource};
pub use score::{GameOverReport, ScoreKeeper};
pub use snapshot::RenderSnapshot;
pub use state::{Command, GameEvent, RunController, RunPhase, Viewport};
pub use tick::{TickOutcome, clamp_dt};
