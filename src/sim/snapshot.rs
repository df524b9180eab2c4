//! Read-only frame snapshot for the renderer
//!
//! The renderer never sees the controller itself, only this copy.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::rng::UniformSource;
use super::state::{RunController, RunPhase};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub phase: RunPhase,
    pub player: Rect,
    pub grounded: bool,
    pub obstacles: Vec<Rect>,
    /// Floored score
    pub score: u64,
    pub best: u64,
    pub speed: f32,
    pub world_width: f32,
    pub ground_y: f32,
}

impl<R: UniformSource> RunController<R> {
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            phase: self.phase,
            player: self.player.rect(),
            grounded: self.player.grounded,
            obstacles: self.field.obstacles().iter().map(|o| *o.rect()).collect(),
            score: self.score.display_score(),
            best: self.score.best(),
            speed: self.difficulty.speed,
            world_width: self.viewport.world_width,
            ground_y: self.viewport.ground_y,
        }
    }
}
