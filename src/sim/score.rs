//! Score accrual and best-score tracking

use serde::{Deserialize, Serialize};

/// Result of closing out a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverReport {
    /// Final score, floored
    pub score: u64,
    /// Best score after this run
    pub best: u64,
    /// This run set a new best
    pub new_best: bool,
}

/// Running score and the best floor(score) seen so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreKeeper {
    score: f32,
    best: u64,
    /// Points per second at base speed
    rate: f32,
}

impl ScoreKeeper {
    pub fn new(rate: f32, best: u64) -> Self {
        Self {
            score: 0.0,
            best,
            rate,
        }
    }

    pub fn reset(&mut self) {
        self.score = 0.0;
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Add points for `dt` seconds at `speed`; faster scrolling scores faster
    pub fn accrue(&mut self, dt: f32, speed: f32, base_speed: f32) {
        let gained = self.rate * dt * (speed / base_speed);
        if gained.is_finite() && gained > 0.0 {
            self.score += gained;
        }
    }

    /// Compare the floored score against the best and adopt it if higher
    pub fn finalize(&mut self) -> GameOverReport {
        let score = self.display_score();
        let new_best = score > self.best;
        if new_best {
            self.best = score;
        }
        GameOverReport {
            score,
            best: self.best,
            new_best,
        }
    }
}
