//! Player body: vertical physics for the runner
//!
//! The player never moves horizontally. It is either grounded (resting on the
//! ground line with zero velocity) or airborne under constant gravity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// The player entity, reused across runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x is fixed
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (px/s, positive is down)
    pub vel_y: f32,
    pub grounded: bool,
}

impl Player {
    /// A grounded player standing on `ground_y`
    pub fn new(ground_y: f32) -> Self {
        let mut player = Self {
            pos: Vec2::new(PLAYER_X, 0.0),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel_y: 0.0,
            grounded: true,
        };
        player.snap_to_ground(ground_y);
        player
    }

    /// Put the player back on the ground line at rest
    pub fn reset(&mut self, ground_y: f32) {
        self.pos.x = PLAYER_X;
        self.snap_to_ground(ground_y);
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Feet position
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Start a jump. Returns false (and does nothing) while airborne.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel_y = JUMP_IMPULSE;
        self.grounded = false;
        true
    }

    /// Advance vertical physics by `dt`. Returns true on the frame the player lands.
    pub fn integrate(&mut self, dt: f32, ground_y: f32) -> bool {
        if self.grounded {
            return false;
        }

        self.vel_y += GRAVITY * dt;
        self.pos.y += self.vel_y * dt;

        if self.bottom() >= ground_y {
            self.snap_to_ground(ground_y);
            return true;
        }
        false
    }

    /// Follow a moved ground line (viewport resize). Airborne players keep
    /// flying but are caught if the new ground is above their feet.
    pub fn follow_ground(&mut self, ground_y: f32) {
        if self.grounded || self.bottom() >= ground_y {
            self.snap_to_ground(ground_y);
        }
    }

    fn snap_to_ground(&mut self, ground_y: f32) {
        self.pos.y = ground_y - self.size.y;
        self.vel_y = 0.0;
        self.grounded = true;
    }
}
