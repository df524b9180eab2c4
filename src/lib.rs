//! Panda Runner - A single-lane jump-and-dodge runner
//!
//! Core modules:
//! - `sim`: Simulation (player physics, obstacles, collisions, scoring, run state)
//! - `tuning`: Data-driven game balance
//! - `best_score`: Best score load/save over a key-value store
//! - `persistence`: Key-value store abstraction
//! - `platform`: Browser/native platform abstraction (clock, storage backends)

pub mod best_score;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use best_score::BestScore;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta the simulation will integrate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Default world dimensions (virtual canvas)
    pub const DEFAULT_WORLD_WIDTH: f32 = 900.0;
    pub const DEFAULT_WORLD_HEIGHT: f32 = 400.0;
    /// Ground line as a fraction of world height
    pub const GROUND_RATIO: f32 = 0.8;

    /// Downward acceleration (px/s²)
    pub const GRAVITY: f32 = 2000.0;
    /// Vertical velocity applied on jump (px/s, negative is up)
    pub const JUMP_IMPULSE: f32 = -780.0;

    /// Player box, fixed horizontal position
    pub const PLAYER_X: f32 = 80.0;
    pub const PLAYER_WIDTH: f32 = 64.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;

    /// Scroll speed at run start (px/s)
    pub const BASE_SPEED: f32 = 300.0;
    /// Scroll speed gained per second of running (px/s²)
    pub const SPEED_RAMP: f32 = 6.0;

    /// Delay before the first obstacle of a run (seconds)
    pub const INITIAL_SPAWN_DELAY: f32 = 0.8;
    /// Spawn interval = MIN + U * JITTER - min(SPEED_RELIEF_CAP, speed / SPEED_RELIEF_DIVISOR)
    pub const SPAWN_INTERVAL_MIN: f32 = 0.9;
    pub const SPAWN_INTERVAL_JITTER: f32 = 0.8;
    pub const SPEED_RELIEF_CAP: f32 = 0.6;
    pub const SPEED_RELIEF_DIVISOR: f32 = 1000.0;

    /// Obstacles appear this far past the right edge
    pub const SPAWN_MARGIN: f32 = 20.0;
    /// Obstacles are dropped once their right edge passes this x
    pub const CLEANUP_X: f32 = -50.0;

    /// Obstacle size ranges (min, max)
    pub const OBSTACLE_HEIGHT_RANGE: (f32, f32) = (30.0, 90.0);
    pub const OBSTACLE_WIDTH_RANGE: (f32, f32) = (20.0, 60.0);

    /// Points per second at base speed
    pub const SCORE_RATE: f32 = 10.0;
}

/// Ground line y for a world of the given height
#[inline]
pub fn ground_line(world_height: f32) -> f32 {
    world_height * consts::GROUND_RATIO
}

/// Linear interpolation between `min` and `max` by `t` in [0, 1)
#[inline]
pub fn lerp_range((min, max): (f32, f32), t: f32) -> f32 {
    min + (max - min) * t
}
