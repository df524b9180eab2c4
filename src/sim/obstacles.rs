//! Obstacle field: spawning, scrolling and cleanup
//!
//! Obstacles stand on the ground line, enter from the right edge and scroll
//! left at the current speed. The spawn interval shrinks a little as speed
//! rises so obstacle spacing on screen stays roughly constant.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::rng::UniformSource;
use crate::lerp_range;
use crate::tuning::Tuning;

/// Rejected obstacle geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidObstacle {
    pub reason: &'static str,
}

impl fmt::Display for InvalidObstacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid obstacle: {}", self.reason)
    }
}

impl std::error::Error for InvalidObstacle {}

/// Untrusted obstacle description (e.g. from a host or a level script)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

/// A ground obstacle. Fields are private so a live obstacle is always valid:
/// finite coordinates, positive size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Obstacle {
    id: u32,
    rect: Rect,
}

impl Obstacle {
    /// Build an obstacle resting on `ground_y`
    pub fn new(id: u32, spec: ObstacleSpec, ground_y: f32) -> Result<Self, InvalidObstacle> {
        let ObstacleSpec { x, width, height } = spec;
        if !(x.is_finite() && width.is_finite() && height.is_finite() && ground_y.is_finite()) {
            return Err(InvalidObstacle {
                reason: "non-finite coordinate",
            });
        }
        if width <= 0.0 {
            return Err(InvalidObstacle {
                reason: "width must be positive",
            });
        }
        if height <= 0.0 {
            return Err(InvalidObstacle {
                reason: "height must be positive",
            });
        }
        Ok(Self {
            id,
            rect: Rect::new(x, ground_y - height, width, height),
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn x(&self) -> f32 {
        self.rect.pos.x
    }

    pub fn right(&self) -> f32 {
        self.rect.right()
    }
}

/// Live obstacles plus the spawn countdown
#[derive(Debug, Clone, Serialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    /// Seconds until the next spawn
    spawn_timer: f32,
    next_id: u32,
}

impl ObstacleField {
    pub fn new(initial_delay: f32) -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_timer: initial_delay,
            next_id: 1,
        }
    }

    /// Drop every obstacle and restart the countdown
    pub fn reset(&mut self, initial_delay: f32) {
        self.obstacles.clear();
        self.spawn_timer = initial_delay;
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    /// Place an obstacle directly, bypassing the spawner
    pub fn insert(&mut self, spec: ObstacleSpec, ground_y: f32) -> Result<u32, InvalidObstacle> {
        let obstacle = Obstacle::new(self.next_id, spec, ground_y)?;
        self.next_id += 1;
        let id = obstacle.id;
        self.obstacles.push(obstacle);
        Ok(id)
    }

    /// Spawn (at most once), scroll and prune. Returns the id of a newly
    /// spawned obstacle, if any.
    pub fn update(
        &mut self,
        dt: f32,
        speed: f32,
        world_width: f32,
        ground_y: f32,
        tuning: &Tuning,
        rng: &mut impl UniformSource,
    ) -> Option<u32> {
        let mut spawned = None;

        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            let spec = ObstacleSpec {
                x: world_width + tuning.spawn_margin,
                height: lerp_range(tuning.obstacle_height, rng.next_uniform()),
                width: lerp_range(tuning.obstacle_width, rng.next_uniform()),
            };
            match self.insert(spec, ground_y) {
                Ok(id) => {
                    log::debug!("Spawned obstacle {id} ({:.0}x{:.0})", spec.width, spec.height);
                    spawned = Some(id);
                }
                Err(e) => log::warn!("Skipped spawn: {e}"),
            }
            self.spawn_timer = next_spawn_interval(speed, tuning, rng.next_uniform());
        }

        let shift = speed * dt;
        for obstacle in &mut self.obstacles {
            obstacle.rect.pos.x -= shift;
        }

        let cleanup_x = tuning.cleanup_x;
        self.obstacles.retain(|o| o.right() >= cleanup_x);

        spawned
    }
}

/// Seconds until the next spawn for a given speed and uniform sample
pub fn next_spawn_interval(speed: f32, tuning: &Tuning, sample: f32) -> f32 {
    let relief = (speed / tuning.speed_relief_divisor).min(tuning.speed_relief_cap);
    tuning.spawn_interval_min + sample * tuning.spawn_interval_jitter - relief
}
