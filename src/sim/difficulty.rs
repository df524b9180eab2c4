//! Difficulty ramp: scroll speed grows linearly with running time

use serde::{Deserialize, Serialize};

/// Current scroll speed and the constants that drive it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub base_speed: f32,
    pub speed: f32,
    /// px/s gained per second
    pub ramp: f32,
}

impl Difficulty {
    pub fn new(base_speed: f32, ramp: f32) -> Self {
        Self {
            base_speed,
            speed: base_speed,
            ramp,
        }
    }

    pub fn reset(&mut self) {
        self.speed = self.base_speed;
    }

    /// Uncapped linear growth
    pub fn update(&mut self, dt: f32) {
        self.speed += self.ramp * dt;
    }

    /// Current speed relative to the starting speed
    pub fn multiplier(&self) -> f32 {
        self.speed / self.base_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_over_ten_seconds() {
        let mut difficulty = Difficulty::new(200.0, 3.0);
        // 10 s in 16 ms steps
        for _ in 0..625 {
            difficulty.update(0.016);
        }
        assert!((difficulty.speed - 230.0).abs() < 0.05, "speed {}", difficulty.speed);
        assert!((difficulty.multiplier() - 1.15).abs() < 1e-3);
    }

    #[test]
    fn test_reset_restores_base() {
        let mut difficulty = Difficulty::new(300.0, 6.0);
        difficulty.update(5.0);
        assert_eq!(difficulty.speed, 330.0);
        difficulty.reset();
        assert_eq!(difficulty.speed, 300.0);
        assert_eq!(difficulty.multiplier(), 1.0);
    }
}
