//! Data-driven game balance
//!
//! Gravity and the jump impulse are fixed in [`crate::consts`]; they define the
//! jump arc. Everything here is pacing and can be loaded from JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a tuning document is rejected
#[derive(Debug)]
pub enum TuningError {
    /// The document is not valid JSON for [`Tuning`]
    Parse(serde_json::Error),
    /// A field is non-finite or out of its allowed range
    Invalid {
        field: &'static str,
        value: f32,
    },
    /// A (min, max) pair has min > max
    InvertedRange {
        field: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "invalid tuning document: {e}"),
            TuningError::Invalid { field, value } => {
                write!(f, "tuning field `{field}` has invalid value {value}")
            }
            TuningError::InvertedRange { field } => {
                write!(f, "tuning range `{field}` has min greater than max")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Balance parameters for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Scroll speed at run start (px/s)
    pub base_speed: f32,
    /// Scroll speed gained per second (px/s²)
    pub speed_ramp: f32,
    /// Largest frame delta integrated in one tick (s)
    pub max_frame_dt: f32,
    /// Countdown before the first obstacle (s)
    pub initial_spawn_delay: f32,
    /// Shortest spawn interval before jitter and speed relief (s)
    pub spawn_interval_min: f32,
    /// Random extra added to the spawn interval (s)
    pub spawn_interval_jitter: f32,
    /// Upper bound on the speed-dependent interval reduction (s)
    pub speed_relief_cap: f32,
    /// Speed divisor for the interval reduction
    pub speed_relief_divisor: f32,
    /// Distance past the right edge where obstacles appear (px)
    pub spawn_margin: f32,
    /// Obstacles whose right edge is left of this are pruned (px)
    pub cleanup_x: f32,
    /// Obstacle height range (px)
    pub obstacle_height: (f32, f32),
    /// Obstacle width range (px)
    pub obstacle_width: (f32, f32),
    /// Points per second at base speed
    pub score_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: BASE_SPEED,
            speed_ramp: SPEED_RAMP,
            max_frame_dt: MAX_FRAME_DT,
            initial_spawn_delay: INITIAL_SPAWN_DELAY,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_jitter: SPAWN_INTERVAL_JITTER,
            speed_relief_cap: SPEED_RELIEF_CAP,
            speed_relief_divisor: SPEED_RELIEF_DIVISOR,
            spawn_margin: SPAWN_MARGIN,
            cleanup_x: CLEANUP_X,
            obstacle_height: OBSTACLE_HEIGHT_RANGE,
            obstacle_width: OBSTACLE_WIDTH_RANGE,
            score_rate: SCORE_RATE,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Same as default but with a different speed curve
    pub fn with_speed(base_speed: f32, speed_ramp: f32) -> Self {
        Self {
            base_speed,
            speed_ramp,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        positive("base_speed", self.base_speed)?;
        non_negative("speed_ramp", self.speed_ramp)?;
        positive("max_frame_dt", self.max_frame_dt)?;
        non_negative("initial_spawn_delay", self.initial_spawn_delay)?;
        positive("spawn_interval_min", self.spawn_interval_min)?;
        non_negative("spawn_interval_jitter", self.spawn_interval_jitter)?;
        non_negative("speed_relief_cap", self.speed_relief_cap)?;
        positive("speed_relief_divisor", self.speed_relief_divisor)?;
        non_negative("spawn_margin", self.spawn_margin)?;
        finite("cleanup_x", self.cleanup_x)?;
        size_range("obstacle_height", self.obstacle_height)?;
        size_range("obstacle_width", self.obstacle_width)?;
        non_negative("score_rate", self.score_rate)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::Invalid { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid { field, value })
    }
}

fn size_range(field: &'static str, (min, max): (f32, f32)) -> Result<(), TuningError> {
    positive(field, min)?;
    positive(field, max)?;
    if min > max {
        return Err(TuningError::InvertedRange { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 200.0, "speed_ramp": 3.0 }"#).unwrap();
        assert_eq!(tuning.base_speed, 200.0);
        assert_eq!(tuning.speed_ramp, 3.0);
        assert_eq!(tuning.score_rate, SCORE_RATE);
        assert_eq!(tuning.obstacle_width, OBSTACLE_WIDTH_RANGE);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "base_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "base_speed", .. }));

        let err = Tuning::from_json(r#"{ "obstacle_height": [90.0, 30.0] }"#).unwrap_err();
        assert!(matches!(err, TuningError::InvertedRange { field: "obstacle_height" }));

        let err = Tuning::from_json("not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("invalid tuning document"));
    }

    #[test]
    fn test_round_trip_json() {
        let tuning = Tuning::with_speed(250.0, 4.0);
        let json = serde_json::to_string(&tuning).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }
}
