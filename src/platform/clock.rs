//! Frame clock
//!
//! Turns monotonic timestamps (milliseconds, as handed out by
//! `requestAnimationFrame` or a native timer) into clamped frame deltas.

use crate::sim::clamp_dt;

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous sample, clamped to `max_dt`.
    /// The first sample and any backwards step yield 0.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        clamp_dt(dt, self.max_dt)
    }

    /// Rebase after a pause so the gap is not counted as a frame
    pub fn resume(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }
}

/// Milliseconds since the first call (native hosts)
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}
