//! Browser facade
//!
//! The page owns the canvas, the DOM and device input; it calls into this
//! wrapper once per animation frame and draws from the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::platform::{FrameClock, LocalStorageStore};
use crate::sim::{EntropySource, RunController, RunPhase, Viewport};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Panda Runner starting...");
}

#[wasm_bindgen]
pub struct WasmRunner {
    run: RunController<EntropySource>,
    clock: FrameClock,
}

#[wasm_bindgen]
impl WasmRunner {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_width: f32, canvas_height: f32) -> WasmRunner {
        let tuning = Tuning::default();
        let clock = FrameClock::new(tuning.max_frame_dt);
        let run = RunController::new(
            tuning,
            Viewport::from_canvas(canvas_width, canvas_height),
            EntropySource::new(),
            LocalStorageStore,
        );
        Self { run, clock }
    }

    /// Advance one animation frame. Returns true while a run is in progress.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let dt = self.clock.delta(now_ms);
        self.run.tick(dt);
        self.run.is_running()
    }

    pub fn resize(&mut self, canvas_width: f32, canvas_height: f32) {
        self.run
            .set_viewport(Viewport::from_canvas(canvas_width, canvas_height));
    }

    pub fn jump(&mut self) -> bool {
        self.run.jump()
    }

    /// Start a new run if none is in progress
    pub fn restart(&mut self, now_ms: f64) -> bool {
        let started = self.run.restart_requested();
        if started {
            self.clock.resume(now_ms);
        }
        started
    }

    /// Call when the tab becomes visible again
    pub fn resume(&mut self, now_ms: f64) {
        self.clock.resume(now_ms);
    }

    pub fn is_game_over(&self) -> bool {
        self.run.phase() == RunPhase::GameOver
    }

    pub fn score(&self) -> u32 {
        u32::try_from(self.run.score().display_score()).unwrap_or(u32::MAX)
    }

    pub fn best(&self) -> u32 {
        u32::try_from(self.run.score().best()).unwrap_or(u32::MAX)
    }

    /// Render snapshot as JSON
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.run.snapshot()).unwrap_or_else(|e| {
            log::error!("Snapshot encode failed: {e}");
            String::from("null")
        })
    }

    /// Pending game events as a JSON array
    pub fn events_json(&mut self) -> String {
        serde_json::to_string(&self.run.drain_events()).unwrap_or_else(|e| {
            log::error!("Event encode failed: {e}");
            String::from("[]")
        })
    }
}
