//! Panda Runner entry point
//!
//! On the web the page drives `WasmRunner` (see `wasm.rs`). Natively this runs
//! a few headless autopilot runs, which is handy for checking balance changes.
//!
//! Environment:
//! - `PANDA_RUNNER_STORE`: best-score file (default: temp dir)
//! - `PANDA_RUNNER_TUNING`: JSON tuning file
//! - `PANDA_RUNNER_RUNS`: number of runs (default 3)

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use panda_runner::platform::FileStore;
    use panda_runner::sim::{
        EntropySource, GameEvent, RunController, TickOutcome, Viewport,
    };
    use panda_runner::tuning::Tuning;

    /// Simulated frame length (60 Hz display)
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up on a run after this many simulated seconds
    const MAX_RUN_SECS: f32 = 300.0;
    /// Seconds of warning the autopilot wants before an obstacle arrives
    const REACTION_SECS: f32 = 0.22;

    fn store_path() -> PathBuf {
        std::env::var_os("PANDA_RUNNER_STORE")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("panda-runner").join("best.json"))
    }

    fn load_tuning() -> Tuning {
        let Some(path) = std::env::var_os("PANDA_RUNNER_TUNING") else {
            return Tuning::default();
        };
        let loaded = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", PathBuf::from(&path).display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning: {e}");
                Tuning::default()
            }
        }
    }

    /// Jump when the next obstacle is about to reach the player
    fn autopilot(run: &mut RunController) {
        let player = run.player().rect();
        let lead = run.speed() * REACTION_SECS;
        let incoming = run
            .obstacles()
            .obstacles()
            .iter()
            .filter(|o| o.right() > player.left())
            .map(|o| o.x() - player.right())
            .fold(f32::INFINITY, f32::min);
        if incoming < lead {
            run.jump();
        }
    }

    pub fn run() {
        let runs: u32 = std::env::var("PANDA_RUNNER_RUNS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3);
        let path = store_path();
        log::info!("Best score file: {}", path.display());

        let mut run = RunController::new(
            load_tuning(),
            Viewport::default(),
            EntropySource::new(),
            FileStore::new(path),
        );

        for index in 1..=runs {
            run.reset();
            let mut jumps = 0u32;
            let mut spawned = 0u32;

            let outcome = loop {
                autopilot(&mut run);
                let outcome = run.tick(FRAME_DT);
                for event in run.drain_events() {
                    match event {
                        GameEvent::Jumped => jumps += 1,
                        GameEvent::ObstacleSpawned { .. } => spawned += 1,
                        _ => {}
                    }
                }
                if outcome != TickOutcome::Advanced || run.elapsed() >= MAX_RUN_SECS {
                    break outcome;
                }
            };

            match outcome {
                TickOutcome::Crashed(report) => println!(
                    "Run {index}: crashed after {:.1}s at speed {:.0}, score {}{}, {jumps} jumps, {spawned} obstacles",
                    run.elapsed(),
                    run.speed(),
                    report.score,
                    if report.new_best { " (new best!)" } else { "" },
                ),
                _ => println!(
                    "Run {index}: survived {:.0}s, score {}, {jumps} jumps, {spawned} obstacles",
                    run.elapsed(),
                    run.score().display_score(),
                ),
            }
        }

        println!("Best: {}", run.score().best());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Panda Runner (native, headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start in the library, this is just to satisfy the compiler
}
