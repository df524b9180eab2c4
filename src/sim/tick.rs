//! Per-frame simulation step
//!
//! Order within a frame is fixed: difficulty, obstacles (spawn, scroll,
//! prune), player physics, collision test, score. A collision ends the run
//! before score is accrued for that frame.

use super::collision::any_overlap;
use super::rng::UniformSource;
use super::score::GameOverReport;
use super::state::{GameEvent, RunController, RunPhase};

/// What a call to [`RunController::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed
    Idle,
    /// One frame simulated
    Advanced,
    /// The player hit an obstacle this frame
    Crashed(GameOverReport),
}

/// Clamp a raw frame delta into [0, max_dt]; garbage becomes 0
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_finite() { dt.clamp(0.0, max_dt) } else { 0.0 }
}

impl<R: UniformSource> RunController<R> {
    /// Advance the run by one frame of `dt` seconds (clamped)
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        if self.phase != RunPhase::Running {
            return TickOutcome::Idle;
        }

        let dt = clamp_dt(dt, self.tuning.max_frame_dt);
        let viewport = self.viewport;
        self.frame += 1;
        self.elapsed += dt;

        self.difficulty.update(dt);
        let speed = self.difficulty.speed;

        if let Some(id) = self.field.update(
            dt,
            speed,
            viewport.world_width,
            viewport.ground_y,
            &self.tuning,
            &mut self.rng,
        ) {
            self.events.push(GameEvent::ObstacleSpawned { id });
        }

        if self.player.integrate(dt, viewport.ground_y) {
            self.events.push(GameEvent::Landed);
        }

        let player = self.player.rect();
        if any_overlap(&player, self.field.obstacles().iter().map(|o| o.rect())) {
            return TickOutcome::Crashed(self.game_over());
        }

        self.score.accrue(dt, speed, self.difficulty.base_speed);
        TickOutcome::Advanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_score::BestScore;
    use crate::consts::*;
    use crate::persistence::{KeyValueStore, MemoryStore, StorageError};
    use crate::sim::obstacles::ObstacleSpec;
    use crate::sim::rng::ScriptedSource;
    use crate::sim::state::Viewport;
    use crate::tuning::Tuning;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DT: f32 = 0.016;

    /// Store whose contents stay visible to the test after being moved in
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.borrow().get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.borrow_mut().set(key, value)
        }
    }

    fn running() -> RunController<ScriptedSource> {
        let mut run = RunController::ephemeral(
            Tuning::default(),
            Viewport::default(),
            ScriptedSource::constant(0.5),
        );
        run.reset();
        run
    }

    /// An obstacle sitting right on top of the player
    fn blocker() -> ObstacleSpec {
        ObstacleSpec {
            x: PLAYER_X + 10.0,
            width: 30.0,
            height: 40.0,
        }
    }

    #[test]
    fn test_clamp_dt() {
        assert_eq!(clamp_dt(0.016, 0.05), 0.016);
        assert_eq!(clamp_dt(2.0, 0.05), 0.05);
        assert_eq!(clamp_dt(-1.0, 0.05), 0.0);
        assert_eq!(clamp_dt(f32::NAN, 0.05), 0.0);
    }

    #[test]
    fn test_idle_when_not_running() {
        let mut run = RunController::ephemeral(
            Tuning::default(),
            Viewport::default(),
            ScriptedSource::constant(0.5),
        );
        assert_eq!(run.tick(DT), TickOutcome::Idle);
        assert_eq!(run.frame(), 0);
        assert_eq!(run.score().score(), 0.0);
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut run = running();
        run.tick(10.0);
        assert!((run.elapsed() - MAX_FRAME_DT).abs() < 1e-6);
        assert!((run.speed() - (BASE_SPEED + SPEED_RAMP * MAX_FRAME_DT)).abs() < 1e-4);
    }

    #[test]
    fn test_score_grows_while_running() {
        let mut run = running();
        let mut last = run.score().score();
        for _ in 0..40 {
            assert_eq!(run.tick(DT), TickOutcome::Advanced);
            assert!(run.score().score() > last);
            last = run.score().score();
        }
    }

    #[test]
    fn test_collision_ends_run_and_freezes() {
        let mut run = running();
        for _ in 0..10 {
            run.tick(DT);
        }
        run.insert_obstacle(blocker()).unwrap();

        let outcome = run.tick(DT);
        assert!(matches!(outcome, TickOutcome::Crashed(_)));
        assert_eq!(run.phase(), RunPhase::GameOver);

        let score = run.score().score();
        let speed = run.speed();
        let player = run.player().clone();
        let xs: Vec<f32> = run.obstacles().obstacles().iter().map(|o| o.x()).collect();

        for _ in 0..20 {
            assert_eq!(run.tick(DT), TickOutcome::Idle);
        }
        assert!(!run.jump());
        assert_eq!(run.score().score(), score);
        assert_eq!(run.speed(), speed);
        assert_eq!(run.player(), &player);
        let after: Vec<f32> = run.obstacles().obstacles().iter().map(|o| o.x()).collect();
        assert_eq!(after, xs);
    }

    #[test]
    fn test_jumping_clears_a_low_obstacle() {
        let mut run = running();
        // 30 px tall, reaches the player in ~0.7 s at 300 px/s
        run.insert_obstacle(ObstacleSpec {
            x: PLAYER_X + PLAYER_WIDTH + 210.0,
            width: 20.0,
            height: 30.0,
        })
        .unwrap();

        for frame in 0..120 {
            // Jump ~0.34 s before the obstacle reaches the player
            if frame == 22 {
                assert!(run.jump());
            }
            assert_ne!(run.tick(DT), TickOutcome::Idle, "crashed at frame {frame}");
            assert!(run.is_running(), "crashed at frame {frame}");
        }
    }

    #[test]
    fn test_game_over_persists_new_best_once() {
        let store = SharedStore::default();
        store
            .0
            .borrow_mut()
            .set(BestScore::STORAGE_KEY, "3")
            .unwrap();
        let mut run = RunController::new(
            Tuning::default(),
            Viewport::default(),
            ScriptedSource::constant(0.5),
            store.clone(),
        );
        assert_eq!(run.score().best(), 3);
        run.reset();

        // ~0.8 s at base speed: 8 points
        for _ in 0..50 {
            run.tick(DT);
        }
        run.insert_obstacle(blocker()).unwrap();
        let TickOutcome::Crashed(report) = run.tick(DT) else {
            panic!("expected a crash");
        };
        assert!(report.new_best);
        assert_eq!(report.best, report.score);
        assert!(report.score >= 7);
        assert_eq!(
            store.get(BestScore::STORAGE_KEY).unwrap(),
            Some(report.score.to_string())
        );

        // A shorter run leaves the stored best alone
        run.reset();
        run.insert_obstacle(blocker()).unwrap();
        let TickOutcome::Crashed(report2) = run.tick(DT) else {
            panic!("expected a crash");
        };
        assert!(!report2.new_best);
        assert_eq!(report2.best, report.best);
        assert_eq!(
            store.get(BestScore::STORAGE_KEY).unwrap(),
            Some(report.score.to_string())
        );
    }

    #[test]
    fn test_game_over_event_reported() {
        let mut run = running();
        run.insert_obstacle(blocker()).unwrap();
        run.tick(DT);
        let events = run.drain_events();
        assert_eq!(events.first(), Some(&GameEvent::Started));
        assert!(matches!(events.last(), Some(GameEvent::GameOver(_))));
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut run = running();
        run.insert_obstacle(blocker()).unwrap();
        run.tick(DT);
        assert_eq!(run.phase(), RunPhase::GameOver);

        assert!(run.restart_requested());
        assert_eq!(run.phase(), RunPhase::Running);
        assert!(run.obstacles().is_empty());
        assert_eq!(run.score().score(), 0.0);
        assert_eq!(run.tick(DT), TickOutcome::Advanced);
    }

    #[test]
    fn test_forced_obstacle_ends_run_at_that_frame() {
        const CRASH_FRAME: u64 = 60;
        let mut run = running();
        let mut crashed_at = None;
        let mut frozen_score = None;

        for _ in 0..100 {
            // Drop a blocker onto the player just before the crash frame runs
            if run.frame() + 1 == CRASH_FRAME && run.is_running() {
                run.insert_obstacle(blocker()).unwrap();
            }
            match run.tick(DT) {
                TickOutcome::Crashed(_) => {
                    crashed_at = Some(run.frame());
                    frozen_score = Some(run.score().score());
                }
                TickOutcome::Idle => {
                    assert_eq!(Some(run.score().score()), frozen_score);
                }
                TickOutcome::Advanced => {
                    assert!(crashed_at.is_none());
                }
            }
        }

        assert_eq!(crashed_at, Some(CRASH_FRAME));
        assert_eq!(run.phase(), RunPhase::GameOver);
        assert_eq!(run.frame(), CRASH_FRAME);
    }

    #[test]
    fn test_speed_ramp_through_controller() {
        let tuning = Tuning {
            // No obstacles in the first 10 s
            initial_spawn_delay: 60.0,
            ..Tuning::with_speed(200.0, 3.0)
        };
        let mut run =
            RunController::ephemeral(tuning, Viewport::default(), ScriptedSource::constant(0.5));
        run.reset();
        for _ in 0..625 {
            assert_eq!(run.tick(DT), TickOutcome::Advanced);
        }
        assert!((run.elapsed() - 10.0).abs() < 1e-3);
        assert!((run.speed() - 230.0).abs() < 0.05, "speed {}", run.speed());
    }
}
