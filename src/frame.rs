//! Host-agnostic frame loop
//!
//! The driver owns the clocks and is fed explicit timestamps by the host
//! scheduler (requestAnimationFrame in the browser, a manual clock in
//! tests). Each frame runs at most one simulation step; after a stall the
//! game runs slower instead of skipping cells.

use crate::consts::DEATH_SHAKE_MS;
use crate::sim::{GamePhase, GameState, StepOutcome, advance};

/// What one frame did, for the glue layer to react to
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameReport {
    /// Outcome of the simulation step, if one ran this frame
    pub outcome: Option<StepOutcome>,
    /// Interpolation fraction for rendering, clamped to [0, 1]
    pub fraction: f32,
    /// Death shake magnitude in pixels
    pub shake: f32,
    /// Set on the single frame where Dying gives way to GameOver
    pub entered_game_over: bool,
}

/// Fixed-timestep / variable-render scheduler state
pub struct FrameDriver {
    /// Timestamp of the last completed simulation step
    last_step_ms: f64,
    /// Timestamp of the previous frame, for cosmetic animation deltas
    last_frame_ms: f64,
    /// When the fatal collision happened
    died_at_ms: Option<f64>,
}

impl FrameDriver {
    pub fn new(now_ms: f64) -> Self {
        Self {
            last_step_ms: now_ms,
            last_frame_ms: now_ms,
            died_at_ms: None,
        }
    }

    /// Rebuild the run from scratch and restart the clocks. Replaces the
    /// old run wholesale; nothing is carried over besides the high score.
    pub fn restart(&mut self, state: &mut GameState, now_ms: f64, seed: u64) {
        state.reset(seed);
        self.last_step_ms = now_ms;
        self.last_frame_ms = now_ms;
        self.died_at_ms = None;
    }

    /// Drive one display frame at `now_ms`
    pub fn frame(&mut self, state: &mut GameState, now_ms: f64) -> FrameReport {
        let frame_dt = (now_ms - self.last_frame_ms).max(0.0);
        self.last_frame_ms = now_ms;

        // Pure decoration; game logic never reads the pulse
        state.food.pulse += (frame_dt * 0.006) as f32;

        let mut report = FrameReport::default();

        match state.phase {
            GamePhase::Running => {
                if now_ms - self.last_step_ms >= state.step_duration {
                    let outcome = advance(state);
                    self.last_step_ms = now_ms;
                    if outcome == StepOutcome::Died {
                        self.died_at_ms = Some(now_ms);
                    }
                    report.outcome = Some(outcome);
                }
                report.fraction =
                    ((now_ms - self.last_step_ms) / state.step_duration).clamp(0.0, 1.0) as f32;
            }
            GamePhase::Dying => {
                // Elapsed-real-time check, re-evaluated every frame; not a
                // scheduled timer
                let elapsed = now_ms - self.died_at_ms.unwrap_or(now_ms);
                if elapsed >= DEATH_SHAKE_MS {
                    state.phase = GamePhase::GameOver;
                    report.entered_game_over = true;
                } else {
                    report.shake = ((elapsed * 0.05).sin() * 2.0) as f32;
                }
            }
            GamePhase::GameOver => {}
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CELL, STEP_DURATION_START};
    use crate::sim::GridSize;
    use glam::IVec2;

    fn running_state() -> GameState {
        let mut state = GameState::new(GridSize::new(10, 10), 3);
        // Park the food away from the straight-line path
        state.food.pos = IVec2::new(0, 0);
        state
    }

    #[test]
    fn test_no_step_before_duration_elapses() {
        let mut state = running_state();
        let mut driver = FrameDriver::new(0.0);

        let report = driver.frame(&mut state, 100.0);
        assert!(report.outcome.is_none());
        assert!((report.fraction - (100.0 / STEP_DURATION_START) as f32).abs() < 1e-6);

        let report = driver.frame(&mut state, STEP_DURATION_START);
        assert_eq!(report.outcome, Some(StepOutcome::Moved));
        assert_eq!(report.fraction, 0.0);
    }

    #[test]
    fn test_stall_runs_at_most_one_step_per_frame() {
        let mut state = running_state();
        let mut driver = FrameDriver::new(0.0);
        let head_before = state.head();

        // Ten ticks worth of elapsed time still advances exactly once
        let report = driver.frame(&mut state, STEP_DURATION_START * 10.0);
        assert_eq!(report.outcome, Some(StepOutcome::Moved));
        assert_eq!(state.head(), head_before + IVec2::new(CELL, 0));
        assert!(report.fraction >= 0.0 && report.fraction <= 1.0);
    }

    #[test]
    fn test_death_sequence_timing() {
        let mut state = running_state();
        let mut driver = FrameDriver::new(0.0);

        // Walk the snake into the right wall
        let mut now = 0.0;
        while state.phase == GamePhase::Running {
            now += STEP_DURATION_START;
            driver.frame(&mut state, now);
        }
        let died_at = now;
        let score_at_death = state.score;
        let high_at_death = state.high_score;

        // Mid-shake: still Dying, shake bounded by the 2 px amplitude
        let report = driver.frame(&mut state, died_at + 500.0);
        assert_eq!(state.phase, GamePhase::Dying);
        assert!(!report.entered_game_over);
        assert!(report.shake.abs() <= 2.0);

        // At the 1000 ms threshold the end screen takes over, with the
        // score values frozen at their time-of-death values
        let report = driver.frame(&mut state, died_at + DEATH_SHAKE_MS);
        assert!(report.entered_game_over);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, score_at_death);
        assert_eq!(state.high_score, high_at_death);

        // GameOver frames are inert
        let report = driver.frame(&mut state, died_at + DEATH_SHAKE_MS + 500.0);
        assert!(!report.entered_game_over);
        assert!(report.outcome.is_none());
    }

    #[test]
    fn test_restart_rebuilds_run_and_clocks() {
        let mut state = running_state();
        let mut driver = FrameDriver::new(0.0);

        let mut now = 0.0;
        while state.phase != GamePhase::GameOver {
            now += STEP_DURATION_START;
            driver.frame(&mut state, now);
        }

        driver.restart(&mut state, now, 99);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.body.len(), 2);
        assert_eq!(state.step_duration, STEP_DURATION_START);

        // Clocks restarted: the next step is a full duration away
        state.food.pos = IVec2::new(0, 0);
        let report = driver.frame(&mut state, now + STEP_DURATION_START / 2.0);
        assert!(report.outcome.is_none());
    }

    #[test]
    fn test_food_pulse_advances_with_frame_time() {
        let mut state = running_state();
        let mut driver = FrameDriver::new(0.0);

        let pulse_before = state.food.pulse;
        driver.frame(&mut state, 16.0);
        driver.frame(&mut state, 32.0);
        assert!(state.food.pulse > pulse_before);
    }
}
