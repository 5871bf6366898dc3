//! Glide Snake - a grid snake game with interpolated motion
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid movement, collisions, scoring)
//! - `frame`: Host-agnostic frame loop driving the simulation
//! - `renderer`: WebGPU rendering pipeline
//! - `highscores`: Persistent best-score storage

pub mod frame;
pub mod highscores;
pub mod renderer;
pub mod sim;

pub use frame::{FrameDriver, FrameReport};
pub use highscores::HighScore;

/// Game configuration constants
pub mod consts {
    /// Grid cell size in pixels
    pub const CELL: i32 = 24;
    /// Milliseconds per simulation step at game start
    pub const STEP_DURATION_START: f64 = 140.0;
    /// Step duration never drops below this
    pub const STEP_DURATION_MIN: f64 = 80.0;
    /// Step duration reduction applied at each speed-up
    pub const STEP_DURATION_DECREMENT: f64 = 8.0;
    /// A speed-up triggers whenever the score reaches a multiple of this
    pub const SPEEDUP_INTERVAL: u32 = 5;
    /// Real-time length of the death shake before the end screen shows
    pub const DEATH_SHAKE_MS: f64 = 1000.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
