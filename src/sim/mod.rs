//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete grid steps only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod grid;
pub mod state;
pub mod tick;

pub use grid::{Direction, GridSize};
pub use state::{Food, GamePhase, GameState};
pub use tick::{StepOutcome, advance};
