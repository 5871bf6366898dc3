//! Game state and core simulation types
//!
//! The state is owned by the loop driver and threaded by reference through
//! the step engine and the scene builder. No process-wide singletons.

use std::collections::VecDeque;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Direction, GridSize};
use crate::consts::{CELL, STEP_DURATION_START};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advancing tick by tick
    Running,
    /// Fatal collision happened; shake window before the end screen
    Dying,
    /// End screen showing, awaiting a restart
    GameOver,
}

/// The food pellet: one cell plus a phase value driving the pulse effect
#[derive(Debug, Clone, Copy)]
pub struct Food {
    pub pos: IVec2,
    /// Cosmetic pulse phase, advanced per frame; never read by game logic
    pub pulse: f32,
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: GridSize,
    /// Snake body, head first; length only ever grows
    pub body: VecDeque<IVec2>,
    /// Body as of the previous tick, paired index-wise for interpolation
    pub prev_body: VecDeque<IVec2>,
    /// Direction applied on the most recent tick
    pub direction: Direction,
    /// Buffered direction consumed by the next tick
    pub pending: Direction,
    pub food: Food,
    pub score: u32,
    /// Best score ever achieved, loaded from storage at startup
    pub high_score: u32,
    /// Milliseconds per simulation step
    pub step_duration: f64,
    pub phase: GamePhase,
    rng: Pcg32,
}

impl GameState {
    /// Create a fresh run: two segments at the grid center, facing right
    pub fn new(grid: GridSize, seed: u64) -> Self {
        let center = grid.center_cell();
        let body: VecDeque<IVec2> = [center, center - IVec2::new(CELL, 0)].into();
        let prev_body = body.clone();

        let mut state = Self {
            grid,
            body,
            prev_body,
            direction: Direction::Right,
            pending: Direction::Right,
            food: Food {
                pos: IVec2::ZERO,
                pulse: 0.0,
            },
            score: 0,
            high_score: 0,
            step_duration: STEP_DURATION_START,
            phase: GamePhase::Running,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.place_food();
        state
    }

    /// Full reset for a new run. Everything is rebuilt from scratch; only
    /// the high score carries over.
    pub fn reset(&mut self, seed: u64) {
        let high_score = self.high_score;
        *self = Self::new(self.grid, seed);
        self.high_score = high_score;
    }

    #[inline]
    pub fn head(&self) -> IVec2 {
        self.body[0]
    }

    /// Whether any body segment occupies `cell`
    pub fn occupies(&self, cell: IVec2) -> bool {
        self.body.iter().any(|&seg| seg == cell)
    }

    /// Input buffer. A request is accepted unless it is the exact opposite
    /// of the *committed* direction (not the pending one), which would fold
    /// the head into the neck. The single pending slot is overwritten, so
    /// the last request before the next tick wins; rejected requests are
    /// dropped silently.
    pub fn request_direction(&mut self, requested: Direction) {
        if requested != self.direction.opposite() {
            self.pending = requested;
        }
    }

    /// Move the food to a uniformly random unoccupied cell by rejection
    /// sampling. Does not terminate on a fully occupied grid.
    pub fn place_food(&mut self) {
        loop {
            let cell = IVec2::new(
                self.rng.random_range(0..self.grid.cols) * CELL,
                self.rng.random_range(0..self.grid.rows) * CELL,
            );
            if !self.occupies(cell) {
                self.food = Food {
                    pos: cell,
                    pulse: 0.0,
                };
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Lay a serpentine body of `len` cells over the grid, row by row
    fn serpentine_body(grid: GridSize, len: usize) -> VecDeque<IVec2> {
        (0..len as i32)
            .map(|i| {
                let row = i / grid.cols;
                let col = if row % 2 == 0 {
                    i % grid.cols
                } else {
                    grid.cols - 1 - i % grid.cols
                };
                IVec2::new(col * CELL, row * CELL)
            })
            .collect()
    }

    #[test]
    fn test_initial_configuration() {
        let state = GameState::new(GridSize::new(10, 10), 7);
        assert_eq!(state.body.len(), 2);
        assert_eq!(state.head(), IVec2::new(5 * CELL, 5 * CELL));
        assert_eq!(state.body[1], IVec2::new(4 * CELL, 5 * CELL));
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(!state.occupies(state.food.pos));
        assert!(state.grid.contains(state.food.pos));
    }

    #[test]
    fn test_request_direction_rejects_reversal() {
        let mut state = GameState::new(GridSize::new(10, 10), 7);
        assert_eq!(state.direction, Direction::Right);

        // The exact opposite of the committed direction is dropped
        state.request_direction(Direction::Left);
        assert_eq!(state.pending, Direction::Right);

        // The other three are accepted
        for dir in [Direction::Up, Direction::Down, Direction::Right] {
            state.request_direction(dir);
            assert_eq!(state.pending, dir);
        }
    }

    #[test]
    fn test_request_direction_filters_against_committed_not_pending() {
        let mut state = GameState::new(GridSize::new(10, 10), 7);

        // Committed direction is Right. A rapid Up-then-Down double press
        // before the next tick leaves Down pending: the filter compares
        // against the committed direction, not the pending slot.
        state.request_direction(Direction::Up);
        state.request_direction(Direction::Down);
        assert_eq!(state.pending, Direction::Down);
    }

    #[test]
    fn test_place_food_near_full_grid() {
        let grid = GridSize::new(3, 3);
        let mut state = GameState::new(grid, 1);
        // Occupy every cell but one; food must land on the single free cell
        state.body = serpentine_body(grid, 8);
        state.place_food();
        assert_eq!(state.food.pos, IVec2::new(2 * CELL, 2 * CELL));
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut state = GameState::new(GridSize::new(10, 10), 7);
        state.score = 12;
        state.high_score = 12;
        state.step_duration = 100.0;
        state.phase = GamePhase::GameOver;

        state.reset(99);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 12);
        assert_eq!(state.step_duration, STEP_DURATION_START);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.body.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_food_never_on_snake(seed in any::<u64>(), len in 2usize..30) {
            let grid = GridSize::new(6, 6);
            let mut state = GameState::new(grid, seed);
            state.body = serpentine_body(grid, len);

            state.place_food();
            prop_assert!(!state.occupies(state.food.pos));
            prop_assert!(grid.contains(state.food.pos));
            prop_assert_eq!(state.food.pos.x % CELL, 0);
            prop_assert_eq!(state.food.pos.y % CELL, 0);
        }
    }
}
