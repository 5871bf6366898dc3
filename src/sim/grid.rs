//! Grid geometry for the playfield
//!
//! Cells are addressed by their top-left corner in pixel units: every
//! coordinate is a multiple of the cell size, and equality is exact
//! integer comparison.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::CELL;

/// Playfield dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub cols: i32,
    pub rows: i32,
}

impl GridSize {
    pub fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    /// Derive grid dimensions from a drawing surface size in pixels.
    /// Partial cells at the right/bottom edge are outside the playfield.
    pub fn from_surface(width: u32, height: u32) -> Self {
        Self {
            cols: (width as i32) / CELL,
            rows: (height as i32) / CELL,
        }
    }

    /// Playfield width in pixels
    #[inline]
    pub fn width_px(&self) -> i32 {
        self.cols * CELL
    }

    /// Playfield height in pixels
    #[inline]
    pub fn height_px(&self) -> i32 {
        self.rows * CELL
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        (self.cols as usize) * (self.rows as usize)
    }

    /// Whether a cell coordinate lies inside the playfield bounds
    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.x < self.width_px() && cell.y >= 0 && cell.y < self.height_px()
    }

    /// The cell at the center of the playfield, snapped to the grid
    pub fn center_cell(&self) -> IVec2 {
        IVec2::new(self.cols / 2 * CELL, self.rows / 2 * CELL)
    }
}

/// Movement direction, one grid cell per tick. Screen-space axes: y grows
/// downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit cell offset
    #[inline]
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// The exact reverse of this direction
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector in render space
    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        let d = self.delta();
        Vec2::new(d.x as f32, d.y as f32)
    }
}
