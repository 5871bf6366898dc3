//! Scene construction for the renderer
//!
//! Pure functions from simulation snapshots to drawable positions. No
//! graphics API is involved here, so interpolation and the death snapshot
//! are unit-testable without a surface.

use std::collections::VecDeque;

use glam::{IVec2, Vec2};

use crate::consts::CELL;
use crate::lerp;
use crate::sim::{GamePhase, GameState};

/// Palette slot for a drawable segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Head,
    /// Even body segments
    BodyBright,
    /// Odd body segments
    BodyDark,
}

impl SegmentKind {
    /// Palette index as uploaded to the shader
    pub fn palette_index(self) -> u32 {
        match self {
            SegmentKind::Head => 0,
            SegmentKind::BodyBright => 1,
            SegmentKind::BodyDark => 2,
        }
    }
}

/// One drawable disc of the snake
#[derive(Debug, Clone, Copy)]
pub struct SegmentInstance {
    /// Center position in surface pixels
    pub center: Vec2,
    pub radius: f32,
    pub kind: SegmentKind,
}

/// Everything the pipeline needs for one frame
#[derive(Debug, Clone)]
pub struct Scene {
    /// Tail-first, so painting in order leaves the head on top
    pub segments: Vec<SegmentInstance>,
    pub food_center: Vec2,
    pub food_radius: f32,
    /// Committed direction, for the head's eyes and tongue
    pub head_dir: Vec2,
    /// Eyes and tongue are drawn only while running
    pub draw_face: bool,
}

/// Interpolate each segment between its previous-tick and current-tick
/// cell, with the fraction clamped to [0, 1]. A segment with no
/// previous-tick entry (it grew this tick) stands still.
pub fn interpolated_body(prev: &VecDeque<IVec2>, cur: &VecDeque<IVec2>, t: f32) -> Vec<Vec2> {
    let t = t.clamp(0.0, 1.0);
    cur.iter()
        .enumerate()
        .map(|(i, &c)| {
            let p = prev.get(i).copied().unwrap_or(c);
            Vec2::new(
                lerp(p.x as f32, c.x as f32, t),
                lerp(p.y as f32, c.y as f32, t),
            )
        })
        .collect()
}

/// Build the frame's scene. `time_secs` drives the cosmetic body wave and
/// `shake` offsets the death snapshot; neither touches game logic.
pub fn build(state: &GameState, fraction: f32, time_secs: f32, shake: f32) -> Scene {
    let cell = CELL as f32;
    let half = cell / 2.0;
    let running = state.phase == GamePhase::Running;

    let positions: Vec<Vec2> = if running {
        interpolated_body(&state.prev_body, &state.body, fraction)
    } else {
        // Death renders the fixed final snapshot, no interpolation
        state
            .body
            .iter()
            .map(|&c| Vec2::new(c.x as f32, c.y as f32))
            .collect()
    };

    // Tail first; the head paints last
    let mut segments = Vec::with_capacity(positions.len());
    for (i, pos) in positions.iter().enumerate().rev() {
        let is_head = i == 0;
        let radius = if is_head {
            cell * 0.48
        } else if running {
            let wave = 0.06 * (time_secs * 6.0 + i as f32 * 0.8).sin();
            cell * (0.42 + wave)
        } else {
            cell * 0.42
        };
        let kind = if is_head {
            SegmentKind::Head
        } else if i % 2 == 0 {
            SegmentKind::BodyBright
        } else {
            SegmentKind::BodyDark
        };
        segments.push(SegmentInstance {
            center: *pos + Vec2::splat(half) + Vec2::splat(shake),
            radius,
            kind,
        });
    }

    let food_size = (cell - 6.0) + state.food.pulse.sin() * 4.0;
    Scene {
        segments,
        food_center: Vec2::new(
            state.food.pos.x as f32 + half,
            state.food.pos.y as f32 + half,
        ),
        food_radius: food_size / 2.0,
        head_dir: state.direction.as_vec2(),
        draw_face: running,
    }
}
