//! Sprite-sheet geometry. The sheet is a horizontal strip of six equal
//! square cells laid out left to right, one two-frame animation cycle per
//! presentation state.

use crate::state::GopherState;

/// Cell edge length in pixels; also the on-screen gopher size.
pub const SIZE: u32 = 128;

/// Cells per animation cycle.
pub const CLIP_COUNT: usize = 2;

/// Number of cells on the full strip.
pub const CELL_COUNT: usize = GopherState::ALL.len() * CLIP_COUNT;

/// Source rectangle within a texture, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// The full six-cell strip, left to right.
pub fn sheet_clips() -> [Rect; CELL_COUNT] {
    let mut cells = [Rect {
        x: 0,
        y: 0,
        w: SIZE,
        h: SIZE,
    }; CELL_COUNT];
    for (i, cell) in cells.iter_mut().enumerate() {
        cell.x = SIZE * i as u32;
    }
    cells
}

/// The two-cell cycle shown while `state` is active: cells [0:2] for RUN,
/// [2:4] for FLAP, [4:6] for DEAD.
pub fn clips_for(state: GopherState) -> [Rect; CLIP_COUNT] {
    let cells = sheet_clips();
    let base = state.ordinal() * CLIP_COUNT;
    [cells[base], cells[base + 1]]
}
