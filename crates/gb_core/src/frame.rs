//! Per-frame derived state: the 4-tick animation counter and the label fade.
//!
//! Both advance by fixed per-call increments. Wall-clock delta is measured by
//! the driver but deliberately not consumed here; animation speed follows the
//! presentation rate.

use crate::sheet::CLIP_COUNT;

/// How much the label alpha drops each tick.
const FADE_STEP: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameState {
    frame: u32,
    alpha: u8,
}

impl FrameState {
    pub fn new() -> Self {
        Self {
            frame: 0,
            alpha: 255,
        }
    }

    /// Index of the sheet clip to display. Always 0 or 1.
    pub fn display_frame(&self) -> usize {
        (self.frame / 2) as usize
    }

    /// Current label opacity.
    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Restart the label fade from fully opaque.
    pub fn reset_alpha(&mut self) {
        self.alpha = 255;
    }

    /// One tick: bump the animation counter (period 4, two displayed frames)
    /// and step the label fade.
    pub fn advance(&mut self) {
        self.frame += 1;
        if self.frame / 2 >= CLIP_COUNT as u32 {
            self.frame = 0;
        }

        // The wraparound on subtraction is load-bearing: an alpha below the
        // step size passes through u8 wraparound, and the reset below fires
        // only for results in the <= 10 window. Must stay mod-256 exact.
        self.alpha = self.alpha.wrapping_sub(FADE_STEP);
        if self.alpha <= 10 {
            self.alpha = 255;
        }
    }
}

impl Default for FrameState {
    fn default() -> Self {
        Self::new()
    }
}
