//! Pointer-to-play-field mapping
//!
//! Works on plain coordinates so mouse and touch handlers can share it.

use glam::DVec2;

use crate::clamp_to_field;
use crate::consts::{FIELD_HALF_HEIGHT, FIELD_HALF_WIDTH};

/// Screen rectangle the play-field is drawn into (CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Map a pointer position to play-field coordinates, clamped to the field.
///
/// Screen y grows downward, field y grows upward. A degenerate viewport maps
/// everything to the field origin.
pub fn pointer_to_field(px: f64, py: f64, viewport: &Viewport) -> DVec2 {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return DVec2::ZERO;
    }

    let x = (px - viewport.left) / viewport.width * (2.0 * FIELD_HALF_WIDTH) - FIELD_HALF_WIDTH;
    let y = -(py - viewport.top) / viewport.height * (2.0 * FIELD_HALF_HEIGHT) + FIELD_HALF_HEIGHT;
    clamp_to_field(DVec2::new(x, y))
}
