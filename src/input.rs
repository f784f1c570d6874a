//! Pointer-to-paddle input mapping
//!
//! The browser layer hands over a pointer X relative to the field's left
//! edge; this maps it to a legal paddle position. No queuing: the most
//! recent event simply overwrites the paddle target.

use crate::consts::*;

/// Map a field-relative pointer X to the player paddle's left edge, centered
/// under the pointer and clamped into the field.
pub fn paddle_from_pointer(field_x: f32) -> f32 {
    (field_x - PADDLE_WIDTH / 2.0).clamp(0.0, PADDLE_MAX_X)
}
