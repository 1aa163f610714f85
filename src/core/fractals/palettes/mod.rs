//! Palette functions mapping an escape-time count to a colour.
//!
//! A palette is a plain function pointer, so it cannot capture state and is
//! safe to call from every render worker at once. All built-in palettes use the
//! same conventions:
//!
//! - `iterations >= max_iterations` (the point never escaped) is black.
//! - Otherwise the gradient position is `(iterations % cycle) / cycle`, where
//!   `cycle` is `max_colour_iterations`, or `max_iterations` when that is zero.

pub mod blue_white_gradient;
pub mod fire_gradient;
pub mod grayscale;
pub mod kinds;

use crate::core::data::colour::Colour;

/// `(iterations, max_iterations, max_colour_iterations) -> colour`
pub type Palette = fn(u32, u32, u32) -> Colour;

/// Gradient position in `[0, 1)` for an escaped point, or `None` for a point
/// that used the whole iteration budget.
#[must_use]
pub fn gradient_position(iterations: u32, max_iterations: u32, max_colour_iterations: u32) -> Option<f64> {
    if iterations >= max_iterations {
        return None;
    }

    let cycle = if max_colour_iterations == 0 {
        max_iterations
    } else {
        max_colour_iterations
    };

    Some((iterations % cycle) as f64 / cycle as f64)
}
