use crate::core::data::colour::Colour;
use crate::core::fractals::palettes::gradient_position;

/// Smooth polynomial ramp from dark blue to white.
#[must_use]
pub fn blue_white_gradient(iterations: u32, max_iterations: u32, max_colour_iterations: u32) -> Colour {
    let Some(t) = gradient_position(iterations, max_iterations, max_colour_iterations) else {
        return Colour::BLACK;
    };

    let r = (9.0 * (1.0 - t) * t * t * t * 255.0) as u8;
    let g = (15.0 * (1.0 - t) * (1.0 - t) * t * t * 255.0) as u8;
    let b = (8.5 * (1.0 - t) * (1.0 - t) * (1.0 - t) * t * 255.0) as u8;

    Colour { r, g, b }
}
