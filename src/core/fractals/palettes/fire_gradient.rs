use crate::core::data::colour::Colour;
use crate::core::fractals::palettes::gradient_position;

/// Black through red, orange and yellow to white.
#[must_use]
pub fn fire_gradient(iterations: u32, max_iterations: u32, max_colour_iterations: u32) -> Colour {
    let Some(t) = gradient_position(iterations, max_iterations, max_colour_iterations) else {
        return Colour::BLACK;
    };

    let (r, g, b) = if t < 0.25 {
        let local_t = t / 0.25;
        ((local_t * 255.0) as u8, 0, 0)
    } else if t < 0.5 {
        let local_t = (t - 0.25) / 0.25;
        (255, (local_t * 165.0) as u8, 0)
    } else if t < 0.75 {
        let local_t = (t - 0.5) / 0.25;
        (255, (165.0 + local_t * 90.0) as u8, 0)
    } else {
        let local_t = (t - 0.75) / 0.25;
        (255, 255, (local_t * 255.0) as u8)
    };

    Colour { r, g, b }
}
