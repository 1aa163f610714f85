use crate::core::data::colour::Colour;
use crate::core::fractals::palettes::gradient_position;

#[must_use]
pub fn grayscale(iterations: u32, max_iterations: u32, max_colour_iterations: u32) -> Colour {
    match gradient_position(iterations, max_iterations, max_colour_iterations) {
        Some(t) => {
            let level = (t * 255.0) as u8;
            Colour {
                r: level,
                g: level,
                b: level,
            }
        }
        None => Colour::BLACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grayscale_levels() {
        assert_eq!(grayscale(0, 10, 10), Colour::BLACK);
        assert_eq!(grayscale(5, 10, 10), Colour { r: 127, g: 127, b: 127 });
        assert_eq!(grayscale(10, 10, 10), Colour::BLACK);
    }
}
