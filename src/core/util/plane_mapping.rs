use crate::core::data::precision_complex::PrecisionComplex;
use crate::core::data::view_parameters::ViewParameters;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaneMappingError {
    ZeroCanvasWidth,
}

impl fmt::Display for PlaneMappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCanvasWidth => write!(f, "cannot map pixels of a canvas with zero width"),
        }
    }
}

impl Error for PlaneMappingError {}

/// Pixel-to-plane transform for one canvas size.
///
/// ```text
/// units_per_pixel = scale / W
/// re = center.re + (px - W/2) * units_per_pixel
/// im = center.im - (py - H/2) * units_per_pixel
/// ```
///
/// Only the canvas width divides the scale, and screen y grows downward while
/// the imaginary axis grows upward.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlaneMapping {
    center: PrecisionComplex,
    units_per_pixel: Decimal,
    half_width: Decimal,
    half_height: Decimal,
}

impl PlaneMapping {
    pub fn new(
        view: &ViewParameters,
        canvas_width: u32,
        canvas_height: u32,
    ) -> Result<Self, PlaneMappingError> {
        if canvas_width == 0 {
            return Err(PlaneMappingError::ZeroCanvasWidth);
        }

        let width = Decimal::from(canvas_width);
        let height = Decimal::from(canvas_height);

        Ok(Self {
            center: view.center(),
            units_per_pixel: view.scale() / width,
            half_width: width / Decimal::TWO,
            half_height: height / Decimal::TWO,
        })
    }

    #[must_use]
    pub fn units_per_pixel(&self) -> Decimal {
        self.units_per_pixel
    }

    /// Saturates at the decimal range instead of overflowing. A saturated
    /// coordinate lies beyond any finite escape threshold, so it escapes at
    /// step 0.
    #[must_use]
    pub fn pixel_to_plane(&self, x: i32, y: i32) -> PrecisionComplex {
        let dx = Decimal::from(x).saturating_sub(self.half_width);
        let dy = Decimal::from(y).saturating_sub(self.half_height);

        PrecisionComplex {
            real: self.center.real.saturating_add(dx.saturating_mul(self.units_per_pixel)),
            imag: self.center.imag.saturating_sub(dy.saturating_mul(self.units_per_pixel)),
        }
    }
}
