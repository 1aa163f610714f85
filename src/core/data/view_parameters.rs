use crate::core::data::precision_complex::PrecisionComplex;
use crate::core::fractals::palettes::Palette;
use crate::core::fractals::palettes::fire_gradient::fire_gradient;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt;

const DEFAULT_MAX_ITERATIONS: u32 = 256;
const DEFAULT_MAX_COLOUR_ITERATIONS: u32 = 256;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewParametersError {
    ZeroMaxIterations,
    NegativeThreshold { threshold_squared: Decimal },
}

impl fmt::Display for ViewParametersError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxIterations => write!(f, "Maximum iterations must be greater than zero"),
            Self::NegativeThreshold { threshold_squared } => {
                write!(f, "escape threshold squared must not be negative: {}", threshold_squared)
            }
        }
    }
}

impl Error for ViewParametersError {}

/// Everything a render needs besides the canvas size and worker count.
///
/// `scale` is the full horizontal span of the viewport in plane units. The
/// same units-per-pixel value (`scale / canvas_width`) is applied to both
/// axes, so a non-square canvas shows a stretched view rather than a
/// letterboxed one.
///
/// Values are immutable; the `with_*` methods return modified copies.
#[derive(Debug, Clone, Copy)]
pub struct ViewParameters {
    center: PrecisionComplex,
    scale: Decimal,
    max_iterations: u32,
    threshold_squared: Decimal,
    julia_constant: PrecisionComplex,
    palette: Palette,
    max_colour_iterations: u32,
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            center: PrecisionComplex::new(Decimal::new(-5, 1), Decimal::ZERO),
            scale: Decimal::new(35, 1),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            threshold_squared: Decimal::from(4),
            julia_constant: PrecisionComplex::new(Decimal::new(-7, 1), Decimal::new(27, 2)),
            palette: fire_gradient,
            max_colour_iterations: DEFAULT_MAX_COLOUR_ITERATIONS,
        }
    }
}

impl ViewParameters {
    pub fn new(
        center: PrecisionComplex,
        scale: Decimal,
        max_iterations: u32,
        threshold_squared: Decimal,
    ) -> Result<Self, ViewParametersError> {
        validate_max_iterations(max_iterations)?;
        validate_threshold(threshold_squared)?;

        Ok(Self {
            center,
            scale,
            max_iterations,
            threshold_squared,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn center(&self) -> PrecisionComplex {
        self.center
    }

    #[must_use]
    pub fn scale(&self) -> Decimal {
        self.scale
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn threshold_squared(&self) -> Decimal {
        self.threshold_squared
    }

    #[must_use]
    pub fn julia_constant(&self) -> PrecisionComplex {
        self.julia_constant
    }

    #[must_use]
    pub fn palette(&self) -> Palette {
        self.palette
    }

    #[must_use]
    pub fn max_colour_iterations(&self) -> u32 {
        self.max_colour_iterations
    }

    #[must_use]
    pub fn with_center(self, center: PrecisionComplex) -> Self {
        Self { center, ..self }
    }

    #[must_use]
    pub fn with_scale(self, scale: Decimal) -> Self {
        Self { scale, ..self }
    }

    pub fn with_max_iterations(self, max_iterations: u32) -> Result<Self, ViewParametersError> {
        validate_max_iterations(max_iterations)?;
        Ok(Self {
            max_iterations,
            ..self
        })
    }

    pub fn with_threshold_squared(self, threshold_squared: Decimal) -> Result<Self, ViewParametersError> {
        validate_threshold(threshold_squared)?;
        Ok(Self {
            threshold_squared,
            ..self
        })
    }

    #[must_use]
    pub fn with_julia_constant(self, julia_constant: PrecisionComplex) -> Self {
        Self {
            julia_constant,
            ..self
        }
    }

    #[must_use]
    pub fn with_palette(self, palette: Palette, max_colour_iterations: u32) -> Self {
        Self {
            palette,
            max_colour_iterations,
            ..self
        }
    }
}

fn validate_max_iterations(max_iterations: u32) -> Result<(), ViewParametersError> {
    if max_iterations == 0 {
        return Err(ViewParametersError::ZeroMaxIterations);
    }

    Ok(())
}

fn validate_threshold(threshold_squared: Decimal) -> Result<(), ViewParametersError> {
    if threshold_squared.is_sign_negative() && !threshold_squared.is_zero() {
        return Err(ViewParametersError::NegativeThreshold { threshold_squared });
    }

    Ok(())
}
