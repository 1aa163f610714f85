use std::error::Error;
use std::fmt;

use crate::core::data::colour::Colour;
use crate::core::data::view_parameters::ViewParameters;
use crate::core::fractals::iteration_rule::IterationRule;
use crate::core::util::plane_mapping::{PlaneMapping, PlaneMappingError};

#[derive(Debug)]
pub enum RenderError {
    WorkerPool(rayon::ThreadPoolBuildError),
    UnsupportedPixelFormat { bytes_per_pixel: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkerPool(err) => write!(f, "could not start render workers: {}", err),
            Self::UnsupportedPixelFormat { bytes_per_pixel } => {
                write!(f, "cannot write BGR pixels with {} bytes per pixel", bytes_per_pixel)
            }
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::WorkerPool(err) => Some(err),
            Self::UnsupportedPixelFormat { .. } => None,
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for RenderError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::WorkerPool(err)
    }
}

/// Renders one view of one iteration rule.
///
/// The rule and view are fixed when the engine is built; rendering a different
/// view means building a new engine (see [`RenderEngine::with_view`]). Engines
/// are `Copy` and `Sync`, so render workers share one by reference.
///
/// Render entry points live next to the strategies they implement:
/// `render_full_frame`, `render_tile_into_shared_buffer`,
/// `render_tile_into_own_buffer` and `render_tiled_canvas`.
#[derive(Debug, Clone, Copy)]
pub struct RenderEngine {
    rule: IterationRule,
    view: ViewParameters,
}

impl RenderEngine {
    #[must_use]
    pub fn new(rule: IterationRule, view: ViewParameters) -> Self {
        Self { rule, view }
    }

    #[must_use]
    pub fn rule(&self) -> IterationRule {
        self.rule
    }

    #[must_use]
    pub fn view(&self) -> &ViewParameters {
        &self.view
    }

    #[must_use]
    pub fn with_view(&self, view: ViewParameters) -> Self {
        Self {
            rule: self.rule,
            view,
        }
    }

    pub(crate) fn mapping(&self, canvas_width: u32, canvas_height: u32) -> Result<PlaneMapping, PlaneMappingError> {
        PlaneMapping::new(&self.view, canvas_width, canvas_height)
    }

    pub(crate) fn escape_time_with(&self, mapping: &PlaneMapping, x: i32, y: i32) -> u32 {
        self.rule.escape_time(
            mapping.pixel_to_plane(x, y),
            self.view.julia_constant(),
            self.view.max_iterations(),
            self.view.threshold_squared(),
        )
    }

    pub(crate) fn colour_with(&self, mapping: &PlaneMapping, x: i32, y: i32) -> Colour {
        let iterations = self.escape_time_with(mapping, x, y);

        (self.view.palette())(
            iterations,
            self.view.max_iterations(),
            self.view.max_colour_iterations(),
        )
    }

    /// Escape-time count of one canvas pixel.
    pub fn escape_time_at(
        &self,
        x: i32,
        y: i32,
        canvas_width: u32,
        canvas_height: u32,
    ) -> Result<u32, PlaneMappingError> {
        let mapping = self.mapping(canvas_width, canvas_height)?;
        Ok(self.escape_time_with(&mapping, x, y))
    }

    pub fn colour_at(
        &self,
        x: i32,
        y: i32,
        canvas_width: u32,
        canvas_height: u32,
    ) -> Result<Colour, PlaneMappingError> {
        let mapping = self.mapping(canvas_width, canvas_height)?;
        Ok(self.colour_with(&mapping, x, y))
    }
}

/// Writes `colour` as B, G, R into the first three bytes of `pixel`; a
/// fourth byte, if present, is set to opaque alpha.
pub(crate) fn write_bgr(pixel: &mut [u8], colour: Colour) {
    pixel[..3].copy_from_slice(&colour.to_bgr());

    if let Some(alpha) = pixel.get_mut(3) {
        *alpha = u8::MAX;
    }
}
