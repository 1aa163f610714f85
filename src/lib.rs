mod controllers;
mod core;

pub use controllers::cli::cli_render::{CliRenderController, RenderSummary};

pub use crate::core::actions::cancellation::{CancelToken, CancellationFlag, NeverCancel};
pub use crate::core::actions::dispatch_tiles::{DispatchError, DispatchReport, DispatchState, TileDispatcher, TileFailure};
pub use crate::core::actions::render::{RECEIVER_CLOSED, RenderEngine, RenderError, TiledRender};
pub use crate::core::data::colour::Colour;
pub use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer, PixelBufferError};
pub use crate::core::data::point::Point;
pub use crate::core::data::precision_complex::{PrecisionComplex, PrecisionComplexError};
pub use crate::core::data::tile::{Tile, TileBounds};
pub use crate::core::data::view_parameters::{ViewParameters, ViewParametersError};
pub use crate::core::fractals::iteration_rule::IterationRule;
pub use crate::core::fractals::palettes::blue_white_gradient::blue_white_gradient;
pub use crate::core::fractals::palettes::fire_gradient::fire_gradient;
pub use crate::core::fractals::palettes::grayscale::grayscale;
pub use crate::core::fractals::palettes::kinds::PaletteKind;
pub use crate::core::fractals::palettes::{Palette, gradient_position};
pub use crate::core::util::partition_canvas::{order_center_outward, partition_canvas};
pub use crate::core::util::plane_mapping::{PlaneMapping, PlaneMappingError};
pub use crate::core::util::worker_count::{default_worker_count, workers_for_units};

pub use rust_decimal::Decimal;
