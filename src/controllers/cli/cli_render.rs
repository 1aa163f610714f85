use log::info;
use std::num::NonZeroUsize;
use std::time::Instant;

use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::render::{RenderEngine, TiledRender};
use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::point::Point;
use crate::core::data::view_parameters::ViewParameters;
use crate::core::fractals::iteration_rule::IterationRule;
use crate::core::util::partition_canvas::{order_center_outward, partition_canvas};
use crate::core::util::worker_count::default_worker_count;

const DEFAULT_WIDTH: u32 = 96;
const DEFAULT_HEIGHT: u32 = 64;
const DEFAULT_TILE_SIZE: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub width: u32,
    pub height: u32,
    pub interior_pixels: usize,
    pub tiles_total: usize,
    pub tiles_composed: usize,
    pub tiled_matches_full_frame: bool,
}

/// Renders one view both ways, full frame and progressively by tile, and
/// logs how long each took.
pub struct CliRenderController {
    engine: RenderEngine,
    width: u32,
    height: u32,
    tile_size: u32,
    worker_count: NonZeroUsize,
    full_frame: Option<PixelBuffer>,
    tiled: Option<TiledRender>,
}

impl CliRenderController {
    pub fn new(rule: IterationRule, view: ViewParameters) -> Self {
        Self {
            engine: RenderEngine::new(rule, view),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            worker_count: default_worker_count(),
            full_frame: None,
            tiled: None,
        }
    }

    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_worker_count(mut self, worker_count: NonZeroUsize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn render_full_frame(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let view = self.engine.view();

        info!("Rendering {} set...", self.engine.rule());
        info!("Image size: {}x{}", self.width, self.height);
        info!("Center: {}, scale: {}", view.center(), view.scale());
        info!("Max iterations: {}", view.max_iterations());
        info!("Workers: {}", self.worker_count);

        let start = Instant::now();
        let buffer = self
            .engine
            .render_full_frame(self.width, self.height, self.worker_count, |_| {})?;

        info!("Full frame: {:?}", start.elapsed());

        self.full_frame = Some(buffer);

        Ok(())
    }

    pub fn render_tiled<C>(&mut self, cancel: &C) -> Result<(), Box<dyn std::error::Error>>
    where
        C: CancelToken + ?Sized,
    {
        let mut tiles = partition_canvas(self.width, self.height, self.tile_size);
        order_center_outward(&mut tiles, self.width, self.height);

        let start = Instant::now();
        let result = self.engine.render_tiled_canvas(
            tiles,
            self.width,
            self.height,
            self.worker_count,
            cancel,
            |_, _| {},
        )?;

        info!(
            "Tiled:      {:?} ({} of {} tiles)",
            start.elapsed(),
            result.report.tiles_attempted(),
            result.report.tiles_total()
        );

        self.tiled = Some(result);

        Ok(())
    }

    /// `None` until both renders have run.
    pub fn summary(&self) -> Option<RenderSummary> {
        let full_frame = self.full_frame.as_ref()?;
        let tiled = self.tiled.as_ref()?;

        let interior_pixels = (0..full_frame.height() as i32)
            .flat_map(|y| (0..full_frame.width() as i32).map(move |x| Point { x, y }))
            .filter(|&point| full_frame.pixel(point) == Some(Colour::BLACK))
            .count();

        Some(RenderSummary {
            width: full_frame.width(),
            height: full_frame.height(),
            interior_pixels,
            tiles_total: tiled.report.tiles_total(),
            tiles_composed: tiled.report.tiles_attempted() - tiled.report.failures().len(),
            tiled_matches_full_frame: tiled.canvas == *full_frame,
        })
    }
}
