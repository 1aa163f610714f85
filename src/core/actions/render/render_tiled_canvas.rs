use crossbeam::channel;
use log::debug;
use std::num::NonZeroUsize;
use std::thread;

use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::dispatch_tiles::{DispatchError, DispatchReport, TileDispatcher};
use crate::core::actions::render::render_engine::RenderEngine;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::tile::Tile;

/// Error raised by a tile worker when the compositor has stopped listening.
pub const RECEIVER_CLOSED: &str = "tile receiver closed";

#[derive(Debug)]
pub struct TiledRender {
    pub canvas: PixelBuffer,
    pub report: DispatchReport<&'static str>,
}

impl RenderEngine {
    /// Progressive render: workers render tiles into their own buffers and send
    /// them back to the calling thread, which copies each one into the canvas
    /// and then calls `on_tile` with it. Tiles arrive in completion order.
    ///
    /// If `cancel` fires, the returned canvas holds only the tiles finished so
    /// far; the rest stays black.
    pub fn render_tiled_canvas<C, T>(
        &self,
        tiles: Vec<Tile>,
        canvas_width: u32,
        canvas_height: u32,
        worker_count: NonZeroUsize,
        cancel: &C,
        mut on_tile: T,
    ) -> Result<TiledRender, DispatchError>
    where
        C: CancelToken + ?Sized,
        T: FnMut(&Tile, &PixelBuffer),
    {
        let mut canvas = if canvas_width == 0 || canvas_height == 0 {
            PixelBuffer::new(1, 1)
        } else {
            PixelBuffer::new(canvas_width, canvas_height)
        };

        let (sender, receiver) = channel::unbounded::<(Tile, PixelBuffer)>();

        let report = thread::scope(|scope| {
            let dispatch = scope.spawn(move || {
                let mut dispatcher = TileDispatcher::new(tiles);

                dispatcher.dispatch(
                    worker_count,
                    |tile: &Tile| {
                        let (buffer, _) = self.render_tile_into_own_buffer(tile, canvas_width, canvas_height);
                        sender.send((*tile, buffer)).map_err(|_| RECEIVER_CLOSED)
                    },
                    cancel,
                )
            });

            for (tile, buffer) in receiver.iter() {
                canvas.blit(&buffer, tile.top_left());
                on_tile(&tile, &canvas);
            }

            dispatch
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
        })?;

        debug!(
            "tiled canvas {}x{}: {} of {} tiles composed",
            canvas_width,
            canvas_height,
            report.tiles_attempted() - report.failures().len(),
            report.tiles_total()
        );

        Ok(TiledRender { canvas, report })
    }
}
