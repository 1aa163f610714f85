use log::debug;
use rayon::prelude::*;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::core::actions::render::render_engine::{RenderEngine, RenderError, write_bgr};
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer};
use crate::core::util::plane_mapping::PlaneMapping;
use crate::core::util::worker_count::workers_for_units;

impl RenderEngine {
    /// Renders the whole canvas, splitting its rows into one contiguous band
    /// per worker.
    ///
    /// `progress` receives a percentage in `[0, 100]` after every finished
    /// row. It is called from the worker threads, so values can arrive out of
    /// order or repeat.
    ///
    /// A zero width or height yields a zeroed 1x1 buffer.
    pub fn render_full_frame<P>(
        &self,
        width: u32,
        height: u32,
        worker_count: NonZeroUsize,
        progress: P,
    ) -> Result<PixelBuffer, RenderError>
    where
        P: Fn(u8) + Sync,
    {
        if width == 0 || height == 0 {
            debug!("degenerate canvas {}x{}, returning 1x1 buffer", width, height);
            return Ok(PixelBuffer::new(1, 1));
        }

        let Ok(mapping) = self.mapping(width, height) else {
            return Ok(PixelBuffer::new(1, 1));
        };

        let rows_total = height as usize;
        let num_workers = workers_for_units(worker_count, rows_total);
        let band_rows = rows_total.div_ceil(num_workers.get());

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_workers.get())
            .thread_name(|index| format!("render-band-{}", index))
            .build()?;

        debug!(
            "rendering {} {}x{} across {} workers",
            self.rule(),
            width,
            height,
            num_workers
        );

        let start = Instant::now();
        let mut buffer = PixelBuffer::new(width, height);
        let stride = buffer.stride();
        let rows_done = AtomicUsize::new(0);

        pool.install(|| {
            buffer
                .data_mut()
                .par_chunks_mut(band_rows * stride)
                .enumerate()
                .for_each(|(band, band_data)| {
                    for (offset, row) in band_data.chunks_mut(stride).enumerate() {
                        let y = (band * band_rows + offset) as i32;
                        self.render_row(&mapping, y, width, row);

                        let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
                        progress((done * 100 / rows_total) as u8);
                    }
                });
        });

        debug!("full frame rendered in {:?}", start.elapsed());

        Ok(buffer)
    }

    fn render_row(&self, mapping: &PlaneMapping, y: i32, width: u32, row: &mut [u8]) {
        for (x, pixel) in row
            .chunks_exact_mut(BYTES_PER_PIXEL)
            .take(width as usize)
            .enumerate()
        {
            write_bgr(pixel, self.colour_with(mapping, x as i32, y));
        }
    }
}
