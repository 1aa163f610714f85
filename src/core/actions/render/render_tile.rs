use log::trace;

use crate::core::actions::render::render_engine::{RenderEngine, RenderError, write_bgr};
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer};
use crate::core::data::tile::Tile;

impl RenderEngine {
    /// Renders `tile` straight into a caller-owned canvas buffer.
    ///
    /// Pixels are mapped with the full canvas size, so a tile comes out the
    /// same as the matching region of a full-frame render. Tile pixels outside
    /// the canvas, or past the end of `buffer`, are skipped.
    pub fn render_tile_into_shared_buffer(
        &self,
        buffer: &mut [u8],
        stride: usize,
        bytes_per_pixel: usize,
        tile: &Tile,
        canvas_width: u32,
        canvas_height: u32,
    ) -> Result<(), RenderError> {
        if bytes_per_pixel < BYTES_PER_PIXEL {
            return Err(RenderError::UnsupportedPixelFormat { bytes_per_pixel });
        }

        let bounds = tile.bounds();

        if bounds.is_empty() || canvas_height == 0 {
            return Ok(());
        }

        let Ok(mapping) = self.mapping(canvas_width, canvas_height) else {
            return Ok(());
        };

        let x_start = (bounds.x as i64).max(0);
        let x_end = bounds.right().min(canvas_width as i64);
        let y_start = (bounds.y as i64).max(0);
        let y_end = bounds.bottom().min(canvas_height as i64);

        trace!("rendering tile at {:?} into shared buffer", tile.top_left());

        for y in y_start..y_end {
            for x in x_start..x_end {
                let offset = y as usize * stride + x as usize * bytes_per_pixel;

                let Some(pixel) = buffer.get_mut(offset..offset + bytes_per_pixel) else {
                    continue;
                };

                write_bgr(pixel, self.colour_with(&mapping, x as i32, y as i32));
            }
        }

        Ok(())
    }

    /// [`Self::render_tile_into_shared_buffer`] for a canvas the engine allocated.
    pub fn render_tile_into_canvas(&self, canvas: &mut PixelBuffer, tile: &Tile) -> Result<(), RenderError> {
        let (width, height, stride) = (canvas.width(), canvas.height(), canvas.stride());

        self.render_tile_into_shared_buffer(canvas.data_mut(), stride, BYTES_PER_PIXEL, tile, width, height)
    }

    /// Renders `tile` into a new packed buffer of exactly the tile's size,
    /// indexed from the tile's top-left corner. Returns the buffer and its
    /// bytes per pixel.
    ///
    /// Every tile pixel is computed, including any outside the canvas. An empty
    /// tile or canvas yields a zeroed 1x1 buffer.
    #[must_use]
    pub fn render_tile_into_own_buffer(
        &self,
        tile: &Tile,
        canvas_width: u32,
        canvas_height: u32,
    ) -> (PixelBuffer, usize) {
        let bounds = tile.bounds();

        if bounds.is_empty() || canvas_height == 0 {
            return (PixelBuffer::new(1, 1), BYTES_PER_PIXEL);
        }

        let Ok(mapping) = self.mapping(canvas_width, canvas_height) else {
            return (PixelBuffer::new(1, 1), BYTES_PER_PIXEL);
        };

        trace!("rendering tile at {:?} into own buffer", tile.top_left());

        let mut buffer = PixelBuffer::new(bounds.width, bounds.height);
        let stride = buffer.stride();

        for (local_y, row) in buffer.data_mut().chunks_mut(stride).enumerate() {
            let y = bounds.y + local_y as i32;

            for (local_x, pixel) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                let x = bounds.x + local_x as i32;
                write_bgr(pixel, self.colour_with(&mapping, x, y));
            }
        }

        (buffer, BYTES_PER_PIXEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::point::Point;
    use crate::core::data::precision_complex::PrecisionComplex;
    use crate::core::data::view_parameters::ViewParameters;
    use crate::core::fractals::iteration_rule::IterationRule;
    use crate::core::util::partition_canvas::partition_canvas;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::num::NonZeroUsize;

    const WIDTH: u32 = 14;
    const HEIGHT: u32 = 10;

    fn engine() -> RenderEngine {
        let view = ViewParameters::new(PrecisionComplex::new(dec!(-0.5), dec!(0.25)), dec!(3), 20, dec!(4)).unwrap();
        RenderEngine::new(IterationRule::BurningShipMandelbrot, view)
    }

    fn full_frame(engine: &RenderEngine) -> PixelBuffer {
        engine
            .render_full_frame(WIDTH, HEIGHT, NonZeroUsize::new(2).unwrap(), |_| {})
            .unwrap()
    }

    #[test]
    fn test_shared_tiles_reproduce_full_frame() {
        let engine = engine();
        let mut canvas = PixelBuffer::new(WIDTH, HEIGHT);

        for tile in partition_canvas(WIDTH, HEIGHT, 4) {
            engine.render_tile_into_canvas(&mut canvas, &tile).unwrap();
        }

        assert_eq!(canvas, full_frame(&engine));
    }

    #[test]
    fn test_shared_tile_only_touches_its_bounds() {
        let engine = engine();
        let mut canvas = PixelBuffer::new(WIDTH, HEIGHT);
        let tile = Tile::new(2, 3, 4, 2);

        engine.render_tile_into_canvas(&mut canvas, &tile).unwrap();

        for y in 0..HEIGHT as i32 {
            for x in 0..WIDTH as i32 {
                let point = Point { x, y };
                let expected = if tile.bounds().contains_point(point) {
                    engine.colour_at(x, y, WIDTH, HEIGHT).unwrap()
                } else {
                    crate::core::data::colour::Colour::BLACK
                };
                assert_eq!(canvas.pixel(point), Some(expected), "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_shared_tile_past_canvas_edge_is_clamped() {
        let engine = engine();
        let mut canvas = PixelBuffer::new(WIDTH, HEIGHT);

        engine
            .render_tile_into_canvas(&mut canvas, &Tile::new(-3, 8, 8, 8))
            .unwrap();

        let expected = engine.colour_at(0, 9, WIDTH, HEIGHT).unwrap();
        assert_eq!(canvas.pixel(Point { x: 0, y: 9 }), Some(expected));
        assert_eq!(canvas.buffer_size(), (WIDTH * HEIGHT * 3) as usize);
    }

    #[test]
    fn test_shared_buffer_shorter_than_canvas_is_not_overrun() {
        let engine = engine();
        let mut short = vec![0u8; 20];

        engine
            .render_tile_into_shared_buffer(&mut short, 6, 3, &Tile::new(0, 0, 2, 10), 2, 10)
            .unwrap();

        let colour = engine.colour_at(1, 0, 2, 10).unwrap();
        assert_eq!(&short[3..6], &colour.to_bgr());
        assert_eq!(short.len(), 20);
    }

    #[test]
    fn test_shared_buffer_with_padded_stride_and_alpha() {
        let engine = engine();
        let stride = 16;
        let mut data = vec![0u8; stride * 2];

        engine
            .render_tile_into_shared_buffer(&mut data, stride, 4, &Tile::new(0, 0, 3, 2), 3, 2)
            .unwrap();

        let colour = engine.colour_at(2, 1, 3, 2).unwrap();
        assert_eq!(&data[stride + 8..stride + 12], &[colour.b, colour.g, colour.r, 255]);
        assert_eq!(&data[12..16], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_shared_buffer_rejects_small_pixels() {
        let engine = engine();
        let mut data = vec![0u8; 16];

        let result = engine.render_tile_into_shared_buffer(&mut data, 8, 2, &Tile::new(0, 0, 2, 2), 2, 2);

        assert!(matches!(
            result,
            Err(RenderError::UnsupportedPixelFormat { bytes_per_pixel: 2 })
        ));
    }

    #[test]
    fn test_own_buffer_matches_full_frame_region() {
        let engine = engine();
        let full = full_frame(&engine);
        let tile = Tile::new(5, 2, 6, 5);

        let (buffer, bytes_per_pixel) = engine.render_tile_into_own_buffer(&tile, WIDTH, HEIGHT);

        assert_eq!(bytes_per_pixel, 3);
        assert_eq!((buffer.width(), buffer.height()), (6, 5));

        for local_y in 0..5 {
            for local_x in 0..6 {
                let canvas_point = Point { x: 5 + local_x, y: 2 + local_y };
                assert_eq!(
                    buffer.pixel(Point { x: local_x, y: local_y }),
                    full.pixel(canvas_point)
                );
            }
        }
    }

    #[test]
    fn test_own_buffers_blitted_reproduce_full_frame() {
        let engine = engine();
        let mut canvas = PixelBuffer::new(WIDTH, HEIGHT);

        for tile in partition_canvas(WIDTH, HEIGHT, 3) {
            let (buffer, _) = engine.render_tile_into_own_buffer(&tile, WIDTH, HEIGHT);
            canvas.blit(&buffer, tile.top_left());
        }

        assert_eq!(canvas, full_frame(&engine));
    }

    #[test]
    fn test_own_buffer_for_empty_tile() {
        let (buffer, bytes_per_pixel) = engine().render_tile_into_own_buffer(&Tile::new(0, 0, 0, 4), WIDTH, HEIGHT);

        assert_eq!((buffer.width(), buffer.height()), (1, 1));
        assert_eq!(bytes_per_pixel, 3);
    }

    #[test]
    fn test_own_buffer_for_zero_width_canvas() {
        let (buffer, _) = engine().render_tile_into_own_buffer(&Tile::new(0, 0, 4, 4), 0, HEIGHT);

        assert_eq!((buffer.width(), buffer.height()), (1, 1));
    }

    #[test]
    fn test_own_buffer_with_huge_julia_view() {
        let view = ViewParameters::new(PrecisionComplex::new(dec!(0), Decimal::MIN), Decimal::MAX, 10, dec!(4))
            .unwrap();
        let engine = RenderEngine::new(IterationRule::Julia, view);

        let (buffer, _) = engine.render_tile_into_own_buffer(&Tile::new(0, 0, 10, 10), 10, 10);

        assert_eq!((buffer.width(), buffer.height()), (10, 10));
        assert_eq!(engine.escape_time_at(3, 7, 10, 10), Ok(0));
    }
}
