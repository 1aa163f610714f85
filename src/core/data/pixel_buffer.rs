use crate::core::data::colour::Colour;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

/// Bytes per pixel of every buffer the engine allocates (B, G, R).
pub const BYTES_PER_PIXEL: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelBufferError {
    StrideTooSmall {
        stride: usize,
        min_stride: usize,
    },
    InvalidAlignment {
        alignment: usize,
    },
    BoundsMismatch {
        expected_size: usize,
        buffer_size: usize,
    },
    PixelOutsideBounds {
        pixel: Point,
        width: u32,
        height: u32,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrideTooSmall { stride, min_stride } => {
                write!(f, "stride {} is smaller than a packed row of {} bytes", stride, min_stride)
            }
            Self::InvalidAlignment { alignment } => {
                write!(f, "row alignment must be a non-zero power of two, got {}", alignment)
            }
            Self::BoundsMismatch {
                expected_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "expected a buffer of {} bytes but got {} bytes",
                    expected_size, buffer_size
                )
            }
            Self::PixelOutsideBounds {
                pixel,
                width,
                height,
            } => {
                write!(
                    f,
                    "pixel at x:{}, y:{} outside of {}x{} buffer",
                    pixel.x, pixel.y, width, height
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

/// Row-major BGR image, 3 bytes per pixel, rows `stride` bytes apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Zeroed buffer with packed rows (`stride == width * 3`).
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let stride = packed_stride(width);

        Self {
            width,
            height,
            stride,
            data: vec![0; stride * height as usize],
        }
    }

    pub fn with_stride(width: u32, height: u32, stride: usize) -> Result<Self, PixelBufferError> {
        let min_stride = packed_stride(width);

        if stride < min_stride {
            return Err(PixelBufferError::StrideTooSmall { stride, min_stride });
        }

        Ok(Self {
            width,
            height,
            stride,
            data: vec![0; stride * height as usize],
        })
    }

    /// Zeroed buffer whose rows are padded to a multiple of `alignment` bytes,
    /// e.g. 4 for bitmap-compatible rows.
    pub fn aligned(width: u32, height: u32, alignment: usize) -> Result<Self, PixelBufferError> {
        if !alignment.is_power_of_two() {
            return Err(PixelBufferError::InvalidAlignment { alignment });
        }

        let stride = packed_stride(width).next_multiple_of(alignment);
        Self::with_stride(width, height, stride)
    }

    pub fn from_data(
        width: u32,
        height: u32,
        stride: usize,
        data: Vec<u8>,
    ) -> Result<Self, PixelBufferError> {
        let min_stride = packed_stride(width);

        if stride < min_stride {
            return Err(PixelBufferError::StrideTooSmall { stride, min_stride });
        }

        let expected_size = stride * height as usize;

        if expected_size != data.len() {
            return Err(PixelBufferError::BoundsMismatch {
                expected_size,
                buffer_size: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.data.len()
    }

    fn offset(&self, pixel: Point) -> Option<usize> {
        if pixel.x < 0 || pixel.y < 0 || pixel.x as u32 >= self.width || pixel.y as u32 >= self.height {
            return None;
        }

        Some(pixel.y as usize * self.stride + pixel.x as usize * BYTES_PER_PIXEL)
    }

    #[must_use]
    pub fn pixel(&self, pixel: Point) -> Option<Colour> {
        let index = self.offset(pixel)?;
        let bytes = &self.data[index..index + BYTES_PER_PIXEL];

        Some(Colour::from_bgr([bytes[0], bytes[1], bytes[2]]))
    }

    pub fn set_pixel(&mut self, pixel: Point, colour: Colour) -> Result<(), PixelBufferError> {
        let index = self.offset(pixel).ok_or(PixelBufferError::PixelOutsideBounds {
            pixel,
            width: self.width,
            height: self.height,
        })?;

        self.data[index..index + BYTES_PER_PIXEL].copy_from_slice(&colour.to_bgr());

        Ok(())
    }

    /// Copies `source` with its top-left corner at `at`. Parts of `source` that
    /// land outside this buffer are dropped.
    pub fn blit(&mut self, source: &PixelBuffer, at: Point) {
        let first_col = (-(at.x as i64)).max(0);
        let last_col = (source.width as i64).min(self.width as i64 - at.x as i64);
        let first_row = (-(at.y as i64)).max(0);
        let last_row = (source.height as i64).min(self.height as i64 - at.y as i64);

        if first_col >= last_col || first_row >= last_row {
            return;
        }

        let run = (last_col - first_col) as usize * BYTES_PER_PIXEL;

        for row in first_row..last_row {
            let src = row as usize * source.stride + first_col as usize * BYTES_PER_PIXEL;
            let dst = (at.y as i64 + row) as usize * self.stride
                + (at.x as i64 + first_col) as usize * BYTES_PER_PIXEL;

            self.data[dst..dst + run].copy_from_slice(&source.data[src..src + run]);
        }
    }
}

fn packed_stride(width: u32) -> usize {
    width as usize * BYTES_PER_PIXEL
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(width: u32, height: u32, colour: Colour) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                buffer.set_pixel(Point { x, y }, colour).unwrap();
            }
        }
        buffer
    }

    #[test]
    fn test_new_creates_zeroed_packed_buffer() {
        let buffer = PixelBuffer::new(10, 10);

        assert_eq!(buffer.stride(), 30);
        assert_eq!(buffer.buffer_size(), 300);
        assert!(buffer.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_aligned_pads_rows() {
        let buffer = PixelBuffer::aligned(5, 2, 4).unwrap();

        assert_eq!(buffer.stride(), 16);
        assert_eq!(buffer.buffer_size(), 32);
    }

    #[test]
    fn test_aligned_rejects_non_power_of_two() {
        assert_eq!(
            PixelBuffer::aligned(5, 2, 3),
            Err(PixelBufferError::InvalidAlignment { alignment: 3 })
        );
        assert_eq!(
            PixelBuffer::aligned(5, 2, 0),
            Err(PixelBufferError::InvalidAlignment { alignment: 0 })
        );
    }

    #[test]
    fn test_with_stride_too_small() {
        assert_eq!(
            PixelBuffer::with_stride(4, 4, 11),
            Err(PixelBufferError::StrideTooSmall {
                stride: 11,
                min_stride: 12
            })
        );
    }

    #[test]
    fn test_from_data_size_mismatch() {
        let result = PixelBuffer::from_data(2, 2, 6, vec![0; 3]);

        assert_eq!(
            result,
            Err(PixelBufferError::BoundsMismatch {
                expected_size: 12,
                buffer_size: 3
            })
        );
    }

    #[test]
    fn test_set_pixel_writes_bgr() {
        let mut buffer = PixelBuffer::new(3, 3);
        buffer
            .set_pixel(Point { x: 1, y: 1 }, Colour { r: 255, g: 1, b: 2 })
            .unwrap();

        assert_eq!(&buffer.data()[12..15], &[2, 1, 255]);
        assert_eq!(buffer.pixel(Point { x: 1, y: 1 }), Some(Colour { r: 255, g: 1, b: 2 }));
    }

    #[test]
    fn test_set_pixel_respects_stride() {
        let mut buffer = PixelBuffer::with_stride(2, 2, 8).unwrap();
        buffer
            .set_pixel(Point { x: 0, y: 1 }, Colour { r: 9, g: 9, b: 9 })
            .unwrap();

        assert_eq!(&buffer.data()[8..11], &[9, 9, 9]);
        assert!(buffer.data()[6..8].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_set_pixel_outside_bounds() {
        let mut buffer = PixelBuffer::new(3, 3);
        let result = buffer.set_pixel(Point { x: -1, y: 0 }, Colour::BLACK);

        assert_eq!(
            result,
            Err(PixelBufferError::PixelOutsideBounds {
                pixel: Point { x: -1, y: 0 },
                width: 3,
                height: 3
            })
        );
        assert_eq!(buffer.pixel(Point { x: 3, y: 0 }), None);
    }

    #[test]
    fn test_blit_inside() {
        let red = Colour { r: 255, g: 0, b: 0 };
        let mut canvas = PixelBuffer::new(4, 4);
        let tile = filled(2, 2, red);

        canvas.blit(&tile, Point { x: 1, y: 2 });

        assert_eq!(canvas.pixel(Point { x: 1, y: 2 }), Some(red));
        assert_eq!(canvas.pixel(Point { x: 2, y: 3 }), Some(red));
        assert_eq!(canvas.pixel(Point { x: 0, y: 2 }), Some(Colour::BLACK));
        assert_eq!(canvas.pixel(Point { x: 1, y: 1 }), Some(Colour::BLACK));
    }

    #[test]
    fn test_blit_clamps_to_destination() {
        let blue = Colour { r: 0, g: 0, b: 255 };
        let mut canvas = PixelBuffer::new(3, 3);
        let tile = filled(4, 4, blue);

        canvas.blit(&tile, Point { x: 2, y: -2 });

        assert_eq!(canvas.pixel(Point { x: 2, y: 0 }), Some(blue));
        assert_eq!(canvas.pixel(Point { x: 2, y: 1 }), Some(blue));
        assert_eq!(canvas.pixel(Point { x: 2, y: 2 }), Some(Colour::BLACK));
        assert_eq!(canvas.pixel(Point { x: 1, y: 0 }), Some(Colour::BLACK));
    }

    #[test]
    fn test_blit_fully_outside_is_noop() {
        let mut canvas = PixelBuffer::new(3, 3);
        let tile = filled(2, 2, Colour { r: 1, g: 1, b: 1 });

        canvas.blit(&tile, Point { x: 10, y: 10 });

        assert!(canvas.data().iter().all(|&b| b == 0));
    }
}
