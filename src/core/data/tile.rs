use crate::core::data::point::Point;

/// Rectangle in canvas pixel space. `x`/`y` is the top-left pixel; `width`
/// and `height` may be zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TileBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl TileBounds {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// One past the right-most column.
    #[must_use]
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// One past the bottom-most row.
    #[must_use]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        let (px, py) = (point.x as i64, point.y as i64);
        self.x as i64 <= px && px < self.right() && self.y as i64 <= py && py < self.bottom()
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// A unit of work for progressive rendering. Immutable once built.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    bounds: TileBounds,
    center: Point,
}

impl Tile {
    #[must_use]
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        let bounds = TileBounds {
            x,
            y,
            width,
            height,
        };
        let center = Point {
            x: (x as i64 + (width / 2) as i64) as i32,
            y: (y as i64 + (height / 2) as i64) as i32,
        };

        Self { bounds, center }
    }

    /// Builds a tile whose ordering centre is supplied by the caller.
    #[must_use]
    pub fn with_center(bounds: TileBounds, center: Point) -> Self {
        Self { bounds, center }
    }

    #[must_use]
    pub fn bounds(&self) -> TileBounds {
        self.bounds
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        Point {
            x: self.bounds.x,
            y: self.bounds.y,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.bounds.height
    }
}
