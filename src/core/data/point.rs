#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Squared euclidean distance, used to order work outward from a centre.
    #[must_use]
    pub fn distance_squared(&self, other: Point) -> i64 {
        let dx = (self.x as i64) - (other.x as i64);
        let dy = (self.y as i64) - (other.y as i64);
        dx * dx + dy * dy
    }
}
