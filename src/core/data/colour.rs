#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    /// Byte order used by pixel buffers.
    #[must_use]
    pub const fn to_bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }

    #[must_use]
    pub const fn from_bgr(bytes: [u8; 3]) -> Self {
        Self {
            r: bytes[2],
            g: bytes[1],
            b: bytes[0],
        }
    }
}
