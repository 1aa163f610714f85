use crate::core::fractals::palettes::Palette;
use crate::core::fractals::palettes::blue_white_gradient::blue_white_gradient;
use crate::core::fractals::palettes::fire_gradient::fire_gradient;
use crate::core::fractals::palettes::grayscale::grayscale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteKind {
    #[default]
    FireGradient,
    BlueWhiteGradient,
    Grayscale,
}

impl PaletteKind {
    pub const ALL: &'static [Self] = &[Self::FireGradient, Self::BlueWhiteGradient, Self::Grayscale];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::FireGradient => "Fire gradient",
            Self::BlueWhiteGradient => "Blue-white gradient",
            Self::Grayscale => "Grayscale",
        }
    }

    #[must_use]
    pub fn palette(self) -> Palette {
        match self {
            Self::FireGradient => fire_gradient,
            Self::BlueWhiteGradient => blue_white_gradient,
            Self::Grayscale => grayscale,
        }
    }
}

impl std::fmt::Display for PaletteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}
