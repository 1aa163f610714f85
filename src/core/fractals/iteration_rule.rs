use crate::core::data::precision_complex::PrecisionComplex;
use rust_decimal::Decimal;

/// The closed family of escape-time recurrences `z -> f(z)² + c`.
///
/// Mandelbrot-family rules start from `z = 0` and use the pixel as `c`;
/// Julia-family rules start from the pixel and use a constant shared by the
/// whole image. Burning Ship variants fold `z` into the first quadrant before
/// squaring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IterationRule {
    #[default]
    Mandelbrot,
    Julia,
    BurningShipMandelbrot,
    BurningShipJulia,
}

impl IterationRule {
    pub const ALL: &'static [Self] = &[
        Self::Mandelbrot,
        Self::Julia,
        Self::BurningShipMandelbrot,
        Self::BurningShipJulia,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia => "Julia",
            Self::BurningShipMandelbrot => "Burning Ship (Mandelbrot)",
            Self::BurningShipJulia => "Burning Ship (Julia)",
        }
    }

    #[must_use]
    pub const fn is_julia_family(self) -> bool {
        matches!(self, Self::Julia | Self::BurningShipJulia)
    }

    #[must_use]
    pub const fn is_burning_ship(self) -> bool {
        matches!(self, Self::BurningShipMandelbrot | Self::BurningShipJulia)
    }

    /// Picks `(z0, c)` for a pixel's plane coordinate.
    #[must_use]
    pub fn seed(
        self,
        point: PrecisionComplex,
        julia_constant: PrecisionComplex,
    ) -> (PrecisionComplex, PrecisionComplex) {
        if self.is_julia_family() {
            (point, julia_constant)
        } else {
            (PrecisionComplex::ZERO, point)
        }
    }

    /// Number of steps taken before `|z|²` exceeds `threshold_squared`, capped
    /// at `max_iterations`. A start value already past the threshold gives 0;
    /// a point that never escapes gives `max_iterations`.
    #[must_use]
    pub fn iterate(
        self,
        z0: PrecisionComplex,
        c: PrecisionComplex,
        max_iterations: u32,
        threshold_squared: Decimal,
    ) -> u32 {
        let burning_ship = self.is_burning_ship();
        let mut z = z0;
        let mut iteration = 0;

        while iteration < max_iterations && z.magnitude_squared() <= threshold_squared {
            let folded = if burning_ship { z.abs_components() } else { z };

            iteration += 1;

            // Leaving the decimal range is as good as escaping.
            match folded.checked_square_add(c) {
                Some(next) => z = next,
                None => break,
            }
        }

        iteration
    }

    #[must_use]
    pub fn escape_time(
        self,
        point: PrecisionComplex,
        julia_constant: PrecisionComplex,
        max_iterations: u32,
        threshold_squared: Decimal,
    ) -> u32 {
        let (z0, c) = self.seed(point, julia_constant);
        self.iterate(z0, c, max_iterations, threshold_squared)
    }
}

impl std::fmt::Display for IterationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn complex(real: Decimal, imag: Decimal) -> PrecisionComplex {
        PrecisionComplex::new(real, imag)
    }

    #[test]
    fn test_origin_never_escapes() {
        for max_iterations in [1, 10, 100, 1000] {
            let result = IterationRule::Mandelbrot.iterate(
                PrecisionComplex::ZERO,
                PrecisionComplex::ZERO,
                max_iterations,
                dec!(4),
            );

            assert_eq!(result, max_iterations);
        }
    }

    #[test]
    fn test_far_point_escapes_on_first_step() {
        for max_iterations in [1, 2, 50, 500] {
            let result = IterationRule::Mandelbrot.iterate(
                PrecisionComplex::ZERO,
                complex(dec!(10), dec!(10)),
                max_iterations,
                dec!(4),
            );

            assert_eq!(result, 1);
        }
    }

    #[test]
    fn test_start_beyond_threshold_returns_zero() {
        for rule in IterationRule::ALL {
            let result = rule.iterate(complex(dec!(3), dec!(0)), PrecisionComplex::ZERO, 100, dec!(4));
            assert_eq!(result, 0, "{}", rule);
        }
    }

    #[test]
    fn test_zero_budget_returns_zero() {
        let result = IterationRule::Mandelbrot.iterate(
            PrecisionComplex::ZERO,
            PrecisionComplex::ZERO,
            0,
            dec!(4),
        );

        assert_eq!(result, 0);
    }

    #[test]
    fn test_point_on_threshold_has_not_escaped() {
        // c = -2 settles on z = 2, where |z|² equals the threshold exactly
        let result = IterationRule::Mandelbrot.iterate(
            PrecisionComplex::ZERO,
            complex(dec!(-2), dec!(0)),
            64,
            dec!(4),
        );

        assert_eq!(result, 64);
    }

    #[test]
    fn test_seed_mandelbrot_family() {
        let point = complex(dec!(0.25), dec!(-0.5));
        let constant = complex(dec!(-0.7), dec!(0.27));

        for rule in [IterationRule::Mandelbrot, IterationRule::BurningShipMandelbrot] {
            assert_eq!(rule.seed(point, constant), (PrecisionComplex::ZERO, point));
        }
    }

    #[test]
    fn test_seed_julia_family() {
        let point = complex(dec!(0.25), dec!(-0.5));
        let constant = complex(dec!(-0.7), dec!(0.27));

        for rule in [IterationRule::Julia, IterationRule::BurningShipJulia] {
            assert_eq!(rule.seed(point, constant), (point, constant));
        }
    }

    #[test]
    fn test_burning_ship_mandelbrot_diverges_from_classic() {
        // classic: -1+i -> -1-i -> -1+3i escapes after 3 steps
        // burning ship: -1+i -> (1+i)² + c = -1+3i escapes after 2 steps
        let c = complex(dec!(-1), dec!(1));

        let classic = IterationRule::Mandelbrot.escape_time(c, PrecisionComplex::ZERO, 50, dec!(4));
        let burning = IterationRule::BurningShipMandelbrot.escape_time(c, PrecisionComplex::ZERO, 50, dec!(4));

        assert_eq!(classic, 3);
        assert_eq!(burning, 2);
    }

    #[test]
    fn test_burning_ship_julia_diverges_from_classic() {
        // classic cycles -i, -1+i, -i, ... forever; the fold sends -1+i to 3i
        let z0 = complex(dec!(-1), dec!(1));
        let constant = complex(dec!(0), dec!(1));

        let classic = IterationRule::Julia.escape_time(z0, constant, 50, dec!(4));
        let burning = IterationRule::BurningShipJulia.escape_time(z0, constant, 50, dec!(4));

        assert_eq!(classic, 50);
        assert_eq!(burning, 1);
    }

    #[test]
    fn test_burning_ship_matches_classic_in_first_quadrant_orbits() {
        // real, positive orbits are unchanged by the fold
        let c = complex(dec!(0.25), dec!(0));

        let classic = IterationRule::Mandelbrot.escape_time(c, PrecisionComplex::ZERO, 30, dec!(4));
        let burning = IterationRule::BurningShipMandelbrot.escape_time(c, PrecisionComplex::ZERO, 30, dec!(4));

        assert_eq!(classic, burning);
    }

    #[test]
    fn test_overflow_counts_as_escape() {
        let huge = complex(dec!(10000000000000000), dec!(0));
        let result = IterationRule::Julia.iterate(huge, PrecisionComplex::ZERO, 10, Decimal::MAX);

        assert!(result < 10);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(IterationRule::BurningShipJulia.to_string(), "Burning Ship (Julia)");
        assert_eq!(IterationRule::default(), IterationRule::Mandelbrot);
    }
}
