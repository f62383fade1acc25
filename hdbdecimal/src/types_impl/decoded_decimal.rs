use bigdecimal::BigDecimal;
use num::{traits::Pow, Integer, Zero};
use num_bigint::{BigInt, BigUint, Sign};

/// Number of fractional digits in the rendered values.
pub const DISPLAY_SCALE: u32 = 4;

/// Selects how a [`DecodedDecimal`] is turned into text.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Rendering {
    /// The magnitude is narrowed to 64 bits and scaled as `f64`.
    ///
    /// This reproduces the output of the existing export tools, including their
    /// float rounding and the silent truncation of magnitudes beyond 64 bits.
    #[default]
    Legacy,
    /// The value is scaled with big-integer arithmetic and rounded half-to-even
    /// at the last displayed digit; no floating point is involved.
    Exact,
}

/// A DECIMAL value split into its elements: `(-1)^negative * magnitude * 10^exponent`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DecodedDecimal {
    negative: bool,
    magnitude: BigUint,
    exponent: i32,
}

impl DecodedDecimal {
    /// Assembles a value from its elements.
    pub fn new(negative: bool, magnitude: BigUint, exponent: i32) -> Self {
        Self {
            negative,
            magnitude,
            exponent,
        }
    }

    /// True if the sign bit was set; this includes negative zero.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The unsigned integer mantissa.
    pub fn magnitude(&self) -> &BigUint {
        &self.magnitude
    }

    /// The unbiased power-of-ten exponent.
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// The lowest 64 bits of the magnitude, reinterpreted as `i64`.
    ///
    /// Larger magnitudes are truncated silently, values from 2^63 on wrap into
    /// the negative range. This is what the legacy rendering works with.
    #[allow(clippy::cast_possible_wrap)]
    pub fn narrowed_magnitude(&self) -> i64 {
        self.magnitude
            .iter_u64_digits()
            .next()
            .map_or(0, |low| low as i64)
    }

    /// The legacy floating point value.
    ///
    /// The sign is applied to the narrowed integer before the conversion,
    /// so a zero magnitude always yields `+0.0`.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        let narrowed = self.narrowed_magnitude();
        if narrowed == 0 {
            return 0.0;
        }
        let signed = if self.negative {
            narrowed.wrapping_neg()
        } else {
            narrowed
        };
        signed as f64 * pow10(self.exponent)
    }

    /// Converts into a `BigDecimal`, without loss.
    pub fn to_big_decimal(&self) -> BigDecimal {
        let sign = if self.negative {
            Sign::Minus
        } else {
            Sign::Plus
        };
        BigDecimal::new(
            BigInt::from_biguint(sign, self.magnitude.clone()),
            -i64::from(self.exponent),
        )
    }

    /// Renders the value with exactly four fractional digits.
    pub fn render(&self, rendering: Rendering) -> String {
        match rendering {
            Rendering::Legacy => self.render_legacy(),
            Rendering::Exact => self.render_exact(),
        }
    }

    /// Renders [`to_f64`](Self::to_f64) with four fractional digits.
    pub fn render_legacy(&self) -> String {
        format_fixed(self.to_f64(), DISPLAY_SCALE as usize)
    }

    /// Renders the exact value with four fractional digits.
    pub fn render_exact(&self) -> String {
        self.render_exact_with_scale(DISPLAY_SCALE)
    }

    /// Renders the exact value with `scale` fractional digits, rounding half-to-even.
    ///
    /// A value that rounds to zero is rendered without sign.
    pub fn render_exact_with_scale(&self, scale: u32) -> String {
        let ten = BigUint::from(10_u8);
        let shift = i64::from(self.exponent) + i64::from(scale);
        let factor: BigUint = Pow::pow(&ten, shift.unsigned_abs());

        let scaled = if shift >= 0 {
            &self.magnitude * factor
        } else {
            let (quotient, remainder) = self.magnitude.div_rem(&factor);
            let twice: BigUint = remainder << 1_usize;
            match twice.cmp(&factor) {
                std::cmp::Ordering::Greater => quotient + 1_u8,
                std::cmp::Ordering::Equal if quotient.is_odd() => quotient + 1_u8,
                _ => quotient,
            }
        };

        let mut digits = scaled.to_string();
        let scale = scale as usize;
        if digits.len() <= scale {
            digits.insert_str(0, &"0".repeat(scale + 1 - digits.len()));
        }
        if scale > 0 {
            digits.insert(digits.len() - scale, '.');
        }
        if self.negative && !scaled.is_zero() {
            digits.insert(0, '-');
        }
        digits
    }
}

impl std::fmt::Display for DecodedDecimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(Rendering::default()))
    }
}

// Fixed-point formatting; infinities are spelled like the legacy tools do.
fn format_fixed(value: f64, scale: usize) -> String {
    if value.is_infinite() {
        if value.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else {
        format!("{value:.scale$}")
    }
}

const POW10_TAB: [f64; 32] = [
    1e00, 1e01, 1e02, 1e03, 1e04, 1e05, 1e06, 1e07, 1e08, 1e09, 1e10, 1e11, 1e12, 1e13, 1e14,
    1e15, 1e16, 1e17, 1e18, 1e19, 1e20, 1e21, 1e22, 1e23, 1e24, 1e25, 1e26, 1e27, 1e28, 1e29,
    1e30, 1e31,
];

const POW10_POS_TAB32: [f64; 10] = [
    1e00, 1e32, 1e64, 1e96, 1e128, 1e160, 1e192, 1e224, 1e256, 1e288,
];

const POW10_NEG_TAB32: [f64; 11] = [
    1e-00, 1e-32, 1e-64, 1e-96, 1e-128, 1e-160, 1e-192, 1e-224, 1e-256, 1e-288, 1e-320,
];

// 10^n as f64, composed from two table entries so that common exponents are exact.
fn pow10(n: i32) -> f64 {
    let abs = n.unsigned_abs() as usize;
    if (0..=308).contains(&n) {
        POW10_POS_TAB32[abs / 32] * POW10_TAB[abs % 32]
    } else if (-323..0).contains(&n) {
        POW10_NEG_TAB32[abs / 32] / POW10_TAB[abs % 32]
    } else if n > 0 {
        f64::INFINITY
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{pow10, DecodedDecimal, Rendering};
    use bigdecimal::BigDecimal;
    use num_bigint::BigUint;
    use std::str::FromStr;

    fn dd(negative: bool, magnitude: u64, exponent: i32) -> DecodedDecimal {
        DecodedDecimal::new(negative, BigUint::from(magnitude), exponent)
    }

    #[test]
    fn test_pow10() {
        assert_eq!(pow10(0), 1.0);
        assert_eq!(pow10(4), 10_000.0);
        assert_eq!(pow10(-4), 0.0001);
        assert_eq!(pow10(22), 1e22);
        assert!(pow10(308).is_finite());
        assert_eq!(pow10(309), f64::INFINITY);
        assert_eq!(pow10(-324), 0.0);
    }

    #[test]
    fn test_narrowing() {
        let big = (BigUint::from(1_u8) << 64_usize) + BigUint::from(5_u8);
        assert_eq!(DecodedDecimal::new(false, big, 0).narrowed_magnitude(), 5);

        let wrapping = BigUint::from(1_u8) << 63_usize;
        let decoded = DecodedDecimal::new(true, wrapping, 0);
        assert_eq!(decoded.narrowed_magnitude(), i64::MIN);
        assert_eq!(decoded.to_f64(), -9_223_372_036_854_775_808.0);
    }

    #[test]
    fn test_legacy() {
        assert_eq!(dd(false, 1_234_500, -4).render_legacy(), "123.4500");
        assert_eq!(dd(true, 1_234_500, -4).render_legacy(), "-123.4500");
        assert_eq!(dd(true, 0, -4).render_legacy(), "0.0000");
        assert_eq!(dd(false, 0, 400).render_legacy(), "0.0000");
        assert_eq!(dd(false, 1, 400).render_legacy(), "+Inf");
        assert_eq!(dd(true, 1, 400).render_legacy(), "-Inf");
        // too small for four digits, but still negative
        assert_eq!(dd(true, 1, -10).render_legacy(), "-0.0000");
    }

    #[test]
    fn test_exact() {
        assert_eq!(dd(false, 1_234_500, -4).render_exact(), "123.4500");
        assert_eq!(dd(false, 12_345, 0).render_exact(), "12345.0000");
        assert_eq!(dd(false, 12_345, 2).render_exact(), "1234500.0000");
        assert_eq!(dd(false, 5, -1).render_exact(), "0.5000");
        assert_eq!(dd(false, 7, -6).render_exact(), "0.0000");
        assert_eq!(dd(true, 7, -6).render_exact(), "0.0000");
        assert_eq!(dd(true, 0, 0).render_exact(), "0.0000");
        assert_eq!(dd(true, 123, -3).render_exact(), "-0.1230");

        // half-to-even at the last digit
        assert_eq!(dd(false, 125, -5).render_exact(), "0.0012");
        assert_eq!(dd(false, 135, -5).render_exact(), "0.0014");
        assert_eq!(dd(false, 1_251, -6).render_exact(), "0.0013");

        assert_eq!(dd(false, 12_345, -2).render_exact_with_scale(0), "123");
        assert_eq!(dd(false, 12_355, -2).render_exact_with_scale(1), "123.6");
    }

    #[test]
    fn test_exact_keeps_wide_magnitudes() {
        let magnitude = BigUint::from_str("1234567890123456789012345678901").unwrap();
        let decoded = DecodedDecimal::new(false, magnitude, -4);
        assert_eq!(decoded.render_exact(), "123456789012345678901234567.8901");
        assert_ne!(decoded.render(Rendering::Legacy), decoded.render_exact());
    }

    #[test]
    fn test_to_big_decimal() {
        assert_eq!(
            dd(true, 1_234_500, -4).to_big_decimal(),
            BigDecimal::from_str("-123.45").unwrap()
        );
        assert_eq!(
            dd(false, 12, 3).to_big_decimal(),
            BigDecimal::from_str("12000").unwrap()
        );
    }

    #[test]
    fn test_default_rendering() {
        assert_eq!(Rendering::default(), Rendering::Legacy);
        assert_eq!(dd(false, 25, -1).to_string(), "2.5000");
    }
}
