/// Decimal places kept on every derived pivot ratio.
pub const RATIO_PRECISION: i32 = 3;

/// Rounds to `decimals` places, half away from zero.
#[inline]
pub fn round_to(val: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (val * factor).round() / factor
}

/// |numerator| / |denominator| rounded to `RATIO_PRECISION`.
/// Returns None (undefined ratio) when the denominator is zero or either side is not finite.
#[inline]
pub fn safe_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    let num = numerator.abs();
    let den = denominator.abs();
    if den == 0.0 || !num.is_finite() || !den.is_finite() {
        return None;
    }
    Some(round_to(num / den, RATIO_PRECISION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_three_places() {
        assert_eq!(round_to(1.38461, 3), 1.385);
        assert_eq!(round_to(0.8666, 3), 0.867);
        assert_eq!(round_to(2.0, 3), 2.0);
    }

    #[test]
    fn test_safe_ratio_uses_absolute_distances() {
        assert_eq!(safe_ratio(14.0 - 12.0, 10.0 - 14.0), Some(0.5));
        assert_eq!(safe_ratio(-3.0, 2.0), Some(1.5));
    }

    #[test]
    fn test_safe_ratio_zero_denominator_is_undefined() {
        assert_eq!(safe_ratio(5.0, 0.0), None);
        assert_eq!(safe_ratio(0.0, 0.0), None);
        assert_eq!(safe_ratio(f64::NAN, 1.0), None);
    }
}
