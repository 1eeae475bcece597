/// Raises `base` to a small non-negative integer power by repeated multiplication.
///
/// The compensation polynomials are defined in terms of this product rather than
/// `powf`, and the rounding of the result depends on that order: `pow_n(x, 3)` is
/// `(1.0 * x * x) * x`.
#[inline]
pub(crate) fn pow_n(base: f64, power: u8) -> f64 {
    let mut result = 1.0;
    for _ in 0..power {
        result *= base;
    }

    result
}
