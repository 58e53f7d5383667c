use crate::Sample;

/// Number of consecutive samples the kernel reads.
pub const WINDOW_LEN: usize = 4;

/// Evaluates the 4-point cubic between `x[1]` and `x[2]`.
///
/// `x` must hold at least [`WINDOW_LEN`] samples and `fract` is the offset
/// past `x[1]` in `[0, 1)`. At `fract == 0` the result is exactly `x[1]`.
#[inline]
#[must_use]
pub fn cubic<T: Sample>(x: &[T], fract: T) -> T {
    let x21_diff = x[2] - x[1];
    let common = (x[3] - x[0] - T::THREE * x21_diff) * fract
        + (x[3] + T::TWO * x[0] - T::THREE * x[1]);

    x[1] + fract * (x21_diff - T::ONE_SIXTH * (T::ONE - fract) * common)
}
