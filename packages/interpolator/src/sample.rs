//! Floating-point sample abstraction.
//!
//! The engine is written once against [`Sample`] and instantiated for both
//! `f32` and `f64`.

use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

mod private {
    pub trait Sealed {}
}

/// A floating-point sample type the interpolator can operate on.
///
/// This trait is sealed and implemented for `f32` and `f64`.
pub trait Sample:
    Copy
    + Debug
    + Display
    + Default
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
    + Send
    + Sync
    + 'static
    + private::Sealed
{
    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;
    const THREE: Self;
    const ONE_SIXTH: Self;

    #[must_use]
    fn floor(self) -> Self;

    #[must_use]
    fn ceil(self) -> Self;

    #[must_use]
    fn is_finite(self) -> bool;

    /// Truncating (saturating) conversion to a signed index.
    #[must_use]
    fn to_isize(self) -> isize;

    #[must_use]
    fn to_f64(self) -> f64;

    #[must_use]
    fn from_isize(value: isize) -> Self;

    #[must_use]
    fn from_usize(value: usize) -> Self;

    #[must_use]
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_sample {
    ($type:ty $(,)?) => {
        impl private::Sealed for $type {}

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_precision_loss,
            clippy::cast_lossless,
            clippy::unnecessary_cast
        )]
        impl Sample for $type {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const TWO: Self = 2.0;
            const THREE: Self = 3.0;
            const ONE_SIXTH: Self = 1.0 / 6.0;

            #[inline]
            fn floor(self) -> Self {
                <$type>::floor(self)
            }

            #[inline]
            fn ceil(self) -> Self {
                <$type>::ceil(self)
            }

            #[inline]
            fn is_finite(self) -> bool {
                <$type>::is_finite(self)
            }

            #[inline]
            fn to_isize(self) -> isize {
                self as isize
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_isize(value: isize) -> Self {
                value as Self
            }

            #[inline]
            fn from_usize(value: usize) -> Self {
                value as Self
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as Self
            }
        }
    };
}

impl_sample!(f32);
impl_sample!(f64);
