use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be stored in a [`MatrixView`](crate::MatrixView).
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types, so copy, element access,
/// block moves and the non-inverting arithmetic work on integer storage too.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by inversion, which needs `abs`, `epsilon` and a lossless
/// round trip through the `f64` working precision used by
/// [`Workspace::invert_wide`](crate::Workspace::invert_wide).
pub trait FloatScalar: Scalar + Float {
    /// Promote to the wide (`f64`) working precision.
    fn to_wide(self) -> f64;

    /// Demote from the wide working precision, rounding to nearest.
    fn from_wide(w: f64) -> Self;
}

macro_rules! impl_float_scalar {
    ($($t:ty),*) => {
        $(
            impl FloatScalar for $t {
                #[inline] fn to_wide(self) -> f64 { self as f64 }
                #[inline] fn from_wide(w: f64) -> $t { w as $t }
            }
        )*
    };
}

impl_float_scalar!(f32, f64);
