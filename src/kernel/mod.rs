//! Dense-matrix arithmetic primitives.
//!
//! A [`Kernel`] does the numeric work on `(rows, cols, data)` triples, here
//! [`MatrixView`]s. Kernels check their own shape contract but are not
//! alias-aware: `mult`, `trans` and `inverse` may read an operand element
//! after writing the destination element at the same address. Callers go
//! through [`Workspace`](crate::Workspace), which stages aliased operands.
//!
//! [`SoftKernel`] is the portable implementation. A target with a vendor DSP
//! library implements the trait over those routines instead.

mod soft;

pub use soft::SoftKernel;

use crate::error::Status;
use crate::traits::{FloatScalar, Scalar};
use crate::view::MatrixView;

/// Numeric primitives the operation layer delegates to.
///
/// Every method returns `SizeMismatch` if the shapes it is given are
/// incompatible. Only [`inverse`](Kernel::inverse) may fail numerically.
pub trait Kernel {
    /// `dst = a + b`, element-wise.
    fn add<T: Scalar>(
        &self,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
        dst: &mut MatrixView<'_, T>,
    ) -> Status;

    /// `dst = a - b`, element-wise.
    fn sub<T: Scalar>(
        &self,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
        dst: &mut MatrixView<'_, T>,
    ) -> Status;

    /// `dst = a * b`.
    fn mult<T: Scalar>(
        &self,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
        dst: &mut MatrixView<'_, T>,
    ) -> Status;

    /// `dst = src * scale`, element-wise.
    fn scale<T: Scalar>(&self, src: &MatrixView<'_, T>, scale: T, dst: &mut MatrixView<'_, T>)
        -> Status;

    /// `dst = srcᵀ`; `dst` must already have the transposed shape.
    fn trans<T: Scalar>(&self, src: &MatrixView<'_, T>, dst: &mut MatrixView<'_, T>) -> Status;

    /// `dst = src⁻¹`. Returns `Singular` if `src` has a non-finite entry or
    /// no usable pivot is found, in which case `dst` holds unspecified
    /// partial results.
    fn inverse<T: FloatScalar>(&self, src: &MatrixView<'_, T>, dst: &mut MatrixView<'_, T>)
        -> Status;
}
