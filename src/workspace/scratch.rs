use core::cell::Cell;

use crate::traits::{FloatScalar, Scalar};
use crate::view::{cells, MatrixView};
use crate::{MAX_ELEMENTS, SCRATCH_LEN};

/// Fixed-capacity staging storage.
///
/// `stage` holds up to two working-precision matrices, used to shadow
/// operands that would otherwise be overwritten mid-operation. `wide` holds
/// two full-size `f64` matrices for [`Workspace::invert_wide`]. Contents are
/// unspecified between operations.
///
/// [`Workspace::invert_wide`]: crate::Workspace::invert_wide
#[derive(Clone)]
pub struct Scratch<T> {
    stage: [T; SCRATCH_LEN],
    wide: [f64; SCRATCH_LEN],
}

impl<T: Scalar> Scratch<T> {
    /// Zeroed scratch.
    pub fn new() -> Self {
        Self {
            stage: [T::zero(); SCRATCH_LEN],
            wide: [0.0; SCRATCH_LEN],
        }
    }

    /// The two working-precision staging slots.
    pub(crate) fn slots(&mut self) -> (&[Cell<T>], &[Cell<T>]) {
        let (lo, hi) = self.stage.split_at_mut(MAX_ELEMENTS);
        (cells(lo), cells(hi))
    }

    /// The `f64` source and result halves.
    pub(crate) fn wide_halves(&mut self) -> (&[Cell<f64>], &[Cell<f64>]) {
        let (lo, hi) = self.wide.split_at_mut(MAX_ELEMENTS);
        (cells(lo), cells(hi))
    }
}

impl<T: Scalar> Default for Scratch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> core::fmt::Debug for Scratch<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scratch")
            .field("capacity", &SCRATCH_LEN)
            .finish_non_exhaustive()
    }
}

/// Copy `src` into `slot` and return a view of the copy with `src`'s shape.
pub(crate) fn shadow<'s, T: Scalar>(slot: &'s [Cell<T>], src: &MatrixView<'_, T>) -> MatrixView<'s, T> {
    let data = &slot[..src.len()];
    for (d, s) in data.iter().zip(src.data) {
        d.set(s.get());
    }
    MatrixView {
        rows: src.rows,
        cols: src.cols,
        data,
    }
}

/// Promote `src` into `slot` and return the `f64` view.
pub(crate) fn promote<'s, T: FloatScalar>(
    slot: &'s [Cell<f64>],
    src: &MatrixView<'_, T>,
) -> MatrixView<'s, f64> {
    let data = &slot[..src.len()];
    for (d, s) in data.iter().zip(src.data) {
        d.set(s.get().to_wide());
    }
    MatrixView {
        rows: src.rows,
        cols: src.cols,
        data,
    }
}

/// Demote `wide` element-wise into `dest`; shapes are equal.
pub(crate) fn demote<T: FloatScalar>(wide: &MatrixView<'_, f64>, dest: &mut MatrixView<'_, T>) {
    for (d, w) in dest.data.iter().zip(wide.data) {
        d.set(T::from_wide(w.get()));
    }
}

/// An `f64` view over the first `rows * cols` cells of `slot`.
pub(crate) fn wide_view(slot: &[Cell<f64>], rows: usize, cols: usize) -> MatrixView<'_, f64> {
    MatrixView {
        rows,
        cols,
        data: &slot[..rows * cols],
    }
}
