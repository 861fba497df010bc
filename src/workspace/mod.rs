//! Aliasing-safe operations.
//!
//! A [`Workspace`] pairs a [`Kernel`] with the [`Scratch`] storage needed to
//! run it safely when the destination shares storage with an operand. Each
//! operation validates shapes, stages any operand the kernel could clobber,
//! then delegates. Nothing is retained between calls.
//!
//! Staging policy:
//!
//! | Operation                          | Staged when the destination...       |
//! |------------------------------------|--------------------------------------|
//! | `add`, `subtract`, `multiply_scale` | partially overlaps an operand        |
//! | `multiply`                         | overlaps either operand              |
//! | `transpose`, `invert`              | overlaps the source                  |
//! | `invert_wide`                      | always (promoted to `f64` scratch)   |
//!
//! Element-wise kernels read each element before writing it, so an exact
//! alias (same start, same shape) is safe without staging.

mod scratch;

pub use scratch::Scratch;

use core::cell::Cell;

use scratch::{demote, promote, shadow, wide_view};

use crate::error::{MatrixError, Status};
use crate::kernel::{Kernel, SoftKernel};
use crate::traits::{FloatScalar, Scalar};
use crate::view::MatrixView;

/// Scratch storage plus the kernel that does the arithmetic.
///
/// All operations take `&mut self`, so one workspace serves one operation at
/// a time. Give each thread (or each control loop) its own workspace.
///
/// # Examples
///
/// ```
/// use matview::{MatrixView, Workspace};
///
/// let mut ws = Workspace::<f32>::new();
/// let mut a = [1.0_f32, 2.0, 3.0, 4.0];
/// let mut b = [0.0_f32, 1.0, 1.0, 0.0];
/// let mut va = MatrixView::new(&mut a, 2, 2).unwrap();
/// let vb = MatrixView::new(&mut b, 2, 2).unwrap();
///
/// // a = a * b, staged through scratch because the destination is an operand
/// ws.multiply_in_place(&mut va, &vb).unwrap();
/// assert_eq!(va.iter().collect::<Vec<_>>(), [2.0, 1.0, 4.0, 3.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Workspace<T, K = SoftKernel> {
    scratch: Scratch<T>,
    kernel: K,
}

impl<T: Scalar> Workspace<T> {
    /// Workspace backed by the portable [`SoftKernel`].
    pub fn new() -> Self {
        Self::with_kernel(SoftKernel)
    }
}

impl<T: Scalar, K: Kernel + Default> Default for Workspace<T, K> {
    fn default() -> Self {
        Self::with_kernel(K::default())
    }
}

/// Return `op` itself, or a scratch copy of it if writing `dest` could
/// overwrite elements of `op` before the kernel has read them.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn stage_if_aliased<'s, T: Scalar>(
    slot: &'s [Cell<T>],
    dest: &MatrixView<'_, T>,
    op: MatrixView<'s, T>,
    exact_ok: bool,
    role: &'static str,
) -> MatrixView<'s, T> {
    if !dest.aliases(&op) || (exact_ok && dest.same_start(&op)) {
        return op;
    }
    trace!(role, rows = op.rows, cols = op.cols, "staging aliased operand");
    shadow(slot, &op)
}

// ── Element-wise arithmetic ─────────────────────────────────────────

impl<T: Scalar, K: Kernel> Workspace<T, K> {
    /// Workspace that delegates to `kernel`.
    pub fn with_kernel(kernel: K) -> Self {
        Self {
            scratch: Scratch::new(),
            kernel,
        }
    }

    /// The kernel operations delegate to. Calling it directly skips
    /// aliasing checks.
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// `dest = a + b`. All three shapes must match.
    pub fn add(
        &mut self,
        dest: &mut MatrixView<'_, T>,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
    ) -> Status {
        if a.shape() != b.shape() || dest.shape() != a.shape() {
            return Err(MatrixError::SizeMismatch);
        }
        let Self { scratch, kernel } = self;
        let (lo, hi) = scratch.slots();
        let a = stage_if_aliased(lo, dest, *a, true, "lhs");
        let b = stage_if_aliased(hi, dest, *b, true, "rhs");
        kernel.add(&a, &b, dest)
    }

    /// `dest = a - b`. All three shapes must match.
    pub fn subtract(
        &mut self,
        dest: &mut MatrixView<'_, T>,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
    ) -> Status {
        if a.shape() != b.shape() || dest.shape() != a.shape() {
            return Err(MatrixError::SizeMismatch);
        }
        let Self { scratch, kernel } = self;
        let (lo, hi) = scratch.slots();
        let a = stage_if_aliased(lo, dest, *a, true, "lhs");
        let b = stage_if_aliased(hi, dest, *b, true, "rhs");
        kernel.sub(&a, &b, dest)
    }

    /// `dest = src * scale`. `dest` must have `src`'s shape.
    pub fn multiply_scale(
        &mut self,
        dest: &mut MatrixView<'_, T>,
        src: &MatrixView<'_, T>,
        scale: T,
    ) -> Status {
        if dest.shape() != src.shape() {
            return Err(MatrixError::SizeMismatch);
        }
        let Self { scratch, kernel } = self;
        let (lo, _) = scratch.slots();
        let src = stage_if_aliased(lo, dest, *src, true, "source");
        kernel.scale(&src, scale, dest)
    }
}

// ── Multiply & transpose ────────────────────────────────────────────

impl<T: Scalar, K: Kernel> Workspace<T, K> {
    /// `dest = a * b`.
    ///
    /// Requires `a.cols == b.rows`, `dest.rows == a.rows` and
    /// `dest.cols == b.cols`, otherwise `SizeMismatch` with `dest` untouched.
    /// `dest` may share storage with `a`, `b` or both.
    pub fn multiply(
        &mut self,
        dest: &mut MatrixView<'_, T>,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
    ) -> Status {
        if a.cols != b.rows || dest.rows != a.rows || dest.cols != b.cols {
            return Err(MatrixError::SizeMismatch);
        }
        let Self { scratch, kernel } = self;
        let (lo, hi) = scratch.slots();
        let a = stage_if_aliased(lo, dest, *a, false, "lhs");
        let b = stage_if_aliased(hi, dest, *b, false, "rhs");
        kernel.mult(&a, &b, dest)
    }

    /// `a = a * b`. `b` must be square with `a.cols` rows.
    pub fn multiply_in_place(&mut self, a: &mut MatrixView<'_, T>, b: &MatrixView<'_, T>) -> Status {
        let lhs = *a;
        self.multiply(a, &lhs, b)
    }

    /// `dest = srcᵀ`.
    ///
    /// If `dest` describes the same storage and shape as `src`, the
    /// transpose happens in place and `dest`'s rows and columns are swapped.
    /// Otherwise `dest` must already be `src.cols x src.rows`.
    pub fn transpose(&mut self, dest: &mut MatrixView<'_, T>, src: &MatrixView<'_, T>) -> Status {
        let in_place = dest.same_start(src) && dest.shape() == src.shape();
        if !in_place && (dest.rows != src.cols || dest.cols != src.rows) {
            return Err(MatrixError::SizeMismatch);
        }
        let Self { scratch, kernel } = self;
        let (lo, _) = scratch.slots();
        let staged = stage_if_aliased(lo, dest, *src, false, "source");
        if !in_place {
            return kernel.trans(&staged, dest);
        }

        dest.rows = src.cols;
        dest.cols = src.rows;
        let result = kernel.trans(&staged, dest);
        if result.is_err() {
            dest.rows = src.rows;
            dest.cols = src.cols;
        }
        result
    }

    /// Transpose `view` in place, swapping its rows and columns.
    pub fn transpose_in_place(&mut self, view: &mut MatrixView<'_, T>) -> Status {
        let src = *view;
        self.transpose(view, &src)
    }
}

// ── Inversion ───────────────────────────────────────────────────────

impl<T: FloatScalar, K: Kernel> Workspace<T, K> {
    /// `dest = src⁻¹` at working precision.
    ///
    /// `src` must be square and `dest` the same shape (`SizeMismatch`
    /// otherwise). A numeric failure from the kernel is returned unchanged;
    /// `dest` then holds unspecified values.
    pub fn invert(&mut self, dest: &mut MatrixView<'_, T>, src: &MatrixView<'_, T>) -> Status {
        if !src.is_square() || dest.shape() != src.shape() {
            return Err(MatrixError::SizeMismatch);
        }
        let Self { scratch, kernel } = self;
        let (lo, _) = scratch.slots();
        let src = stage_if_aliased(lo, dest, *src, false, "source");
        kernel.inverse(&src, dest).map_err(|e| {
            debug!(error = %e, n = src.rows, "inversion failed");
            e
        })
    }

    /// Invert `view` in place.
    pub fn invert_in_place(&mut self, view: &mut MatrixView<'_, T>) -> Status {
        let src = *view;
        self.invert(view, &src)
    }

    /// `dest = src⁻¹`, computed in `f64`.
    ///
    /// Every element of `src` is promoted into scratch, the inverse is taken
    /// at `f64` and the result demoted into `dest`. Aliasing is irrelevant
    /// because `src` is fully read before `dest` is written. On a numeric
    /// failure `dest` is left untouched.
    pub fn invert_wide(&mut self, dest: &mut MatrixView<'_, T>, src: &MatrixView<'_, T>) -> Status {
        if !src.is_square() || dest.shape() != src.shape() {
            return Err(MatrixError::SizeMismatch);
        }
        let Self { scratch, kernel } = self;
        let (lo, hi) = scratch.wide_halves();
        let wide_src = promote(lo, src);
        let mut wide_dst = wide_view(hi, src.rows, src.cols);
        trace!(n = src.rows, "inverting at f64");
        if let Err(e) = kernel.inverse(&wide_src, &mut wide_dst) {
            debug!(error = %e, n = src.rows, "f64 inversion failed");
            return Err(e);
        }
        demote(&wide_dst, dest);
        Ok(())
    }
}

#[cfg(feature = "std")]
impl Workspace<f32> {
    /// Run `f` with this thread's `f32` workspace.
    ///
    /// A nested call on the same thread gets a fresh temporary workspace.
    ///
    /// ```
    /// use matview::{MatrixView, Workspace};
    ///
    /// let mut a = [4.0_f32, 0.0, 0.0, 2.0];
    /// let mut m = MatrixView::new(&mut a, 2, 2).unwrap();
    /// Workspace::with_local(|ws| ws.invert_in_place(&mut m)).unwrap();
    /// assert_eq!(a, [0.25, 0.0, 0.0, 0.5]);
    /// ```
    pub fn with_local<R>(f: impl FnOnce(&mut Workspace<f32>) -> R) -> R {
        use std::cell::RefCell;

        std::thread_local! {
            static LOCAL: RefCell<Workspace<f32>> = RefCell::new(Workspace::new());
        }

        LOCAL.with(|ws| match ws.try_borrow_mut() {
            Ok(mut ws) => f(&mut ws),
            Err(_) => f(&mut Workspace::new()),
        })
    }
}
