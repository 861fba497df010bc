use crate::error::{MatrixError, Status};
use crate::traits::{FloatScalar, Scalar};
use crate::view::MatrixView;
use crate::MAX_DIMENSION;

use super::Kernel;

/// Portable row-major kernels with no target-specific acceleration.
///
/// Inversion is Gauss-Jordan elimination with full pivoting, carried out in
/// the destination so the source is only read. A pivot no larger than
/// `n * epsilon * max|a_ij|`, or any non-finite entry, is reported as
/// `Singular`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftKernel;

#[inline]
fn zip_with<T: Scalar>(
    a: &MatrixView<'_, T>,
    b: &MatrixView<'_, T>,
    dst: &mut MatrixView<'_, T>,
    f: impl Fn(T, T) -> T,
) -> Status {
    if a.shape() != b.shape() || a.shape() != dst.shape() {
        return Err(MatrixError::SizeMismatch);
    }
    for ((d, x), y) in dst.data.iter().zip(a.data).zip(b.data) {
        d.set(f(x.get(), y.get()));
    }
    Ok(())
}

#[inline]
fn swap_rows<T: Scalar>(m: &MatrixView<'_, T>, r1: usize, r2: usize) {
    for j in 0..m.cols {
        let tmp = m.at(r1, j);
        m.put(r1, j, m.at(r2, j));
        m.put(r2, j, tmp);
    }
}

#[inline]
fn swap_cols<T: Scalar>(m: &MatrixView<'_, T>, c1: usize, c2: usize) {
    for i in 0..m.rows {
        let tmp = m.at(i, c1);
        m.put(i, c1, m.at(i, c2));
        m.put(i, c2, tmp);
    }
}

impl Kernel for SoftKernel {
    fn add<T: Scalar>(
        &self,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
        dst: &mut MatrixView<'_, T>,
    ) -> Status {
        zip_with(a, b, dst, |x, y| x + y)
    }

    fn sub<T: Scalar>(
        &self,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
        dst: &mut MatrixView<'_, T>,
    ) -> Status {
        zip_with(a, b, dst, |x, y| x - y)
    }

    fn mult<T: Scalar>(
        &self,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
        dst: &mut MatrixView<'_, T>,
    ) -> Status {
        if a.cols != b.rows || dst.rows != a.rows || dst.cols != b.cols {
            return Err(MatrixError::SizeMismatch);
        }
        for i in 0..a.rows {
            for j in 0..b.cols {
                let mut sum = T::zero();
                for k in 0..a.cols {
                    sum = sum + a.at(i, k) * b.at(k, j);
                }
                dst.put(i, j, sum);
            }
        }
        Ok(())
    }

    fn scale<T: Scalar>(
        &self,
        src: &MatrixView<'_, T>,
        scale: T,
        dst: &mut MatrixView<'_, T>,
    ) -> Status {
        if src.shape() != dst.shape() {
            return Err(MatrixError::SizeMismatch);
        }
        for (d, s) in dst.data.iter().zip(src.data) {
            d.set(s.get() * scale);
        }
        Ok(())
    }

    fn trans<T: Scalar>(&self, src: &MatrixView<'_, T>, dst: &mut MatrixView<'_, T>) -> Status {
        if dst.rows != src.cols || dst.cols != src.rows {
            return Err(MatrixError::SizeMismatch);
        }
        for i in 0..src.rows {
            for j in 0..src.cols {
                dst.put(j, i, src.at(i, j));
            }
        }
        Ok(())
    }

    fn inverse<T: FloatScalar>(
        &self,
        src: &MatrixView<'_, T>,
        dst: &mut MatrixView<'_, T>,
    ) -> Status {
        if !src.is_square() || src.shape() != dst.shape() {
            return Err(MatrixError::SizeMismatch);
        }
        let n = src.rows;

        // Singular threshold is relative to the largest entry
        let mut scale = T::zero();
        for v in src.iter() {
            let v = v.abs();
            if !v.is_finite() {
                return Err(MatrixError::Singular);
            }
            if v > scale {
                scale = v;
            }
        }
        let tol = T::from_wide(n as f64) * T::epsilon() * scale;
        dst.copy_from(src)?;

        let mut used = [false; MAX_DIMENSION];
        let mut pivot_row = [0usize; MAX_DIMENSION];
        let mut pivot_col = [0usize; MAX_DIMENSION];

        for step in 0..n {
            // Full pivoting: largest modulus among rows and columns not yet used
            let mut best: Option<(usize, usize)> = None;
            let mut best_val = T::zero();
            for r in 0..n {
                if used[r] {
                    continue;
                }
                for c in 0..n {
                    if used[c] {
                        continue;
                    }
                    // NaN never compares greater, so it is never chosen
                    let v = dst.at(r, c).abs();
                    if v > best_val {
                        best = Some((r, c));
                        best_val = v;
                    }
                }
            }
            let (row, col) = match best {
                Some(rc) if best_val > tol && best_val.is_finite() => rc,
                _ => return Err(MatrixError::Singular),
            };

            used[col] = true;
            if row != col {
                swap_rows(dst, row, col);
            }
            pivot_row[step] = row;
            pivot_col[step] = col;

            let inv_pivot = T::one() / dst.at(col, col);
            dst.put(col, col, T::one());
            for j in 0..n {
                dst.put(col, j, dst.at(col, j) * inv_pivot);
            }

            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = dst.at(r, col);
                if factor == T::zero() {
                    continue;
                }
                dst.put(r, col, T::zero());
                for j in 0..n {
                    dst.put(r, j, dst.at(r, j) - dst.at(col, j) * factor);
                }
            }
        }

        // Undo the row interchanges as column interchanges, in reverse
        for step in (0..n).rev() {
            if pivot_row[step] != pivot_col[step] {
                swap_cols(dst, pivot_row[step], pivot_col[step]);
            }
        }
        Ok(())
    }
}
