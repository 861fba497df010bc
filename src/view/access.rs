use crate::error::{MatrixError, Status};
use crate::traits::Scalar;
use crate::{MAX_DIMENSION, MAX_ELEMENTS};

use super::MatrixView;

// ── 1-based element access ──────────────────────────────────────────

impl<T: Scalar> MatrixView<'_, T> {
    /// Storage offset of 1-based `(row, col)`, or `LengthError`.
    ///
    /// Index 0 is rejected rather than wrapping to the previous row.
    #[inline]
    fn offset(&self, row: usize, col: usize) -> Result<usize, MatrixError> {
        if row == 0 || col == 0 || row > self.rows || col > self.cols {
            return Err(MatrixError::LengthError);
        }
        Ok((row - 1) * self.cols + (col - 1))
    }

    /// Write `value` at 1-based `(row, col)`.
    pub fn set_element(&mut self, row: usize, col: usize, value: T) -> Status {
        let idx = self.offset(row, col)?;
        self.data[idx].set(value);
        Ok(())
    }

    /// Read the element at 1-based `(row, col)`.
    pub fn get_element(&self, row: usize, col: usize) -> Result<T, MatrixError> {
        let idx = self.offset(row, col)?;
        Ok(self.data[idx].get())
    }
}

// ── Diagonal ────────────────────────────────────────────────────────

impl<T: Scalar> MatrixView<'_, T> {
    /// Set every diagonal element to `value`; off-diagonal entries are kept.
    ///
    /// Fails with `SizeMismatch` on a non-square view.
    ///
    /// ```
    /// use matview::MatrixView;
    /// let mut buf = [0.0_f32; 9];
    /// let mut m = MatrixView::new(&mut buf, 3, 3).unwrap();
    /// m.set_diagonal(1.0).unwrap();
    /// assert_eq!(buf, [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    /// ```
    pub fn set_diagonal(&mut self, value: T) -> Status {
        if !self.is_square() {
            return Err(MatrixError::SizeMismatch);
        }
        for i in 0..self.rows {
            self.put(i, i, value);
        }
        Ok(())
    }

    /// Write the diagonal of `self` into `dest`, zeroing everything else.
    ///
    /// Both views must be square with the same shape, otherwise
    /// `LengthError`. When `dest` is `self`'s own storage the off-diagonal
    /// entries are zeroed in place.
    ///
    /// ```
    /// use matview::{cells, MatrixView};
    /// let mut buf = [1, 2, 3, 4];
    /// let shared = cells(&mut buf);
    /// let src = MatrixView::from_cells(shared, 2, 2).unwrap();
    /// let mut dst = src;
    /// src.diagonal_into(&mut dst).unwrap();
    /// assert_eq!(dst.iter().collect::<Vec<_>>(), [1, 0, 0, 4]);
    /// ```
    pub fn diagonal_into(&self, dest: &mut MatrixView<'_, T>) -> Status {
        if !self.is_square() || self.shape() != dest.shape() {
            return Err(MatrixError::LengthError);
        }
        let n = self.rows;

        if dest.same_start(self) {
            for i in 0..n {
                for j in 0..n {
                    if i != j {
                        dest.put(i, j, T::zero());
                    }
                }
            }
            return Ok(());
        }

        // Read first: dest may partially overlap self
        let mut diag = [T::zero(); MAX_DIMENSION];
        for (i, d) in diag.iter_mut().enumerate().take(n) {
            *d = self.at(i, i);
        }
        dest.clear();
        for (i, &d) in diag.iter().enumerate().take(n) {
            dest.put(i, i, d);
        }
        Ok(())
    }
}

// ── Block extraction & insertion ────────────────────────────────────

impl<T: Scalar> MatrixView<'_, T> {
    /// True if a `rows x cols` block at 0-based `(i, j)` fits inside `self`.
    fn fits(&self, i: usize, j: usize, rows: usize, cols: usize) -> bool {
        matches!(i.checked_add(rows), Some(r) if r <= self.rows)
            && matches!(j.checked_add(cols), Some(c) if c <= self.cols)
    }

    /// Write `src` into `self` with its top-left corner at 0-based `(i, j)`.
    ///
    /// Fails with `LengthError` if the block would extend past `self`.
    ///
    /// ```
    /// use matview::MatrixView;
    /// let mut buf = [0.0_f32; 9];
    /// let mut patch = [1.0_f32, 2.0, 3.0, 4.0];
    /// let mut m = MatrixView::new(&mut buf, 3, 3).unwrap();
    /// let p = MatrixView::new(&mut patch, 2, 2).unwrap();
    /// m.set_block(1, 1, &p).unwrap();
    /// assert_eq!(m.get_element(2, 2), Ok(1.0));
    /// assert_eq!(m.get_element(3, 3), Ok(4.0));
    /// ```
    pub fn set_block(&mut self, i: usize, j: usize, src: &MatrixView<'_, T>) -> Status {
        if !self.fits(i, j, src.rows, src.cols) {
            return Err(MatrixError::LengthError);
        }
        let mut held = [T::zero(); MAX_ELEMENTS];
        let overlapping = self.aliases(src);
        if overlapping {
            src.copy_to_slice(&mut held)?;
        }
        let mut k = 0;
        for r in 0..src.rows {
            for c in 0..src.cols {
                let v = if overlapping { held[k] } else { src.data[k].get() };
                self.put(i + r, j + c, v);
                k += 1;
            }
        }
        Ok(())
    }

    /// Fill `dest` with the block of `self` whose top-left corner is at
    /// 0-based `(i, j)`; the block has `dest`'s shape.
    ///
    /// Fails with `LengthError` if the block would extend past `self`.
    pub fn block_into(&self, i: usize, j: usize, dest: &mut MatrixView<'_, T>) -> Status {
        if !self.fits(i, j, dest.rows, dest.cols) {
            return Err(MatrixError::LengthError);
        }
        let mut held = [T::zero(); MAX_ELEMENTS];
        let overlapping = self.aliases(dest);
        let mut k = 0;
        for r in 0..dest.rows {
            for c in 0..dest.cols {
                let v = self.at(i + r, j + c);
                if overlapping {
                    held[k] = v;
                } else {
                    dest.data[k].set(v);
                }
                k += 1;
            }
        }
        if overlapping {
            for (d, &v) in dest.data.iter().zip(held.iter()) {
                d.set(v);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::cells;

    #[test]
    fn set_get_element_one_based() {
        let mut buf = [0.0_f32; 6];
        let mut m = MatrixView::new(&mut buf, 2, 3).unwrap();
        for r in 1..=2 {
            for c in 1..=3 {
                m.set_element(r, c, (r * 10 + c) as f32).unwrap();
            }
        }
        assert_eq!(m.get_element(1, 1), Ok(11.0));
        assert_eq!(m.get_element(2, 3), Ok(23.0));
        assert_eq!(buf, [11.0, 12.0, 13.0, 21.0, 22.0, 23.0]);
    }

    #[test]
    fn element_bounds() {
        let mut buf = [0.0_f32; 6];
        let mut m = MatrixView::new(&mut buf, 2, 3).unwrap();
        assert_eq!(m.set_element(3, 1, 1.0), Err(MatrixError::LengthError));
        assert_eq!(m.set_element(1, 4, 1.0), Err(MatrixError::LengthError));
        assert_eq!(m.get_element(3, 1), Err(MatrixError::LengthError));
        assert_eq!(m.get_element(1, 4), Err(MatrixError::LengthError));
        assert!(m.iter().all(|x| x == 0.0));
    }

    #[test]
    fn element_zero_index_rejected() {
        let mut buf = [9; 4];
        let mut m = MatrixView::new(&mut buf, 2, 2).unwrap();
        assert_eq!(m.get_element(0, 1), Err(MatrixError::LengthError));
        assert_eq!(m.get_element(1, 0), Err(MatrixError::LengthError));
        assert_eq!(m.set_element(0, 0, 1), Err(MatrixError::LengthError));
        assert_eq!(buf, [9; 4]);
    }

    #[test]
    fn set_diagonal_keeps_off_diagonal() {
        let mut buf = [7; 4];
        let mut m = MatrixView::new(&mut buf, 2, 2).unwrap();
        m.set_diagonal(1).unwrap();
        assert_eq!(buf, [1, 7, 7, 1]);
    }

    #[test]
    fn diagonal_ops_reject_non_square() {
        let mut a = [1, 2, 3, 4, 5, 6];
        let mut b = [0; 6];
        let mut src = MatrixView::new(&mut a, 2, 3).unwrap();
        let mut dst = MatrixView::new(&mut b, 2, 3).unwrap();
        assert_eq!(src.set_diagonal(9), Err(MatrixError::SizeMismatch));
        assert_eq!(src.diagonal_into(&mut dst), Err(MatrixError::LengthError));
        assert_eq!(a, [1, 2, 3, 4, 5, 6]);
        assert_eq!(b, [0; 6]);
    }

    #[test]
    fn diagonal_into_rejects_shape_mismatch() {
        let mut a = [1; 9];
        let mut b = [5; 4];
        let src = MatrixView::new(&mut a, 3, 3).unwrap();
        let mut dst = MatrixView::new(&mut b, 2, 2).unwrap();
        assert_eq!(src.diagonal_into(&mut dst), Err(MatrixError::LengthError));
        assert_eq!(b, [5; 4]);
    }

    #[test]
    fn diagonal_into_distinct() {
        let mut a = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        let mut b = [-1; 9];
        let src = MatrixView::new(&mut a, 3, 3).unwrap();
        let mut dst = MatrixView::new(&mut b, 3, 3).unwrap();
        src.diagonal_into(&mut dst).unwrap();
        assert_eq!(b, [1, 0, 0, 0, 5, 0, 0, 0, 9]);
        assert_eq!(a, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn diagonal_into_in_place() {
        let mut a = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        {
            let shared = cells(&mut a);
            let src = MatrixView::from_cells(shared, 3, 3).unwrap();
            let mut dst = MatrixView::from_cells(shared, 3, 3).unwrap();
            src.diagonal_into(&mut dst).unwrap();
        }
        assert_eq!(a, [1, 0, 0, 0, 5, 0, 0, 0, 9]);
    }

    #[test]
    fn diagonal_into_partial_overlap() {
        let mut a = [1, 2, 3, 4, 5, 6];
        {
            let shared = cells(&mut a);
            let src = MatrixView::from_cells(shared, 2, 2).unwrap();
            let mut dst = MatrixView::from_cells(&shared[1..], 2, 2).unwrap();
            src.diagonal_into(&mut dst).unwrap();
        }
        assert_eq!(a, [1, 1, 0, 0, 4, 6]);
    }

    #[test]
    fn set_block_and_bounds() {
        let mut big = [0; 12];
        let mut patch = [1, 2, 3, 4, 5, 6];
        let mut m = MatrixView::new(&mut big, 3, 4).unwrap();
        let p = MatrixView::new(&mut patch, 2, 3).unwrap();
        m.set_block(1, 1, &p).unwrap();
        assert_eq!(m.iter().collect::<Vec<_>>(), [0, 0, 0, 0, 0, 1, 2, 3, 0, 4, 5, 6]);

        assert_eq!(m.set_block(2, 0, &p), Err(MatrixError::LengthError));
        assert_eq!(m.set_block(0, 2, &p), Err(MatrixError::LengthError));
        assert_eq!(m.set_block(usize::MAX, 0, &p), Err(MatrixError::LengthError));
        assert_eq!(big, [0, 0, 0, 0, 0, 1, 2, 3, 0, 4, 5, 6]);
    }

    #[test]
    fn block_into_and_bounds() {
        let mut big = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
        let mut out = [0; 4];
        let m = MatrixView::new(&mut big, 3, 4).unwrap();
        let mut o = MatrixView::new(&mut out, 2, 2).unwrap();
        m.block_into(1, 2, &mut o).unwrap();
        assert_eq!(o.iter().collect::<Vec<_>>(), [6, 7, 10, 11]);

        assert_eq!(m.block_into(2, 0, &mut o), Err(MatrixError::LengthError));
        assert_eq!(m.block_into(0, 3, &mut o), Err(MatrixError::LengthError));
        assert_eq!(out, [6, 7, 10, 11]);
    }

    #[test]
    fn block_roundtrip_order() {
        let mut big = [0.0_f64; 16];
        let mut patch = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut back = [0.0; 6];
        let mut m = MatrixView::new(&mut big, 4, 4).unwrap();
        let p = MatrixView::new(&mut patch, 3, 2).unwrap();
        let mut b = MatrixView::new(&mut back, 3, 2).unwrap();
        m.set_block(1, 2, &p).unwrap();
        m.block_into(1, 2, &mut b).unwrap();
        assert_eq!(back, patch);
    }

    #[test]
    fn block_into_overlapping_self() {
        // 3x3 in a 9-element buffer; extract bottom-right 2x2 into the first 4 cells
        let mut a = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        {
            let shared = cells(&mut a);
            let src = MatrixView::from_cells(shared, 3, 3).unwrap();
            let mut dst = MatrixView::from_cells(shared, 2, 2).unwrap();
            src.block_into(1, 1, &mut dst).unwrap();
        }
        assert_eq!(&a[..4], &[5, 6, 8, 9]);
    }

    #[test]
    fn set_block_overlapping_self() {
        let mut a = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        {
            let shared = cells(&mut a);
            let mut dst = MatrixView::from_cells(shared, 3, 3).unwrap();
            let src = MatrixView::from_cells(shared, 2, 2).unwrap();
            dst.set_block(1, 1, &src).unwrap();
        }
        assert_eq!(a, [1, 2, 3, 4, 1, 2, 7, 3, 4]);
    }
}
