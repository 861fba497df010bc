mod access;
mod display;

pub use display::ViewInfo;

use core::cell::Cell;
use core::fmt;

use crate::error::{MatrixError, Status};
use crate::traits::Scalar;
use crate::MAX_ELEMENTS;

/// Reinterpret caller storage as a slice of cells.
///
/// Several [`MatrixView`]s built from the same cell slice share storage,
/// which is how an in-place operation is expressed:
///
/// ```
/// use matview::{cells, MatrixView};
///
/// let mut buf = [1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let shared = cells(&mut buf);
/// let a = MatrixView::from_cells(shared, 2, 3).unwrap();
/// let b = MatrixView::from_cells(shared, 3, 2).unwrap();
/// assert!(a.aliases(&b));
/// ```
#[inline]
pub fn cells<T>(storage: &mut [T]) -> &[Cell<T>] {
    Cell::from_mut(storage).as_slice_of_cells()
}

/// Number of elements a `rows x cols` view needs, if the shape is legal.
fn checked_len(rows: usize, cols: usize, available: usize) -> Result<usize, MatrixError> {
    if rows == 0 || cols == 0 {
        return Err(MatrixError::LengthError);
    }
    match rows.checked_mul(cols) {
        Some(len) if len <= MAX_ELEMENTS && len <= available => Ok(len),
        _ => Err(MatrixError::LengthError),
    }
}

/// Row-major matrix descriptor over caller-owned storage.
///
/// A view binds a row count, a column count and a borrowed slice of at
/// least `rows * cols` elements. Element `(r, c)` lives at `r * cols + c`.
/// The view never owns its storage; it is `Copy`, and any number of views
/// may describe the same buffer. Writes go through [`Cell`], so an operation
/// whose destination shares storage with an operand is safe Rust and is
/// detected with [`aliases`](MatrixView::aliases) rather than ruled out.
///
/// `rows * cols` never exceeds [`MAX_ELEMENTS`](crate::MAX_ELEMENTS).
///
/// # Examples
///
/// ```
/// use matview::MatrixView;
///
/// let mut buf = [0.0_f32; 6];
/// let mut m = MatrixView::new(&mut buf, 2, 3).unwrap();
/// m.set_element(2, 3, 7.5).unwrap();
/// assert_eq!(m.get_element(2, 3), Ok(7.5));
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(buf[5], 7.5);
/// ```
#[derive(Clone, Copy)]
pub struct MatrixView<'a, T> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) data: &'a [Cell<T>],
}

// ── Construction ────────────────────────────────────────────────────

impl<'a, T: Scalar> MatrixView<'a, T> {
    /// Bind a `rows x cols` view to `storage`.
    ///
    /// Fails with `LengthError` if either dimension is zero, if
    /// `rows * cols` exceeds `MAX_ELEMENTS`, or if `storage` is too short.
    /// Extra trailing storage is ignored.
    pub fn new(storage: &'a mut [T], rows: usize, cols: usize) -> Result<Self, MatrixError> {
        Self::from_cells(cells(storage), rows, cols)
    }

    /// Bind a view to storage that other views may share.
    pub fn from_cells(data: &'a [Cell<T>], rows: usize, cols: usize) -> Result<Self, MatrixError> {
        let len = checked_len(rows, cols, data.len())?;
        Ok(Self {
            rows,
            cols,
            data: &data[..len],
        })
    }

    /// Re-initialise this descriptor over new storage and dimensions.
    ///
    /// On failure the descriptor is left as it was.
    pub fn rebind(&mut self, data: &'a [Cell<T>], rows: usize, cols: usize) -> Status {
        *self = Self::from_cells(data, rows, cols)?;
        Ok(())
    }
}

// ── Shape & storage queries ─────────────────────────────────────────

impl<'a, T> MatrixView<'a, T> {
    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of elements, `rows * cols`.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Always false; a view has at least one element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// The backing cells, exactly `len()` of them.
    #[inline]
    pub fn as_cells(&self) -> &'a [Cell<T>] {
        self.data
    }

    /// True if the two views' element ranges overlap in memory.
    pub fn aliases<U>(&self, other: &MatrixView<'_, U>) -> bool {
        let a = self.data.as_ptr_range();
        let b = other.data.as_ptr_range();
        (a.start as usize) < (b.end as usize) && (b.start as usize) < (a.end as usize)
    }

    /// True if both views start at the same element.
    #[inline]
    pub(crate) fn same_start<U>(&self, other: &MatrixView<'_, U>) -> bool {
        self.data.as_ptr() as usize == other.data.as_ptr() as usize
    }
}

// ── Element reads / writes ──────────────────────────────────────────

impl<'a, T: Scalar> MatrixView<'a, T> {
    /// Element at 0-based `(row, col)`.
    ///
    /// Panics if out of range. Use [`get_element`](Self::get_element) for
    /// checked 1-based access.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> T {
        assert!(row < self.rows && col < self.cols, "index ({row},{col}) out of bounds");
        self.data[row * self.cols + col].get()
    }

    #[inline]
    pub(crate) fn put(&self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col].set(value);
    }

    /// Iterate over the elements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
        self.data.iter().map(Cell::get)
    }

    /// Copy the elements out in row-major order.
    ///
    /// Fails with `LengthError` if `out` is shorter than `len()`.
    pub fn copy_to_slice(&self, out: &mut [T]) -> Status {
        let dst = out.get_mut(..self.len()).ok_or(MatrixError::LengthError)?;
        for (d, s) in dst.iter_mut().zip(self.data) {
            *d = s.get();
        }
        Ok(())
    }

    /// Zero every element.
    pub fn clear(&mut self) {
        self.fill(T::zero());
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) {
        for c in self.data {
            c.set(value);
        }
    }

    /// Positional copy of `src` into `self`.
    ///
    /// Fails with `SizeMismatch` unless the shapes match. Overlapping storage
    /// is handled like `memmove`: copying a view onto itself is a no-op.
    pub fn copy_from(&mut self, src: &MatrixView<'_, T>) -> Status {
        if self.shape() != src.shape() {
            return Err(MatrixError::SizeMismatch);
        }
        if self.same_start(src) {
            return Ok(());
        }
        let pairs = self.data.iter().zip(src.data);
        if (self.data.as_ptr() as usize) > (src.data.as_ptr() as usize) && self.aliases(src) {
            for (d, s) in pairs.rev() {
                d.set(s.get());
            }
        } else {
            for (d, s) in pairs {
                d.set(s.get());
            }
        }
        Ok(())
    }
}

impl<T: Scalar> fmt::Debug for MatrixView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Elements<'b, T>(&'b [Cell<T>]);

        impl<T: Scalar> fmt::Debug for Elements<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.0.iter().map(Cell::get)).finish()
            }
        }

        f.debug_struct("MatrixView")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("data", &Elements(self.data))
            .finish()
    }
}
