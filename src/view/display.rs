use core::fmt;

use crate::traits::Scalar;

use super::MatrixView;

// ── Display ─────────────────────────────────────────────────────────

/// Diagnostic dump: one row per line, every element signed with five
/// decimals and tab separated.
///
/// ```
/// use matview::MatrixView;
/// let mut buf = [1.0_f32, -2.5, 0.0, 4.0];
/// let m = MatrixView::new(&mut buf, 2, 2).unwrap();
/// assert_eq!(
///     m.to_string(),
///     " +1.00000\t-2.50000\t\n +0.00000\t+4.00000\t\n"
/// );
/// ```
impl<T: Scalar + fmt::Display> fmt::Display for MatrixView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            write!(f, " ")?;
            for j in 0..self.cols {
                write!(f, "{:+.5}\t", self.at(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Shape and storage address of a view, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewInfo {
    pub rows: usize,
    pub cols: usize,
    /// Address of the first element.
    pub addr: usize,
}

impl fmt::Display for ViewInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "matrix.rows = {}", self.rows)?;
        writeln!(f, "matrix.cols = {}", self.cols)?;
        writeln!(f, "matrix.data = {:#x}", self.addr)
    }
}

impl<T> MatrixView<'_, T> {
    /// Shape and storage address of this view.
    pub fn info(&self) -> ViewInfo {
        ViewInfo {
            rows: self.rows,
            cols: self.cols,
            addr: self.data.as_ptr() as usize,
        }
    }
}
