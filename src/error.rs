/// Errors from matrix view operations.
///
/// Every fallible operation validates its preconditions first and returns
/// one of these without writing to the destination. `Singular` is the only
/// error a kernel reports after validation has passed.
///
/// ```
/// use matview::{MatrixError, MatrixView};
///
/// let mut buf = [0.0_f32; 4];
/// let mut m = MatrixView::new(&mut buf, 2, 2).unwrap();
/// assert_eq!(m.set_element(3, 1, 1.0), Err(MatrixError::LengthError));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Operand shapes are incompatible for the requested operation.
    SizeMismatch,
    /// An index, offset, block or storage length is out of bounds.
    LengthError,
    /// Matrix is singular or nearly singular.
    Singular,
}

/// Outcome of an operation that only mutates its destination.
///
/// `Ok(())` plays the role of a success status.
pub type Status = Result<(), MatrixError>;

impl core::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatrixError::SizeMismatch => write!(f, "matrix size mismatch"),
            MatrixError::LengthError => write!(f, "index or length out of bounds"),
            MatrixError::Singular => write!(f, "matrix is singular"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatrixError {}
