//! 2-D numeric matrix capability.
//!
//! Only some tensors can act as a matrix. Generic code asks for the
//! capability through [`Tensor::as_matrix`](crate::tensor::Tensor::as_matrix)
//! and gets `None` when it is missing; types that still implement
//! [`Matrix`] without supporting it return [`CoreError::Unsupported`].
//!
//! [`CoreError::Unsupported`]: crate::error::CoreError::Unsupported

use core::fmt;

use crate::error::Result;

/// Read-only 2-D view of numeric data as `f64`.
pub trait Matrix {
    /// `(rows, cols)`.
    fn dims(&self) -> Result<(usize, usize)>;

    /// Element at row `i`, column `j`.
    fn at(&self, i: usize, j: usize) -> Result<f64>;

    /// Transposed view. No data is copied.
    fn t(&self) -> Transpose<'_>;
}

/// A transposed view of another matrix.
#[derive(Clone, Copy)]
pub struct Transpose<'a> {
    inner: &'a dyn Matrix,
}

impl<'a> Transpose<'a> {
    pub fn new(inner: &'a dyn Matrix) -> Self {
        Self { inner }
    }

    /// The matrix being transposed.
    pub fn inner(&self) -> &'a dyn Matrix {
        self.inner
    }
}

impl fmt::Debug for Transpose<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transpose").finish_non_exhaustive()
    }
}

impl Matrix for Transpose<'_> {
    fn dims(&self) -> Result<(usize, usize)> {
        let (r, c) = self.inner.dims()?;
        Ok((c, r))
    }

    fn at(&self, i: usize, j: usize) -> Result<f64> {
        self.inner.at(j, i)
    }

    fn t(&self) -> Transpose<'_> {
        Transpose::new(self)
    }
}

/// Collect a matrix into row-major `Vec<f64>`.
pub fn to_row_major(m: &dyn Matrix) -> Result<Vec<f64>> {
    let (rows, cols) = m.dims()?;
    let mut out = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            out.push(m.at(i, j)?);
        }
    }
    Ok(out)
}
