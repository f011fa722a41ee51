//! Dense numeric tensors.

use crate::dtype::Scalar;
use crate::error::{CoreError, Result};
use crate::matrix::{Matrix, Transpose};
use crate::shape::Shape;

use super::Tensor;

/// An N-dimensional numeric tensor with contiguous storage.
///
/// Data is stored in flat order as described by its [`Shape`]; cloning
/// performs a deep copy. Unlike [`Bits`](super::Bits), a 2-D `Dense`
/// tensor is a working [`Matrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dense<T: Scalar> {
    shape: Shape,
    data: Vec<T>,
}

impl<T: Scalar> Dense<T> {
    /// A row-major tensor filled with zeros.
    pub fn zeros(dims: &[usize]) -> Self {
        let shape = Shape::row_major(dims);
        Self {
            data: vec![T::zero(); shape.len()],
            shape,
        }
    }

    /// Create a row-major tensor from flat data.
    ///
    /// Returns an error if the product of `dims` does not equal `data.len()`.
    ///
    /// ```
    /// # use bitensor_core::tensor::Dense;
    /// let d = Dense::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
    /// assert_eq!(d.value(&[1, 0]), 4);
    /// ```
    pub fn from_vec(data: Vec<T>, dims: &[usize]) -> Result<Self> {
        let shape = Shape::row_major(dims);
        if shape.len() != data.len() {
            return Err(CoreError::InvalidShape {
                shape: dims.to_vec(),
                reason: "shape product does not match data length",
            });
        }
        Ok(Self { shape, data })
    }

    /// A flat slice of all elements in storage order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Element at a multi-dimensional index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn value(&self, index: &[usize]) -> T {
        self.data[self.shape.offset(index)]
    }

    #[inline]
    pub fn value_1d(&self, i: usize) -> T {
        self.data[i]
    }

    #[inline]
    pub fn set(&mut self, index: &[usize], value: T) {
        let i = self.shape.offset(index);
        self.data[i] = value;
    }

    #[inline]
    pub fn set_1d(&mut self, i: usize, value: T) {
        self.data[i] = value;
    }

    fn resize_rows(&mut self, rows: usize) -> bool {
        if self.shape.num_dims() == 0 || !self.shape.is_row_major() {
            tracing::debug!(layout = ?self.shape.layout(), "row resize ignored");
            return false;
        }
        let Some(len) = rows.checked_mul(self.shape.row_len()) else {
            tracing::debug!(rows, "row resize overflows usize");
            return false;
        };
        self.shape.set_rows(rows);
        self.data.resize(len, T::zero());
        true
    }
}

impl<T: Scalar> Tensor for Dense<T> {
    fn dtype(&self) -> crate::dtype::DType {
        T::DTYPE
    }

    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn set_shape(
        &mut self,
        dims: &[usize],
        strides: Option<&[usize]>,
        names: Option<&[String]>,
    ) -> Result<()> {
        self.shape = Shape::new(
            dims.to_vec(),
            strides.map(<[usize]>::to_vec),
            names.map(<[String]>::to_vec),
        )?;
        self.data.resize(self.shape.len(), T::zero());
        Ok(())
    }

    fn is_null(&self, _index: &[usize]) -> bool {
        false
    }

    fn is_null_1d(&self, _i: usize) -> bool {
        false
    }

    fn set_null(&mut self, _index: &[usize], _null: bool) -> bool {
        false
    }

    fn set_null_1d(&mut self, _i: usize, _null: bool) -> bool {
        false
    }

    fn float_val_1d(&self, i: usize) -> f64 {
        self.data[i].to_f64()
    }

    fn set_float_1d(&mut self, i: usize, value: f64) {
        self.data[i] = T::from_f64(value);
    }

    fn string_val_1d(&self, i: usize) -> String {
        self.data[i].to_string()
    }

    fn set_string_1d(&mut self, i: usize, value: &str) -> bool {
        match T::parse(value) {
            Some(v) => {
                self.data[i] = v;
                true
            }
            None => false,
        }
    }

    fn set_zeros(&mut self) {
        self.data.fill(T::zero());
    }

    fn clone_tensor(&self) -> Box<dyn Tensor> {
        Box::new(self.clone())
    }

    fn add_rows(&mut self, n: usize) -> bool {
        if self.shape.num_dims() == 0 {
            return false;
        }
        match self.shape.dim(0).checked_add(n) {
            Some(rows) => self.resize_rows(rows),
            None => false,
        }
    }

    fn set_num_rows(&mut self, rows: usize) -> bool {
        self.resize_rows(rows.max(1))
    }

    fn as_matrix(&self) -> Option<&dyn Matrix> {
        (self.shape.num_dims() == 2).then_some(self as &dyn Matrix)
    }
}

impl<T: Scalar> Matrix for Dense<T> {
    fn dims(&self) -> Result<(usize, usize)> {
        if self.shape.num_dims() != 2 {
            return Err(CoreError::InvalidArgument {
                reason: "matrix view requires a 2-D tensor",
            });
        }
        Ok((self.shape.dim(0), self.shape.dim(1)))
    }

    fn at(&self, i: usize, j: usize) -> Result<f64> {
        self.dims()?;
        let off = self.shape.try_offset(&[i, j])?;
        Ok(self.data[off].to_f64())
    }

    fn t(&self) -> Transpose<'_> {
        Transpose::new(self)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::matrix::to_row_major;

    #[test]
    fn test_from_vec() {
        let t = Dense::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        assert_eq!(t.shape().dims(), &[2, 3]);
        assert_eq!(t.shape().strides(), &[3, 1]);
        assert_eq!(t.len(), 6);
        assert_eq!(t.dtype(), DType::Float64);
    }

    #[test]
    fn test_from_vec_shape_mismatch() {
        assert!(Dense::from_vec(vec![1.0, 2.0, 3.0], &[2, 3]).is_err());
    }

    #[test]
    fn test_views() {
        let mut t = Dense::<i32>::zeros(&[2, 2]);
        t.set_float(&[0, 1], 2.9);
        assert_eq!(t.value(&[0, 1]), 2);
        assert!(t.set_string_1d(3, "-7"));
        assert_eq!(t.string_val(&[1, 1]), "-7");
        assert!(!t.set_string_1d(3, "seven"));
        assert_eq!(t.value_1d(3), -7);
        assert_eq!(t.floats_1d(), vec![0.0, 2.0, 0.0, -7.0]);
    }

    #[test]
    fn test_traversal_defaults() {
        let mut t = Dense::from_vec(vec![1.0_f32, 2.0, 3.0], &[3]).unwrap();
        let mut out = Vec::new();
        t.eval_func(&mut |v| v * v, &mut out);
        assert_eq!(out, vec![1.0, 4.0, 9.0]);
        t.set_func(&mut |v| v + 0.5);
        assert_eq!(t.as_slice(), &[1.5, 2.5, 3.5]);
        t.set_zeros();
        assert_eq!(t.agg_func(&mut |v, acc| acc + v, 10.0), 10.0);
    }

    #[test]
    fn test_rows() {
        let mut t = Dense::from_vec(vec![1_i64, 2, 3, 4], &[2, 2]).unwrap();
        assert!(t.add_rows(1));
        assert_eq!(t.as_slice(), &[1, 2, 3, 4, 0, 0]);
        assert!(t.set_num_rows(1));
        assert_eq!(t.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_rows_overflow_is_refused() {
        let mut t = Dense::from_vec(vec![1_i32, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
        assert!(!t.add_rows(usize::MAX));
        assert!(!t.set_num_rows(usize::MAX));
        assert_eq!(t.shape().dims(), &[2, 3]);
        assert_eq!(t.as_slice(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_set_shape_rejects_gapped_strides() {
        let mut t = Dense::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        assert!(t.set_shape(&[2, 2], Some(&[4, 1][..]), None).is_err());
        assert_eq!(t.shape().strides(), &[2, 1]);
        assert_eq!(t.at(1, 1).unwrap(), 4.0);
    }

    #[test]
    fn test_matrix() {
        let t = Dense::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        assert_eq!(t.dims().unwrap(), (2, 3));
        assert_eq!(t.at(1, 2).unwrap(), 6.0);
        assert!(t.at(2, 0).is_err());
        assert_eq!(to_row_major(&t.t()).unwrap(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_matrix_requires_2d() {
        let t = Dense::<f64>::zeros(&[2, 2, 2]);
        assert!(t.dims().is_err());
        assert!(t.as_matrix().is_none());
    }
}
