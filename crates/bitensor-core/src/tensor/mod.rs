//! N-dimensional tensors behind a common contract.
//!
//! [`Tensor`] is the object-safe interface the rest of a pipeline works
//! through: shape queries, a shared `f64` view and a string view of every
//! element, and whole-tensor traversal. Two element families implement it:
//!
//! - [`Bits`]: booleans packed one bit per element.
//! - [`Dense`]: contiguous numeric storage, generic over [`Scalar`].
//!
//! All traversal (`floats_1d`, `agg_func`, `eval_func`, `set_func`) visits
//! flat indices in strictly ascending order.
//!
//! [`Scalar`]: crate::dtype::Scalar

mod bits;
mod dense;
mod display;

pub use bits::{Bits, ByteBits};
pub use dense::Dense;

use core::fmt;

use crate::dtype::DType;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::shape::Shape;

/// Common interface of all tensor element types.
pub trait Tensor: fmt::Debug {
    /// Element type tag.
    fn dtype(&self) -> DType;

    /// Shape descriptor.
    fn shape(&self) -> &Shape;

    /// Replace the shape and resize storage to match, keeping the flat
    /// prefix of existing values.
    fn set_shape(
        &mut self,
        dims: &[usize],
        strides: Option<&[usize]>,
        names: Option<&[String]>,
    ) -> Result<()>;

    /// Total number of elements.
    fn len(&self) -> usize {
        self.shape().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn num_dims(&self) -> usize {
        self.shape().num_dims()
    }

    /// Size of dimension `i`.
    fn dim(&self, i: usize) -> usize {
        self.shape().dim(i)
    }

    fn is_row_major(&self) -> bool {
        self.shape().is_row_major()
    }

    // ------------------------------------------------------------------
    // Nulls
    // ------------------------------------------------------------------

    fn is_null(&self, index: &[usize]) -> bool;
    fn is_null_1d(&self, i: usize) -> bool;

    /// Mark an element null. Returns whether the request was applied.
    fn set_null(&mut self, index: &[usize], null: bool) -> bool;
    fn set_null_1d(&mut self, i: usize, null: bool) -> bool;

    // ------------------------------------------------------------------
    // Float view
    // ------------------------------------------------------------------

    fn float_val(&self, index: &[usize]) -> f64 {
        self.float_val_1d(self.shape().offset(index))
    }

    fn float_val_1d(&self, i: usize) -> f64;

    fn set_float(&mut self, index: &[usize], value: f64) {
        let i = self.shape().offset(index);
        self.set_float_1d(i, value);
    }

    fn set_float_1d(&mut self, i: usize, value: f64);

    // ------------------------------------------------------------------
    // String view
    // ------------------------------------------------------------------

    fn string_val(&self, index: &[usize]) -> String {
        self.string_val_1d(self.shape().offset(index))
    }

    fn string_val_1d(&self, i: usize) -> String;

    /// Parse and store a value. Unparsable input leaves the element
    /// unchanged; the return value says whether it was applied.
    fn set_string(&mut self, index: &[usize], value: &str) -> bool {
        let i = self.shape().offset(index);
        self.set_string_1d(i, value)
    }

    fn set_string_1d(&mut self, i: usize, value: &str) -> bool;

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Float view of every element in flat order.
    fn floats_1d(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.float_val_1d(i)).collect()
    }

    /// Left fold over the float view: `acc = combine(value, acc)`, starting
    /// from `init`.
    fn agg_func(&self, combine: &mut dyn FnMut(f64, f64) -> f64, init: f64) -> f64 {
        (0..self.len()).fold(init, |acc, i| combine(self.float_val_1d(i), acc))
    }

    /// Write `transform(value)` for every element into `out`.
    ///
    /// `out` is reallocated only when its length differs from `len()`.
    fn eval_func(&self, transform: &mut dyn FnMut(f64) -> f64, out: &mut Vec<f64>) {
        let n = self.len();
        if out.len() != n {
            *out = vec![0.0; n];
        }
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = transform(self.float_val_1d(i));
        }
    }

    /// Replace every element with `transform(value)`, in place.
    fn set_func(&mut self, transform: &mut dyn FnMut(f64) -> f64) {
        for i in 0..self.len() {
            let v = transform(self.float_val_1d(i));
            self.set_float_1d(i, v);
        }
    }

    /// Set every element to zero.
    fn set_zeros(&mut self) {
        self.set_func(&mut |_| 0.0);
    }

    /// Deep copy behind a trait object.
    fn clone_tensor(&self) -> Box<dyn Tensor>;

    // ------------------------------------------------------------------
    // Growth
    // ------------------------------------------------------------------

    /// Append `n` zeroed rows along the outer-most dimension.
    ///
    /// Only row-major tensors grow; otherwise nothing happens and `false`
    /// is returned.
    fn add_rows(&mut self, n: usize) -> bool;

    /// Set the outer-most dimension to `max(rows, 1)`, keeping existing
    /// rows that still fit. Row-major only, like [`add_rows`](Self::add_rows).
    fn set_num_rows(&mut self, rows: usize) -> bool;

    /// Matrix view, if this tensor supports one.
    fn as_matrix(&self) -> Option<&dyn Matrix> {
        None
    }
}

impl Clone for Box<dyn Tensor> {
    fn clone(&self) -> Self {
        self.clone_tensor()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn mixed() -> Vec<Box<dyn Tensor>> {
        let mut b = Bits::new(&[2, 2]);
        b.set_1d(1, true);
        b.set_1d(3, true);
        let d = Dense::from_vec(vec![0.0_f64, 2.5, 0.0, -1.0], &[2, 2]).unwrap();
        vec![Box::new(b), Box::new(d)]
    }

    #[test]
    fn test_generic_sum() {
        let sums: Vec<f64> = mixed()
            .iter()
            .map(|t| t.agg_func(&mut |v, acc| acc + v, 0.0))
            .collect();
        assert_eq!(sums, vec![2.0, 1.5]);
    }

    #[test]
    fn test_generic_dtype_and_shape() {
        let ts = mixed();
        assert_eq!(ts[0].dtype(), DType::Bool);
        assert_eq!(ts[1].dtype(), DType::Float64);
        for t in &ts {
            assert_eq!(t.len(), 4);
            assert_eq!(t.dim(0), 2);
            assert!(t.is_row_major());
            assert!(!t.is_null(&[0, 0]));
        }
    }

    #[test]
    fn test_matrix_capability_query() {
        let ts = mixed();
        assert!(ts[0].as_matrix().is_none());
        let m = ts[1].as_matrix().unwrap();
        assert_eq!(m.dims().unwrap(), (2, 2));
        assert_eq!(m.at(0, 1).unwrap(), 2.5);
    }

    #[test]
    fn test_boxed_clone_independent() {
        let ts = mixed();
        let mut copy = ts[0].clone();
        copy.set_zeros();
        assert_eq!(copy.floats_1d(), vec![0.0; 4]);
        assert_eq!(ts[0].floats_1d(), vec![0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_generic_growth() {
        let mut ts = mixed();
        for t in &mut ts {
            assert!(t.add_rows(2));
            assert_eq!(t.len(), 8);
            assert!(t.set_num_rows(0));
            assert_eq!(t.dim(0), 1);
            assert_eq!(t.len(), 2);
        }
    }
}
