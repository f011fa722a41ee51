//! Boolean tensors with packed storage.

use crate::convert::{bool_to_f64, bool_to_string, f64_to_bool, parse_bool};
use crate::dtype::DType;
use crate::error::{CoreError, Result};
use crate::matrix::{Matrix, Transpose};
use crate::shape::Shape;
use crate::storage::{BitSlice, BoolStore};

use super::Tensor;

/// An N-dimensional tensor of booleans.
///
/// Owns one [`Shape`] and one flat store whose length always equals
/// `shape.len()`. The default store packs one bit per element; any
/// [`BoolStore`] works, see [`ByteBits`].
///
/// The float view maps `true`/`false` to `1.0`/`0.0`; writing a float
/// stores `value != 0.0`. There is no null representation: `is_null` is
/// always `false` and `set_null` is never applied.
///
/// `Bits` implements [`Matrix`] only to fail: every matrix call returns
/// [`CoreError::Unsupported`], and [`Tensor::as_matrix`] reports `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bits<S = BitSlice> {
    shape: Shape,
    values: S,
}

/// Boolean tensor stored one byte per element.
pub type ByteBits = Bits<Vec<bool>>;

impl Bits {
    /// A row-major tensor of the given dims, all `false`.
    ///
    /// ```
    /// # use bitensor_core::tensor::{Bits, Tensor};
    /// let mut b = Bits::new(&[2, 3]);
    /// b.set(&[1, 1], true);
    /// assert!(b.value_1d(4));
    /// assert_eq!(b.float_val(&[1, 1]), 1.0);
    /// ```
    pub fn new(dims: &[usize]) -> Self {
        Self::zeroed(Shape::row_major(dims))
    }

    /// A tensor with a copy of `shape`, all `false`.
    pub fn from_shape(shape: &Shape) -> Self {
        Self::zeroed(shape.clone())
    }

    /// A tensor from dims with optional strides and names, all `false`.
    pub fn with_shape(
        dims: &[usize],
        strides: Option<&[usize]>,
        names: Option<&[String]>,
    ) -> Result<Self> {
        let shape = Shape::new(
            dims.to_vec(),
            strides.map(<[usize]>::to_vec),
            names.map(<[String]>::to_vec),
        )?;
        Ok(Self::zeroed(shape))
    }

    /// A row-major tensor holding `data` in flat order.
    pub fn from_bools(data: &[bool], dims: &[usize]) -> Result<Self> {
        Self::from_store(Shape::row_major(dims), data.iter().copied().collect())
    }
}

impl<S: BoolStore> Bits<S> {
    /// A tensor of the given shape, all `false`.
    pub fn zeroed(shape: Shape) -> Self {
        let values = S::zeroed(shape.len());
        Self { shape, values }
    }

    /// Wrap an existing store. Its length must match the shape.
    pub fn from_store(shape: Shape, values: S) -> Result<Self> {
        if values.len() != shape.len() {
            return Err(CoreError::InvalidShape {
                shape: shape.dims().to_vec(),
                reason: "shape length does not match storage length",
            });
        }
        Ok(Self { shape, values })
    }

    /// The underlying flat store.
    #[inline]
    pub fn values(&self) -> &S {
        &self.values
    }

    /// Element at a multi-dimensional index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn value(&self, index: &[usize]) -> bool {
        self.values.get(self.shape.offset(index))
    }

    /// Element at a flat index.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    #[inline]
    pub fn value_1d(&self, i: usize) -> bool {
        self.values.get(i)
    }

    /// Element at a multi-dimensional index, bounds-checked.
    pub fn get(&self, index: &[usize]) -> Result<bool> {
        let i = self.shape.try_offset(index)?;
        Ok(self.values.get(i))
    }

    #[inline]
    pub fn set(&mut self, index: &[usize], value: bool) {
        let i = self.shape.offset(index);
        self.values.set(i, value);
    }

    #[inline]
    pub fn set_1d(&mut self, i: usize, value: bool) {
        self.values.set(i, value);
    }

    /// Number of `true` elements.
    pub fn count_true(&self) -> usize {
        self.values.count_ones()
    }
}

impl<S: BoolStore + 'static> Tensor for Bits<S> {
    fn dtype(&self) -> DType {
        DType::Bool
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
        self.values.set_len(self.shape.len());
        tracing::debug!(dims = ?self.shape.dims(), len = self.shape.len(), "bits reshaped");
        Ok(())
    }

    fn len(&self) -> usize {
        self.values.len()
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
        bool_to_f64(self.values.get(i))
    }

    fn set_float_1d(&mut self, i: usize, value: f64) {
        self.values.set(i, f64_to_bool(value));
    }

    fn string_val_1d(&self, i: usize) -> String {
        bool_to_string(self.values.get(i))
    }

    fn set_string_1d(&mut self, i: usize, value: &str) -> bool {
        match parse_bool(value) {
            Some(b) => {
                self.values.set(i, b);
                true
            }
            None => {
                tracing::trace!(index = i, value, "set_string ignored: not a boolean");
                false
            }
        }
    }

    fn floats_1d(&self) -> Vec<f64> {
        (0..self.values.len())
            .map(|i| bool_to_f64(self.values.get(i)))
            .collect()
    }

    fn agg_func(&self, combine: &mut dyn FnMut(f64, f64) -> f64, init: f64) -> f64 {
        let mut agg = init;
        for i in 0..self.values.len() {
            agg = combine(bool_to_f64(self.values.get(i)), agg);
        }
        agg
    }

    fn eval_func(&self, transform: &mut dyn FnMut(f64) -> f64, out: &mut Vec<f64>) {
        let n = self.values.len();
        if out.len() != n {
            *out = vec![0.0; n];
        }
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = transform(bool_to_f64(self.values.get(i)));
        }
    }

    fn set_func(&mut self, transform: &mut dyn FnMut(f64) -> f64) {
        for i in 0..self.values.len() {
            let v = transform(bool_to_f64(self.values.get(i)));
            self.values.set(i, f64_to_bool(v));
        }
    }

    fn set_zeros(&mut self) {
        self.values.fill(false);
    }

    fn clone_tensor(&self) -> Box<dyn Tensor> {
        Box::new(self.clone())
    }

    fn add_rows(&mut self, n: usize) -> bool {
        if !self.can_grow("add_rows") {
            return false;
        }
        let Some(rows) = self.shape.dim(0).checked_add(n) else {
            tracing::debug!(added = n, "ignored: row count overflows usize");
            return false;
        };
        self.resize_rows(rows)
    }

    fn set_num_rows(&mut self, rows: usize) -> bool {
        if !self.can_grow("set_num_rows") {
            return false;
        }
        self.resize_rows(rows.max(1))
    }
}

impl<S: BoolStore> Bits<S> {
    fn can_grow(&self, op: &'static str) -> bool {
        if self.shape.num_dims() == 0 {
            tracing::debug!(op, "ignored: scalar tensor has no rows");
            return false;
        }
        if !self.shape.is_row_major() {
            tracing::debug!(op, layout = ?self.shape.layout(), "ignored: tensor is not row-major");
            return false;
        }
        true
    }

    fn resize_rows(&mut self, rows: usize) -> bool {
        let Some(len) = rows.checked_mul(self.shape.row_len()) else {
            tracing::debug!(rows, "ignored: element count overflows usize");
            return false;
        };
        self.shape.set_rows(rows);
        self.values.set_len(len);
        tracing::trace!(rows, len, "bits rows resized");
        true
    }
}

impl<S: BoolStore> Matrix for Bits<S> {
    fn dims(&self) -> Result<(usize, usize)> {
        Err(CoreError::Unsupported {
            op: "Matrix::dims",
            dtype: DType::Bool,
        })
    }

    fn at(&self, _i: usize, _j: usize) -> Result<f64> {
        Err(CoreError::Unsupported {
            op: "Matrix::at",
            dtype: DType::Bool,
        })
    }

    fn t(&self) -> Transpose<'_> {
        Transpose::new(self)
    }
}
