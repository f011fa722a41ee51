//! Shape descriptor: dimension sizes, strides and dimension names.
//!
//! A [`Shape`] maps an N-dimensional index to a flat storage offset. Strides
//! are counted in elements. Row-major (C order) is the default layout; the
//! growth operations on tensors only work on row-major shapes.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Memory layout implied by a shape's strides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// Last dimension varies fastest.
    RowMajor,
    /// First dimension varies fastest.
    ColMajor,
    /// Any other stride pattern.
    Strided,
}

/// Dimension sizes, strides and names of a tensor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    dims: Vec<usize>,
    strides: Vec<usize>,
    names: Vec<String>,
    layout: Layout,
}

impl Shape {
    /// Create a shape from dims with optional strides and names.
    ///
    /// Without strides the layout is row-major; without names every
    /// dimension gets an empty name. Strides that reach past the last
    /// element are rejected with [`CoreError::InvalidShape`].
    ///
    /// ```
    /// # use bitensor_core::shape::Shape;
    /// let sh = Shape::new(vec![2, 3], Some(vec![1, 2]), None).unwrap();
    /// assert!(sh.is_col_major());
    /// assert_eq!(sh.offset(&[1, 2]), 5);
    /// ```
    pub fn new(
        dims: Vec<usize>,
        strides: Option<Vec<usize>>,
        names: Option<Vec<String>>,
    ) -> Result<Self> {
        let strides = strides.unwrap_or_else(|| row_major_strides(&dims));
        if strides.len() != dims.len() {
            return Err(CoreError::DimensionMismatch {
                expected: vec![dims.len()],
                got: vec![strides.len()],
            });
        }
        let names = names.unwrap_or_else(|| vec![String::new(); dims.len()]);
        if names.len() != dims.len() {
            return Err(CoreError::DimensionMismatch {
                expected: vec![dims.len()],
                got: vec![names.len()],
            });
        }
        let len: usize = dims.iter().product();
        if len > 0 {
            let max_offset = dims
                .iter()
                .zip(&strides)
                .try_fold(0usize, |acc, (&d, &s)| {
                    (d - 1).checked_mul(s)?.checked_add(acc)
                });
            if max_offset.is_none_or(|off| off >= len) {
                return Err(CoreError::InvalidShape {
                    shape: dims,
                    reason: "strides address past the end of storage",
                });
            }
        }
        let layout = layout_of(&dims, &strides);
        Ok(Self {
            dims,
            strides,
            names,
            layout,
        })
    }

    /// A row-major shape with unnamed dimensions.
    pub fn row_major(dims: &[usize]) -> Self {
        Self {
            strides: row_major_strides(dims),
            names: vec![String::new(); dims.len()],
            dims: dims.to_vec(),
            layout: Layout::RowMajor,
        }
    }

    /// A column-major shape with unnamed dimensions.
    pub fn col_major(dims: &[usize]) -> Self {
        let strides = col_major_strides(dims);
        let layout = layout_of(dims, &strides);
        Self {
            strides,
            names: vec![String::new(); dims.len()],
            dims: dims.to_vec(),
            layout,
        }
    }

    /// Attach dimension names, replacing the current ones.
    pub fn with_names<S: Into<String>>(mut self, names: Vec<S>) -> Result<Self> {
        if names.len() != self.dims.len() {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.dims.len()],
                got: vec![names.len()],
            });
        }
        self.names = names.into_iter().map(Into::into).collect();
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Total number of elements: the product of all dims.
    #[inline]
    pub fn len(&self) -> usize {
        self.dims.iter().product()
    }

    /// Whether the shape holds zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of dimensions.
    #[inline]
    pub fn num_dims(&self) -> usize {
        self.dims.len()
    }

    /// Size of dimension `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= num_dims()`.
    #[inline]
    pub fn dim(&self, i: usize) -> usize {
        self.dims[i]
    }

    /// Size of dimension `i`, checked.
    pub fn try_dim(&self, i: usize) -> Result<usize> {
        self.dims
            .get(i)
            .copied()
            .ok_or(CoreError::AxisOutOfBounds {
                axis: i,
                ndim: self.num_dims(),
            })
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name of dimension `i`, empty if unnamed.
    pub fn dim_name(&self, i: usize) -> &str {
        &self.names[i]
    }

    /// Index of the first dimension called `name`.
    pub fn dim_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    pub fn is_row_major(&self) -> bool {
        self.layout == Layout::RowMajor
    }

    #[inline]
    pub fn is_col_major(&self) -> bool {
        self.layout == Layout::ColMajor
    }

    // ------------------------------------------------------------------
    // Addressing
    // ------------------------------------------------------------------

    /// Flat offset of a multi-dimensional index.
    ///
    /// # Panics
    ///
    /// Panics if the index rank differs from the shape rank or any
    /// coordinate is out of range. Use [`try_offset`](Self::try_offset) for
    /// a checked variant.
    pub fn offset(&self, index: &[usize]) -> usize {
        match self.try_offset(index) {
            Ok(off) => off,
            Err(e) => panic!("{e}"),
        }
    }

    /// Flat offset of a multi-dimensional index, checked.
    pub fn try_offset(&self, index: &[usize]) -> Result<usize> {
        if index.len() != self.num_dims() {
            return Err(CoreError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.dims.clone(),
            });
        }
        let mut flat = 0;
        for ((&idx, &dim), &stride) in index.iter().zip(&self.dims).zip(&self.strides) {
            if idx >= dim {
                return Err(CoreError::IndexOutOfBounds {
                    index: index.to_vec(),
                    shape: self.dims.clone(),
                });
            }
            flat += idx * stride;
        }
        Ok(flat)
    }

    /// Multi-dimensional index of a flat offset: the inverse of
    /// [`offset`](Self::offset).
    ///
    /// Returns an error for offsets past the end, or for strided layouts
    /// that are not a dense packing of the dims.
    pub fn index(&self, offset: usize) -> Result<Vec<usize>> {
        if offset >= self.len() {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![offset],
                shape: self.dims.clone(),
            });
        }
        if self.layout == Layout::Strided {
            return Err(CoreError::InvalidArgument {
                reason: "offset inversion requires a row-major or column-major shape",
            });
        }
        // Singleton dims always index at 0 and may share a stride with a
        // neighbour, so they stay out of the division chain.
        let mut axes: Vec<usize> = (0..self.num_dims()).filter(|&ax| self.dims[ax] > 1).collect();
        axes.sort_by(|&a, &b| self.strides[b].cmp(&self.strides[a]));
        let mut index = vec![0; self.num_dims()];
        let mut rem = offset;
        for ax in axes {
            let stride = self.strides[ax];
            index[ax] = rem / stride;
            rem %= stride;
        }
        Ok(index)
    }

    /// Set the outer-most dimension. Only valid for row-major shapes, whose
    /// strides do not depend on `dims[0]`.
    pub(crate) fn set_rows(&mut self, rows: usize) {
        debug_assert!(self.is_row_major());
        self.dims[0] = rows;
    }

    /// Number of elements in one outer-most row.
    pub(crate) fn row_len(&self) -> usize {
        self.dims[1..].iter().product()
    }
}

// ======================================================================
// Utility functions
// ======================================================================

/// Compute row-major (C-order) strides from dims.
pub fn row_major_strides(dims: &[usize]) -> Vec<usize> {
    let ndim = dims.len();
    if ndim == 0 {
        return vec![];
    }
    let mut strides = vec![1usize; ndim];
    for i in (0..ndim - 1).rev() {
        strides[i] = strides[i + 1] * dims[i + 1];
    }
    strides
}

/// Compute column-major (Fortran-order) strides from dims.
pub fn col_major_strides(dims: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; dims.len()];
    for i in 1..dims.len() {
        strides[i] = strides[i - 1] * dims[i - 1];
    }
    strides
}

fn layout_of(dims: &[usize], strides: &[usize]) -> Layout {
    if strides == row_major_strides(dims).as_slice() {
        Layout::RowMajor
    } else if strides == col_major_strides(dims).as_slice() {
        Layout::ColMajor
    } else {
        Layout::Strided
    }
}
