//! `bitensor-core`: foundation crate for bitensor.
//!
//! Provides shape descriptors, packed bit storage, boolean and numeric
//! tensors behind a common [`Tensor`] contract, and the scalar type identity
//! registry used to describe tensors in schemas.
//!
//! # Design
//!
//! - A [`Bits`] tensor stores one bit per element and presents `f64` and
//!   string views, so generic numeric code can fold and map over it.
//! - Flat indices are visited in ascending order by every traversal.
//! - The 2-D [`Matrix`] view is a capability: query it with
//!   [`Tensor::as_matrix`] before use.
//! - Tensors are not synchronized; clone one to hand it to another thread.

pub mod convert;
pub mod dtype;
pub mod error;
pub mod matrix;
pub mod shape;
pub mod storage;
pub mod tensor;

// Re-export key types at crate root for convenience.
pub use dtype::{BoolType, DType, Scalar, ScalarType, TypeRegistry};
pub use error::{CoreError, Result};
pub use matrix::{Matrix, Transpose};
pub use shape::{Layout, Shape};
pub use storage::{BitSlice, BoolStore};
pub use tensor::{Bits, ByteBits, Dense, Tensor};

/// Items intended for glob-import: `use bitensor_core::prelude::*;`
pub mod prelude {
    pub use crate::dtype::{BoolType, DType, Scalar, ScalarType, TypeRegistry};
    pub use crate::error::{CoreError, Result};
    pub use crate::matrix::Matrix;
    pub use crate::shape::Shape;
    pub use crate::tensor::{Bits, Dense, Tensor};
}
