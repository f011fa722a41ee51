//! # bitensor
//!
//! Compact N-dimensional boolean tensors for numeric pipelines.
//!
//! One `use bitensor::prelude::*;` gives you shapes, bit-packed boolean
//! tensors, dense numeric tensors and the common `Tensor` contract they
//! share.
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | Shapes, packed storage, tensors, type registry |
//!
//! ```
//! use bitensor::prelude::*;
//!
//! let mut b = Bits::new(&[2, 3]);
//! b.set_float_1d(4, 1.0);
//! assert!(b.add_rows(1));
//! assert_eq!(b.len(), 9);
//! assert_eq!(b.agg_func(&mut |v, acc| acc + v, 0.0), 1.0);
//! ```

#[cfg(feature = "core")]
pub use bitensor_core as core;

/// Glob-import convenience: `use bitensor::prelude::*;`
pub mod prelude {
    #[cfg(feature = "core")]
    pub use bitensor_core::prelude::*;
}
