use crate::dtype::DType;

/// All errors returned by `bitensor-core`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Operand shapes do not match the required layout.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// A shape or stride specification is invalid.
    #[error("invalid shape {shape:?}: {reason}")]
    InvalidShape {
        shape: Vec<usize>,
        reason: &'static str,
    },

    /// An axis index is out of bounds for the tensor's rank.
    #[error("axis {axis} out of bounds for tensor with {ndim} dimensions")]
    AxisOutOfBounds { axis: usize, ndim: usize },

    /// A flat or multi-dimensional index is out of bounds.
    #[error("index {index:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    /// The operation is not supported for the given input.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },

    /// The tensor's element type does not provide this capability.
    #[error("{op} is not supported for {dtype} tensors")]
    Unsupported { op: &'static str, dtype: DType },

    /// A scalar type with this name is already registered.
    #[error("scalar type `{name}` is already registered")]
    DuplicateType { name: String },
}

/// Convenience alias used throughout `bitensor-core`.
pub type Result<T> = std::result::Result<T, CoreError>;
