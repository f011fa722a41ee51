//! Element type identity.
//!
//! Every tensor reports a [`DType`] tag. The [`ScalarType`] trait is the
//! narrow identity object handed to schema systems: it carries a type id, a
//! name and a bit width, nothing more. [`BoolType`] is the 1-bit boolean
//! entry, and [`TypeRegistry`] keeps the known types by name.
//!
//! Dense numeric tensors are generic over [`Scalar`].

use core::fmt;
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Scalar element type tag of a tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DType {
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl DType {
    /// Canonical lower-case name, as used in schemas.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }

    /// Storage width of one element in bits.
    pub fn bit_width(self) -> usize {
        match self {
            Self::Bool => 1,
            Self::Int32 | Self::Float32 => 32,
            Self::Int64 | Self::Float64 => 64,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ScalarType: identity objects for schema interchange
// ---------------------------------------------------------------------------

/// Identity of a scalar element type.
pub trait ScalarType: fmt::Debug + Send + Sync {
    fn id(&self) -> DType;
    fn name(&self) -> &str;
    fn bit_width(&self) -> usize;
}

/// The boolean scalar type: one bit per element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolType;

impl ScalarType for BoolType {
    fn id(&self) -> DType {
        DType::Bool
    }

    fn name(&self) -> &str {
        "bool"
    }

    fn bit_width(&self) -> usize {
        1
    }
}

impl ScalarType for DType {
    fn id(&self) -> DType {
        *self
    }

    fn name(&self) -> &str {
        DType::name(*self)
    }

    fn bit_width(&self) -> usize {
        DType::bit_width(*self)
    }
}

/// Name-keyed collection of [`ScalarType`] identities.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    types: BTreeMap<String, Arc<dyn ScalarType>>,
}

impl TypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding [`BoolType`] and every numeric [`DType`].
    pub fn with_builtin() -> Self {
        let mut reg = Self::new();
        let builtin: [Arc<dyn ScalarType>; 5] = [
            Arc::new(BoolType),
            Arc::new(DType::Int32),
            Arc::new(DType::Int64),
            Arc::new(DType::Float32),
            Arc::new(DType::Float64),
        ];
        for ty in builtin {
            reg.types.insert(ty.name().to_string(), ty);
        }
        reg
    }

    /// Register a type under its own name.
    ///
    /// Fails with [`CoreError::DuplicateType`] if the name is taken.
    pub fn register(&mut self, ty: Arc<dyn ScalarType>) -> Result<()> {
        let name = ty.name().to_string();
        if self.types.contains_key(&name) {
            return Err(CoreError::DuplicateType { name });
        }
        tracing::debug!(name = %name, bits = ty.bit_width(), "registered scalar type");
        self.types.insert(name, ty);
        Ok(())
    }

    /// Look a type up by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ScalarType>> {
        self.types.get(name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Scalar: element types of dense tensors
// ---------------------------------------------------------------------------

/// Base trait for numeric element types storable in a [`Dense`] tensor.
///
/// [`Dense`]: crate::tensor::Dense
pub trait Scalar:
    Copy + Clone + fmt::Debug + fmt::Display + PartialEq + PartialOrd + Send + Sync + Default + 'static
{
    /// Type tag reported by tensors of this element type.
    const DTYPE: DType;

    /// The additive identity (`0`).
    fn zero() -> Self;

    /// Widen to the shared `f64` view.
    fn to_f64(self) -> f64;

    /// Narrow from the `f64` view (truncating for integers).
    fn from_f64(v: f64) -> Self;

    /// Parse from text, `None` if the text is not a valid literal.
    fn parse(s: &str) -> Option<Self>;
}

macro_rules! impl_scalar_float {
    ($ty:ty, $dtype:expr) => {
        impl Scalar for $ty {
            const DTYPE: DType = $dtype;

            #[inline]
            fn zero() -> Self {
                0.0
            }
            #[inline]
            fn to_f64(self) -> f64 {
                f64::from(self)
            }
            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn from_f64(v: f64) -> Self {
                v as Self
            }
            fn parse(s: &str) -> Option<Self> {
                s.trim().parse().ok()
            }
        }
    };
}

impl_scalar_float!(f32, DType::Float32);
impl_scalar_float!(f64, DType::Float64);

macro_rules! impl_scalar_int {
    ($ty:ty, $dtype:expr) => {
        impl Scalar for $ty {
            const DTYPE: DType = $dtype;

            #[inline]
            fn zero() -> Self {
                0
            }
            #[inline]
            #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
            fn to_f64(self) -> f64 {
                self as f64
            }
            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn from_f64(v: f64) -> Self {
                v as Self
            }
            fn parse(s: &str) -> Option<Self> {
                s.trim().parse().ok()
            }
        }
    };
}

impl_scalar_int!(i32, DType::Int32);
impl_scalar_int!(i64, DType::Int64);

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_type_identity() {
        let ty = BoolType;
        assert_eq!(ty.id(), DType::Bool);
        assert_eq!(ty.name(), "bool");
        assert_eq!(ty.bit_width(), 1);
    }

    #[test]
    fn test_dtype_widths() {
        assert_eq!(DType::Bool.bit_width(), 1);
        assert_eq!(DType::Int32.bit_width(), 32);
        assert_eq!(DType::Float64.bit_width(), 64);
        assert_eq!(DType::Float32.to_string(), "float32");
    }

    #[test]
    fn test_registry_builtin() {
        let reg = TypeRegistry::with_builtin();
        assert_eq!(reg.len(), 5);
        let b = reg.get("bool").unwrap();
        assert_eq!(b.id(), DType::Bool);
        assert_eq!(b.bit_width(), 1);
        assert!(reg.get("complex128").is_none());
    }

    #[test]
    fn test_registry_duplicate() {
        let mut reg = TypeRegistry::new();
        assert!(reg.is_empty());
        reg.register(Arc::new(BoolType)).unwrap();
        let err = reg.register(Arc::new(BoolType)).unwrap_err();
        assert_eq!(
            err,
            CoreError::DuplicateType {
                name: "bool".to_string()
            }
        );
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["bool"]);
    }

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(f64::zero(), 0.0);
        assert_eq!(i32::from_f64(2.9), 2);
        assert_eq!(i64::to_f64(-3), -3.0);
        assert_eq!(f32::parse(" 1.5"), Some(1.5));
        assert_eq!(i32::parse("abc"), None);
        assert_eq!(<f64 as Scalar>::DTYPE, DType::Float64);
    }

    #[test]
    fn test_dtype_serde() {
        let json = serde_json::to_string(&DType::Bool).unwrap();
        assert_eq!(json, "\"Bool\"");
        let back: DType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DType::Bool);
    }
}
