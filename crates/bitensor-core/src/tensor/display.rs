//! `Display` formatting for tensors.

use core::fmt;

use crate::dtype::Scalar;
use crate::storage::BoolStore;

use super::{Bits, Dense, Tensor};

/// Shared layout: flat list for 1-D, one line per row for 2-D, a summary
/// above that. Elements are rendered through the string view.
fn fmt_tensor(f: &mut fmt::Formatter<'_>, name: &str, t: &dyn Tensor) -> fmt::Result {
    let shape = t.shape();
    if t.is_empty() {
        return write!(f, "{name}([], shape={:?})", shape.dims());
    }

    match shape.num_dims() {
        0 => write!(f, "{name}({})", t.string_val_1d(0)),
        1 => {
            write!(f, "{name}([")?;
            for i in 0..t.len() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", t.string_val_1d(i))?;
            }
            write!(f, "])")
        }
        2 => {
            let rows = shape.dim(0);
            let cols = shape.dim(1);
            writeln!(f, "{name}([")?;
            for r in 0..rows {
                write!(f, "  [")?;
                for c in 0..cols {
                    if c > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", t.string_val(&[r, c]))?;
                }
                if r < rows - 1 {
                    writeln!(f, "],")?;
                } else {
                    writeln!(f, "]")?;
                }
            }
            write!(f, "])")
        }
        _ => {
            write!(
                f,
                "{name}(shape={:?}, data=[{}, ..., {}])",
                shape.dims(),
                t.string_val_1d(0),
                t.string_val_1d(t.len() - 1)
            )
        }
    }
}

impl<S: BoolStore + 'static> fmt::Display for Bits<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tensor(f, "bits", self)
    }
}

impl<T: Scalar> fmt::Display for Dense<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tensor(f, "tensor", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_1d() {
        let b = Bits::from_bools(&[true, false, true], &[3]).unwrap();
        assert_eq!(format!("{b}"), "bits([true, false, true])");
    }

    #[test]
    fn test_display_2d() {
        let b = Bits::from_bools(&[true, false, false, true], &[2, 2]).unwrap();
        let s = format!("{b}");
        assert!(s.starts_with("bits("));
        assert!(s.contains("[true, false]"));
        assert!(s.contains("[false, true]"));
    }

    #[test]
    fn test_display_empty() {
        let b = Bits::new(&[0, 3]);
        assert_eq!(format!("{b}"), "bits([], shape=[0, 3])");
    }

    #[test]
    fn test_display_scalar_and_3d() {
        assert_eq!(format!("{}", Bits::new(&[])), "bits(false)");
        let d = Dense::<i32>::zeros(&[2, 3, 4]);
        assert!(format!("{d}").contains("shape=[2, 3, 4]"));
    }

    #[test]
    fn test_display_dense_1d() {
        let d = Dense::from_vec(vec![1, 2, 3], &[3]).unwrap();
        assert_eq!(format!("{d}"), "tensor([1, 2, 3])");
    }
}
