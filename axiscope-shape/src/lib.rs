#![forbid(unsafe_code)]

//! Reference shape matcher.
//!
//! A [`ShapeAnnotation`] pairs a dtype constraint with a dimension pattern such
//! as `"b c"` or `"*batch 3"`. Checking a value against it reads the axis
//! bindings of the current binding context and, on success only, records the
//! sizes it bound there.

mod array;
mod dims;
mod dtype;
mod error;
mod matcher;

pub use array::{Array, ArrayLike};
pub use dims::{Dim, ShapeSpec};
pub use dtype::{DType, DTypeSpec};
pub use error::{ShapeMismatch, ShapeParseError};

/// A dtype constraint plus a dimension pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeAnnotation {
    dtype: DTypeSpec,
    shape: ShapeSpec,
}

impl ShapeAnnotation {
    pub fn new(dtype: DTypeSpec, dims: &str) -> Result<Self, ShapeParseError> {
        Ok(Self {
            dtype,
            shape: ShapeSpec::parse(dims)?,
        })
    }

    pub fn dtype(&self) -> &DTypeSpec {
        &self.dtype
    }

    pub fn shape(&self) -> &ShapeSpec {
        &self.shape
    }

    /// Checks `value` against this annotation inside the current binding
    /// context. A failed check leaves the context exactly as it was.
    pub fn check(&self, value: &dyn ArrayLike) -> Result<(), ShapeMismatch> {
        if axiscope_scope::config::is_disabled() {
            return Ok(());
        }
        let found = value.dtype();
        if !self.dtype.accepts(found) {
            return Err(ShapeMismatch::DType {
                expected: self.dtype.display(),
                found: found.name(),
            });
        }
        axiscope_scope::with_context(|cx| {
            let staged = matcher::match_shape(&self.shape, value.shape(), cx.axes())?;
            for (name, size) in staged {
                cx.bind(name, size);
            }
            Ok(())
        })
        .inspect_err(|err| tracing::debug!(annotation = %self.display(), %err, "shape check failed"))
    }

    pub fn is_instance(&self, value: &dyn ArrayLike) -> bool {
        self.check(value).is_ok()
    }

    pub fn display(&self) -> String {
        format!("{}[\"{}\"]", self.dtype.display(), self.shape.display())
    }
}

#[cfg(test)]
mod tests {
    use axiscope_scope::{AxisSize, current_context, scoped};

    use super::*;

    fn f32s(shape: &[usize]) -> Array {
        Array::new(DType::F32, shape.to_vec())
    }

    #[test]
    fn binds_on_success_only() {
        let ann = ShapeAnnotation::new(DTypeSpec::Float, "b c").expect("parse");
        scoped(|| {
            assert!(ann.is_instance(&f32s(&[2, 3])));
            assert_eq!(
                current_context(|cx| cx.axis("c").cloned()),
                Some(Some(AxisSize::Single(3)))
            );
            assert!(!ann.is_instance(&f32s(&[2, 4])));
            assert!(!ann.is_instance(&Array::new(DType::I32, vec![2, 3])));
        });
    }

    #[test]
    fn dtype_mismatch_reports_names() {
        let ann = ShapeAnnotation::new(DTypeSpec::Exact(DType::F64), "n").expect("parse");
        let err = ann.check(&f32s(&[1])).unwrap_err();
        assert_eq!(
            err,
            ShapeMismatch::DType {
                expected: "Float64".to_string(),
                found: "float32",
            }
        );
    }

    #[test]
    fn display_includes_dtype_and_dims() {
        let ann = ShapeAnnotation::new(DTypeSpec::Any, "#b *rest 3").expect("parse");
        assert_eq!(ann.display(), "Shaped[\"#b *rest 3\"]");
    }
}
