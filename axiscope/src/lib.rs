#![forbid(unsafe_code)]

//! Consistency checks for array-shape annotations across one dynamic call.
//!
//! Two parameters annotated with the same axis name must agree on its size
//! for the whole of a scoped call, including every check made by the code it
//! calls. A nested scoped call starts from an empty set of bindings, and the
//! caller's bindings come back unchanged when it returns.
//!
//! ```
//! use axiscope::{Array, DType, DTypeSpec, Function, ShapeAnnotation, Wrap};
//!
//! let x_ann = ShapeAnnotation::new(DTypeSpec::Float, "b c").unwrap();
//! let y_ann = ShapeAnnotation::new(DTypeSpec::Float, "b").unwrap();
//! let consistent = Function::new("consistent", move |(x, y): (Array, Array)| {
//!     x_ann.is_instance(&x) && y_ann.is_instance(&y)
//! })
//! .wrap()
//! .unwrap();
//!
//! let f32s = |shape: &[usize]| Array::new(DType::F32, shape.to_vec());
//! assert!(consistent.call((f32s(&[2, 3]), f32s(&[2]))));
//! assert!(!consistent.call((f32s(&[2, 3]), f32s(&[5]))));
//! ```

pub use axiscope_scope::{self as scope, AxisSize, BindingContext, ScopeError, config};
pub use axiscope_shape::{
    Array, ArrayLike, DType, DTypeSpec, Dim, ShapeAnnotation, ShapeMismatch, ShapeParseError,
    ShapeSpec,
};
pub use axiscope_wrap::*;
