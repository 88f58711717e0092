#![forbid(unsafe_code)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ShapeParseError {
    #[error("invalid dimension `{token}` in shape \"{source_text}\"")]
    #[diagnostic(
        code(axiscope::shape::token),
        help("dimensions are integers, axis names, `_`, `*name`, `...`, optionally prefixed by `#`")
    )]
    InvalidToken { token: String, source_text: String },

    #[error("shape \"{source_text}\" has more than one variadic dimension")]
    #[diagnostic(code(axiscope::shape::variadic))]
    MultipleVariadic { source_text: String },
}

/// Why a value failed a shape check.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ShapeMismatch {
    #[error("dtype {found} is not {expected}")]
    #[diagnostic(code(axiscope::shape::dtype))]
    DType { expected: String, found: &'static str },

    #[error("rank {found} does not fit pattern needing {expected} dimensions")]
    #[diagnostic(code(axiscope::shape::rank))]
    Rank { expected: String, found: usize },

    #[error("dimension {index} has size {found}, expected {expected}")]
    #[diagnostic(code(axiscope::shape::fixed))]
    Fixed {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("axis `{name}` is bound to {bound} but got {found}")]
    #[diagnostic(code(axiscope::shape::axis))]
    Axis {
        name: String,
        bound: String,
        found: String,
    },
}
