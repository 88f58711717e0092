#![forbid(unsafe_code)]

use miette::Diagnostic;
use thiserror::Error;

use crate::class::Class;

#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum WrapError {
    #[error("cannot scope class `{class}`: only record classes can be wrapped")]
    #[diagnostic(
        code(axiscope::wrap::plain_class),
        help("declare the class as a record, or wrap its methods one by one")
    )]
    PlainClass { class: String },
}

#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
#[error("type mismatch for `{param}`: expected {expected}, found {found}")]
#[diagnostic(code(axiscope::type_mismatch))]
pub struct TypeMismatch {
    pub param: String,
    pub expected: String,
    pub found: String,
    #[help]
    pub reason: Option<String>,
}

#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ConstructError {
    #[error("field `{field}` of `{class}` has no annotation anywhere in its class chain")]
    #[diagnostic(code(axiscope::verify::unresolved_field))]
    UnresolvedField { class: String, field: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Mismatch(#[from] TypeMismatch),

    #[error("initializer of `{class}` failed: {message}")]
    #[diagnostic(code(axiscope::verify::init))]
    Init { class: String, message: String },
}

impl ConstructError {
    pub fn init(class: &Class, message: impl Into<String>) -> Self {
        ConstructError::Init {
            class: class.name().to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
#[error("property `{property}` has no {accessor}")]
#[diagnostic(code(axiscope::property::access))]
pub struct AccessError {
    pub property: String,
    pub accessor: &'static str,
}
