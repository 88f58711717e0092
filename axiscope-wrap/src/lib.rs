#![forbid(unsafe_code)]

//! Scoping decorator for callables and records.
//!
//! [`wrap`] gives every invocation of a callable its own binding context;
//! [`RecordVerifier`] checks a record's fields once its outermost
//! construction completes.

mod annotation;
mod checker;
mod class;
mod error;
mod function;
mod method;
mod property;
mod record;
mod registry;
mod verify;
mod wrap;

pub use annotation::{Annotation, Value};
pub use checker::{AnnotationChecker, Param, PassThrough, Signature, TypeChecker, typechecked};
pub use class::{Class, ClassBuilder, ClassKind, Lineage};
pub use error::{AccessError, ConstructError, TypeMismatch, WrapError};
pub use function::{Body, Function};
pub use method::{Method, MethodKind};
pub use property::{Deleter, Getter, Property, Setter};
pub use record::{Constructor, InitCall, Initializer, Record};
pub use verify::{RecordVerifier, record_decorator, verify_fields};
pub use wrap::{Wrap, wrap};
