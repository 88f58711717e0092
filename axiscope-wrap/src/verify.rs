#![forbid(unsafe_code)]

use std::sync::Arc;

use axiscope_scope::config::Settings;

use crate::checker::{Param, PassThrough, TypeChecker};
use crate::error::{ConstructError, WrapError};
use crate::function::Function;
use crate::record::{Constructor, InitCall, Record};
use crate::wrap::Wrap;

/// Checks every set, resolvable field of `obj` against its declared annotation.
///
/// Runs in a fresh binding context of its own, so axis names shared by several
/// field annotations are held to one size across all of them while the
/// caller's bindings are neither read nor extended.
pub fn verify_fields<R>(obj: &R, checker: &dyn TypeChecker) -> Result<(), ConstructError>
where
    R: Record + ?Sized,
{
    axiscope_scope::scoped(|| -> Result<(), ConstructError> {
        let class = obj.class();
        for field in obj.field_names() {
            let Some((_, annotation)) = class.resolve_annotation(&field) else {
                return Err(ConstructError::UnresolvedField {
                    class: class.name().to_string(),
                    field,
                });
            };
            if annotation.is_unverifiable() {
                tracing::trace!(class = %class.name(), %field, "skipping unresolved annotation");
                continue;
            }
            let Some(value) = obj.field(&field) else {
                tracing::trace!(class = %class.name(), %field, "skipping unset field");
                continue;
            };
            checker.check(&Param::new(&field, annotation), &value)?;
        }
        Ok(())
    })
}

/// Record decorator bound to one type-checking capability.
#[derive(Clone)]
pub struct RecordVerifier {
    checker: Arc<dyn TypeChecker>,
}

impl RecordVerifier {
    pub fn new(checker: impl TypeChecker + 'static) -> Self {
        Self {
            checker: Arc::new(checker),
        }
    }

    pub fn from_arc(checker: Arc<dyn TypeChecker>) -> Self {
        Self { checker }
    }

    pub fn pass_through() -> Self {
        Self::new(PassThrough)
    }

    /// Uses `checker` unless the settings turn record verification off.
    pub fn from_settings(settings: &Settings, checker: impl TypeChecker + 'static) -> Self {
        if settings.verify_records {
            Self::new(checker)
        } else {
            Self::pass_through()
        }
    }

    /// Makes the outermost construction verify the finished instance.
    /// Plain classes come back untouched.
    pub fn apply<T, A>(&self, ctor: Constructor<T, A>) -> Constructor<T, A>
    where
        T: Record + 'static,
        A: 'static,
    {
        if !ctor.class().is_record() {
            tracing::debug!(class = %ctor.class().name(), "not a record; verifier not attached");
            return ctor;
        }
        let inner = ctor.initializer().clone();
        let checker = Arc::clone(&self.checker);
        let init = Function::new(
            inner.name().to_string(),
            move |(args, call): (A, InitCall)| -> Result<T, ConstructError> {
                let obj = inner.call((args, call))?;
                if call == InitCall::Outermost {
                    verify_fields(&obj, checker.as_ref())?;
                }
                Ok(obj)
            },
        );
        tracing::debug!(class = %ctor.class().name(), "field verifier attached");
        ctor.with_initializer(init)
    }

    /// Attaches the verifier, then scopes the whole initializer.
    pub fn decorate<T, A>(&self, ctor: Constructor<T, A>) -> Result<Constructor<T, A>, WrapError>
    where
        T: Record + 'static,
        A: 'static,
    {
        if !ctor.class().is_record() {
            return Ok(ctor);
        }
        self.apply(ctor).wrap()
    }
}

/// `None` means no type enforcement: fields are walked but never rejected.
pub fn record_decorator(checker: Option<Arc<dyn TypeChecker>>) -> RecordVerifier {
    match checker {
        Some(checker) => RecordVerifier::from_arc(checker),
        None => RecordVerifier::pass_through(),
    }
}
