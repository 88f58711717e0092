#![forbid(unsafe_code)]

use std::sync::Arc;

use axiscope_scope::transactional;

use crate::annotation::{Annotation, Value};
use crate::error::TypeMismatch;
use crate::function::Function;

/// One named, annotated parameter.
#[derive(Clone, Copy, Debug)]
pub struct Param<'a> {
    pub name: &'a str,
    pub annotation: &'a Annotation,
}

impl<'a> Param<'a> {
    pub fn new(name: &'a str, annotation: &'a Annotation) -> Self {
        Self { name, annotation }
    }

    pub fn mismatch(&self, value: &Value, reason: Option<String>) -> TypeMismatch {
        TypeMismatch {
            param: self.name.to_string(),
            expected: self.annotation.display(),
            found: value.type_name(),
            reason,
        }
    }
}

/// Checks one value against one annotated parameter.
pub trait TypeChecker: Send + Sync {
    fn check(&self, param: &Param<'_>, value: &Value) -> Result<(), TypeMismatch>;
}

impl<F> TypeChecker for F
where
    F: Fn(&Param<'_>, &Value) -> Result<(), TypeMismatch> + Send + Sync,
{
    fn check(&self, param: &Param<'_>, value: &Value) -> Result<(), TypeMismatch> {
        self(param, value)
    }
}

/// Accepts everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassThrough;

impl TypeChecker for PassThrough {
    fn check(&self, _param: &Param<'_>, _value: &Value) -> Result<(), TypeMismatch> {
        Ok(())
    }
}

/// Structural checker. Array annotations go through the shape matcher, so
/// they read and extend the current binding context.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnnotationChecker;

impl TypeChecker for AnnotationChecker {
    fn check(&self, param: &Param<'_>, value: &Value) -> Result<(), TypeMismatch> {
        let mut reason = None;
        if transactional(|| matches(param.annotation, value, &mut reason)) {
            Ok(())
        } else {
            Err(param.mismatch(value, reason))
        }
    }
}

fn matches(annotation: &Annotation, value: &Value, reason: &mut Option<String>) -> bool {
    match (annotation, value) {
        (Annotation::Any, _) => true,
        (Annotation::Forward(name), _) => {
            tracing::trace!(%name, "unresolved annotation accepted as is");
            true
        }
        (Annotation::NoneType, Value::None) => true,
        (Annotation::Bool, Value::Bool(_)) => true,
        (Annotation::Int, Value::Int(_)) => true,
        (Annotation::Float, Value::Float(_) | Value::Int(_)) => true,
        (Annotation::Str, Value::Str(_)) => true,
        (Annotation::Array(shape), Value::Array(arr)) => match shape.check(arr) {
            Ok(()) => true,
            Err(err) => {
                *reason = Some(err.to_string());
                false
            }
        },
        (Annotation::List(elem), Value::List(items)) => {
            items.iter().all(|item| matches(elem, item, reason))
        }
        (Annotation::Optional(_), Value::None) => true,
        (Annotation::Optional(inner), _) => matches(inner, value, reason),
        (Annotation::Union(arms), _) => arms
            .iter()
            .any(|arm| transactional(|| matches(arm, value, reason))),
        (Annotation::Named(want), Value::Object(class)) => want == class,
        (Annotation::TypeOf(args), Value::Class(class)) => match args.as_slice() {
            [Annotation::Any] => true,
            [Annotation::Named(want)] => want == class,
            _ => false,
        },
        _ => false,
    }
}

/// Declared parameter and return annotations of a plain callable.
#[derive(Clone, Debug)]
pub struct Signature {
    params: Vec<(String, Annotation)>,
    returns: Annotation,
}

impl Default for Signature {
    fn default() -> Self {
        Self::new()
    }
}

impl Signature {
    pub fn new() -> Self {
        Self {
            params: Vec::new(),
            returns: Annotation::Any,
        }
    }

    pub fn param(mut self, name: impl Into<String>, annotation: Annotation) -> Self {
        self.params.push((name.into(), annotation));
        self
    }

    pub fn returns(mut self, annotation: Annotation) -> Self {
        self.returns = annotation;
        self
    }

    pub fn params(&self) -> &[(String, Annotation)] {
        &self.params
    }

    /// Checks arguments in declaration order, stopping at the first mismatch.
    pub fn check_args(&self, checker: &dyn TypeChecker, args: &[Value]) -> Result<(), TypeMismatch> {
        if args.len() != self.params.len() {
            return Err(TypeMismatch {
                param: "<arguments>".to_string(),
                expected: format!("{} arguments", self.params.len()),
                found: format!("{} arguments", args.len()),
                reason: None,
            });
        }
        for ((name, annotation), value) in self.params.iter().zip(args) {
            checker.check(&Param::new(name, annotation), value)?;
        }
        Ok(())
    }

    pub fn check_return(&self, checker: &dyn TypeChecker, value: &Value) -> Result<(), TypeMismatch> {
        checker.check(&Param::new("return", &self.returns), value)
    }
}

/// Guards `body` with argument and return checks against `signature`.
///
/// The checks run in whatever binding context is current when the result is
/// called; wrap the result to give every call its own context.
pub fn typechecked(
    name: impl Into<Arc<str>>,
    signature: Signature,
    checker: Arc<dyn TypeChecker>,
    body: impl Fn(Vec<Value>) -> Value + Send + Sync + 'static,
) -> Function<Vec<Value>, Result<Value, TypeMismatch>> {
    Function::new(name, move |args: Vec<Value>| -> Result<Value, TypeMismatch> {
        signature.check_args(checker.as_ref(), &args)?;
        let out = body(args);
        signature.check_return(checker.as_ref(), &out)?;
        Ok(out)
    })
}
