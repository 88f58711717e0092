#![forbid(unsafe_code)]

use crate::error::WrapError;
use crate::function::Function;
use crate::wrap::Wrap;

/// How a method receives its first argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodKind {
    /// Bound to an instance.
    Instance,
    /// Bound to the class itself.
    Class,
    /// Not bound at all.
    Static,
}

/// A function exposed through a method envelope.
#[derive(Debug)]
pub struct Method<A, R> {
    kind: MethodKind,
    func: Function<A, R>,
}

impl<A, R> Clone for Method<A, R> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            func: self.func.clone(),
        }
    }
}

impl<A: 'static, R: 'static> Method<A, R> {
    pub fn new(kind: MethodKind, func: Function<A, R>) -> Self {
        Self { kind, func }
    }

    pub fn kind(&self) -> MethodKind {
        self.kind
    }

    pub fn function(&self) -> &Function<A, R> {
        &self.func
    }

    pub fn call(&self, args: A) -> R {
        self.func.call(args)
    }
}

impl<A: 'static, R: 'static> Wrap for Method<A, R> {
    fn wrap(self) -> Result<Self, WrapError> {
        Ok(Self {
            kind: self.kind,
            func: self.func.wrap()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_keeps_the_envelope() {
        for kind in [MethodKind::Instance, MethodKind::Class, MethodKind::Static] {
            let m = Method::new(kind, Function::new("m", |()| axiscope_scope::depth()));
            let m = m.wrap().expect("wrap");
            assert_eq!(m.kind(), kind);
            assert!(m.function().is_scoped());
            assert_eq!(m.call(()), 1);
        }
    }
}
