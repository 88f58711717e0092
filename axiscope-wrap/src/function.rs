#![forbid(unsafe_code)]

use std::fmt;
use std::sync::Arc;

use crate::error::WrapError;
use crate::registry;
use crate::wrap::Wrap;

pub type Body<A, R> = Arc<dyn Fn(A) -> R + Send + Sync>;

/// A named, type-erased plain callable.
///
/// Several arguments travel as a tuple. Clones share the same body, and the
/// body's address is the callable's identity.
pub struct Function<A, R> {
    name: Arc<str>,
    body: Body<A, R>,
}

impl<A, R> Clone for Function<A, R> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            body: Arc::clone(&self.body),
        }
    }
}

impl<A, R> fmt::Debug for Function<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<A: 'static, R: 'static> Function<A, R> {
    pub fn new(name: impl Into<Arc<str>>, body: impl Fn(A) -> R + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            body: Arc::new(body),
        }
    }

    pub fn call(&self, args: A) -> R {
        (self.body)(args)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }

    /// Whether this callable was produced by [`Wrap::wrap`].
    pub fn is_scoped(&self) -> bool {
        registry::contains(&self.body)
    }
}

impl<A: 'static, R: 'static> Wrap for Function<A, R> {
    fn wrap(self) -> Result<Self, WrapError> {
        let name = self.name;
        let label = Arc::clone(&name);
        let body = registry::scope_once(self.body, move |inner| -> Body<A, R> {
            tracing::debug!(function = %label, "scoping plain callable");
            Arc::new(move |args: A| {
                tracing::trace!(function = %label, "entering scoped call");
                axiscope_scope::scoped(|| inner(args))
            })
        });
        Ok(Self { name, body })
    }
}
