#![forbid(unsafe_code)]

use std::fmt;
use std::sync::Arc;

use crate::annotation::Value;
use crate::class::Class;
use crate::error::{ConstructError, WrapError};
use crate::function::Function;
use crate::wrap::Wrap;

/// Reflection over a constructed record instance.
pub trait Record {
    /// The object's final class.
    fn class(&self) -> &Arc<Class>;

    /// Current value of `name`, or `None` while the field is unset.
    fn field(&self, name: &str) -> Option<Value>;

    fn field_names(&self) -> Vec<String> {
        self.class()
            .fields()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

/// Whether an initializer runs as the construction itself or on behalf of a
/// more-derived class's initializer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitCall {
    Outermost,
    Delegated,
}

pub type Initializer<T, A> = Function<(A, InitCall), Result<T, ConstructError>>;

/// A class together with the initializer that builds its instances.
pub struct Constructor<T, A> {
    class: Arc<Class>,
    init: Initializer<T, A>,
}

impl<T, A> Clone for Constructor<T, A> {
    fn clone(&self) -> Self {
        Self {
            class: Arc::clone(&self.class),
            init: self.init.clone(),
        }
    }
}

impl<T, A> fmt::Debug for Constructor<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("class", &self.class.name())
            .field("init", &self.init)
            .finish()
    }
}

impl<T: 'static, A: 'static> Constructor<T, A> {
    /// `init` is the build phase only: it assigns fields and may delegate to a
    /// parent constructor, nothing else.
    pub fn new(
        class: Arc<Class>,
        init: impl Fn(A) -> Result<T, ConstructError> + Send + Sync + 'static,
    ) -> Self {
        let name = format!("{}::init", class.name());
        Self {
            class,
            init: Function::new(name, move |(args, _call): (A, InitCall)| init(args)),
        }
    }

    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    pub fn initializer(&self) -> &Initializer<T, A> {
        &self.init
    }

    pub(crate) fn with_initializer(self, init: Initializer<T, A>) -> Self {
        Self {
            class: self.class,
            init,
        }
    }

    /// Builds an instance as the outermost construction.
    pub fn construct(&self, args: A) -> Result<T, ConstructError> {
        self.init.call((args, InitCall::Outermost))
    }

    /// Builds an instance on behalf of a subclass initializer.
    pub fn delegate(&self, args: A) -> Result<T, ConstructError> {
        self.init.call((args, InitCall::Delegated))
    }
}

impl<T: 'static, A: 'static> Wrap for Constructor<T, A> {
    fn wrap(self) -> Result<Self, WrapError> {
        if !self.class.is_record() {
            return Err(WrapError::PlainClass {
                class: self.class.name().to_string(),
            });
        }
        tracing::debug!(class = %self.class.name(), "scoping record initializer");
        let init = self.init.clone().wrap()?;
        Ok(self.with_initializer(init))
    }
}
