#![forbid(unsafe_code)]

use std::fmt;
use std::sync::Arc;

use axiscope_scope::scoped;

use crate::error::{AccessError, WrapError};
use crate::registry;
use crate::wrap::Wrap;

pub type Getter<T, V> = Arc<dyn Fn(&T) -> V + Send + Sync>;
pub type Setter<T, V> = Arc<dyn Fn(&mut T, V) + Send + Sync>;
pub type Deleter<T> = Arc<dyn Fn(&mut T) + Send + Sync>;

/// A computed attribute: any subset of getter, setter and deleter.
pub struct Property<T, V> {
    name: Arc<str>,
    get: Option<Getter<T, V>>,
    set: Option<Setter<T, V>>,
    delete: Option<Deleter<T>>,
}

impl<T, V> Clone for Property<T, V> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            get: self.get.clone(),
            set: self.set.clone(),
            delete: self.delete.clone(),
        }
    }
}

impl<T, V> fmt::Debug for Property<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("get", &self.get.is_some())
            .field("set", &self.set.is_some())
            .field("delete", &self.delete.is_some())
            .finish()
    }
}

impl<T: 'static, V: 'static> Property<T, V> {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            get: None,
            set: None,
            delete: None,
        }
    }

    pub fn getter(mut self, get: impl Fn(&T) -> V + Send + Sync + 'static) -> Self {
        self.get = Some(Arc::new(get));
        self
    }

    pub fn setter(mut self, set: impl Fn(&mut T, V) + Send + Sync + 'static) -> Self {
        self.set = Some(Arc::new(set));
        self
    }

    pub fn deleter(mut self, delete: impl Fn(&mut T) + Send + Sync + 'static) -> Self {
        self.delete = Some(Arc::new(delete));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_getter(&self) -> bool {
        self.get.is_some()
    }

    pub fn has_setter(&self) -> bool {
        self.set.is_some()
    }

    pub fn has_deleter(&self) -> bool {
        self.delete.is_some()
    }

    /// True when every accessor present has been wrapped.
    pub fn is_scoped(&self) -> bool {
        self.get.as_ref().is_none_or(registry::contains)
            && self.set.as_ref().is_none_or(registry::contains)
            && self.delete.as_ref().is_none_or(registry::contains)
    }

    fn missing(&self, accessor: &'static str) -> AccessError {
        AccessError {
            property: self.name.to_string(),
            accessor,
        }
    }

    pub fn get(&self, this: &T) -> Result<V, AccessError> {
        let get = self.get.as_ref().ok_or_else(|| self.missing("getter"))?;
        Ok(get(this))
    }

    pub fn set(&self, this: &mut T, value: V) -> Result<(), AccessError> {
        let set = self.set.as_ref().ok_or_else(|| self.missing("setter"))?;
        set(this, value);
        Ok(())
    }

    pub fn delete(&self, this: &mut T) -> Result<(), AccessError> {
        let delete = self.delete.as_ref().ok_or_else(|| self.missing("deleter"))?;
        delete(this);
        Ok(())
    }
}

impl<T: 'static, V: 'static> Wrap for Property<T, V> {
    fn wrap(self) -> Result<Self, WrapError> {
        tracing::debug!(property = %self.name, "scoping property accessors");
        let get = self.get.map(|get| {
            registry::scope_once(get, |inner| -> Getter<T, V> {
                Arc::new(move |this: &T| scoped(|| inner(this)))
            })
        });
        let set = self.set.map(|set| {
            registry::scope_once(set, |inner| -> Setter<T, V> {
                Arc::new(move |this: &mut T, value: V| scoped(|| inner(this, value)))
            })
        });
        let delete = self.delete.map(|delete| {
            registry::scope_once(delete, |inner| -> Deleter<T> {
                Arc::new(move |this: &mut T| scoped(|| inner(this)))
            })
        });
        Ok(Self {
            name: self.name,
            get,
            set,
            delete,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Cell {
        value: Option<u32>,
        seen_depth: usize,
    }

    fn value_property() -> Property<Cell, u32> {
        Property::new("value")
            .getter(|c: &Cell| c.value.unwrap_or(0) + axiscope_scope::depth() as u32 * 100)
            .setter(|c: &mut Cell, v| {
                c.value = Some(v);
                c.seen_depth = axiscope_scope::depth();
            })
    }

    #[test]
    fn present_accessors_are_scoped_absent_stay_absent() {
        let prop = value_property().wrap().expect("wrap");
        assert!(prop.is_scoped());
        assert!(prop.has_getter() && prop.has_setter());
        assert!(!prop.has_deleter());

        let mut cell = Cell::default();
        prop.set(&mut cell, 7).expect("setter");
        assert_eq!(cell.seen_depth, 1);
        assert_eq!(prop.get(&cell).expect("getter"), 107);

        let err = prop.delete(&mut cell).unwrap_err();
        assert_eq!(err.accessor, "deleter");
        assert_eq!(err.to_string(), "property `value` has no deleter");
    }

    #[test]
    fn unwrapped_accessors_run_unscoped() {
        let prop = value_property();
        assert!(!prop.is_scoped());
        let mut cell = Cell::default();
        prop.set(&mut cell, 1).expect("setter");
        assert_eq!(cell.seen_depth, 0);
    }
}
