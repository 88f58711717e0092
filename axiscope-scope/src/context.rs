#![forbid(unsafe_code)]

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

/// Concrete size bound to an axis name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AxisSize {
    Single(usize),
    /// Consecutive dimensions matched by one variadic axis.
    Multi(Vec<usize>),
}

impl AxisSize {
    pub fn display(&self) -> String {
        match self {
            AxisSize::Single(n) => n.to_string(),
            AxisSize::Multi(dims) => {
                let dims_s = dims
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("({dims_s})")
            }
        }
    }
}

/// Opaque memo slot owned by whichever shape matcher is plugged in.
///
/// Entries are keyed by string and downcast on read; the scope manager never
/// looks inside.
#[derive(Default)]
pub struct Memo {
    map: HashMap<String, Box<dyn Any>>,
}

impl Memo {
    pub fn insert<T: Any>(&mut self, key: impl Into<String>, v: T) {
        self.map.insert(key.into(), Box::new(v));
    }

    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.map.get(key).and_then(|b| b.downcast_ref::<T>())
    }

    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.map.get_mut(key).and_then(|b| b.downcast_mut::<T>())
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.map.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for Memo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.map.keys()).finish()
    }
}

/// Bindings recorded during one dynamic extent.
///
/// The triple is fixed: the axis map read and written by shape checks, plus
/// two memo slots reserved for the matcher's own caching. All three are
/// discarded together when the context is popped.
#[derive(Debug, Default)]
pub struct BindingContext {
    axes: HashMap<String, AxisSize>,
    memo: Memo,
    aux_memo: Memo,
}

impl BindingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis(&self, name: &str) -> Option<&AxisSize> {
        self.axes.get(name)
    }

    /// Binds `name`, returning the size it was bound to before, if any.
    pub fn bind(&mut self, name: impl Into<String>, size: AxisSize) -> Option<AxisSize> {
        self.axes.insert(name.into(), size)
    }

    pub fn axes(&self) -> &HashMap<String, AxisSize> {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut HashMap<String, AxisSize> {
        &mut self.axes
    }

    pub fn memo(&self) -> &Memo {
        &self.memo
    }

    pub fn memo_mut(&mut self) -> &mut Memo {
        &mut self.memo
    }

    pub fn aux_memo(&self) -> &Memo {
        &self.aux_memo
    }

    pub fn aux_memo_mut(&mut self) -> &mut Memo {
        &mut self.aux_memo
    }
}
