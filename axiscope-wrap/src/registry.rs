#![forbid(unsafe_code)]

//! Process-wide set of callables already produced by the wrapper.
//!
//! Entries are keyed by the address of the callable's shared body and hold
//! only a `Weak`, so membership never keeps a callable alive. An entry whose
//! callable has been dropped stops counting as a member right away and is
//! pruned on the next insert.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError, Weak};

trait Liveness: Send + Sync {
    fn is_alive(&self) -> bool;
}

impl<T: ?Sized + Send + Sync> Liveness for Weak<T> {
    fn is_alive(&self) -> bool {
        self.strong_count() > 0
    }
}

static WRAPPED: LazyLock<Mutex<HashMap<usize, Box<dyn Liveness>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn lock() -> MutexGuard<'static, HashMap<usize, Box<dyn Liveness>>> {
    WRAPPED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key<F: ?Sized>(f: &Arc<F>) -> usize {
    Arc::as_ptr(f).cast::<()>() as usize
}

pub(crate) fn contains<F: ?Sized>(f: &Arc<F>) -> bool {
    lock().get(&key(f)).is_some_and(|entry| entry.is_alive())
}

pub(crate) fn insert<F: ?Sized + Send + Sync + 'static>(f: &Arc<F>) {
    let mut map = lock();
    map.retain(|_, entry| entry.is_alive());
    map.insert(key(f), Box::new(Arc::downgrade(f)));
}

/// Returns `f` itself when it is already a wrapper, otherwise the wrapper
/// built by `make`, registered before it is handed out.
pub(crate) fn scope_once<F>(f: Arc<F>, make: impl FnOnce(Arc<F>) -> Arc<F>) -> Arc<F>
where
    F: ?Sized + Send + Sync + 'static,
{
    if contains(&f) {
        tracing::debug!("callable is already scoped; returning it unchanged");
        return f;
    }
    let wrapped = make(f);
    insert(&wrapped);
    wrapped
}
