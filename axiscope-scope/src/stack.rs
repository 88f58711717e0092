#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::marker::PhantomData;

use crate::context::BindingContext;
use crate::error::ScopeError;

// Each thread owns its own stack; nothing here is ever shared across threads.
thread_local! {
    static SCOPE_STACK: RefCell<Vec<BindingContext>> = const { RefCell::new(Vec::new()) };
}

/// Pushes a fresh, empty binding context onto this thread's stack.
pub fn push_context() {
    SCOPE_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.push(BindingContext::new());
        tracing::trace!(depth = stack.len(), "pushed binding context");
    });
}

/// Pops and returns the top binding context.
///
/// An empty stack means a pop without its push, which is a wrapper bug rather
/// than a recoverable condition; callers should treat the error as fatal.
pub fn pop_context() -> Result<BindingContext, ScopeError> {
    SCOPE_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let cx = stack.pop().ok_or(ScopeError::EmptyStack)?;
        tracing::trace!(depth = stack.len(), "popped binding context");
        Ok(cx)
    })
}

/// Number of binding contexts currently active on this thread.
pub fn depth() -> usize {
    SCOPE_STACK.with(|stack| stack.borrow().len())
}

/// Runs `f` against the top binding context.
///
/// Returns `None` without calling `f` when no scoped call is active on this
/// thread. `f` must not push or pop contexts itself.
pub fn current_context<R>(f: impl FnOnce(&mut BindingContext) -> R) -> Option<R> {
    SCOPE_STACK.with(|stack| stack.borrow_mut().last_mut().map(f))
}

/// Like [`current_context`], but falls back to a throwaway context when the
/// stack is empty. Bindings made in the fallback are dropped immediately, so
/// checks made outside any scoped call cannot ground axis names across calls.
pub fn with_context<R>(f: impl FnOnce(&mut BindingContext) -> R) -> R {
    SCOPE_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        match stack.last_mut() {
            Some(cx) => f(cx),
            None => f(&mut BindingContext::new()),
        }
    })
}

/// Runs `check` and restores the top context's axis bindings if it returns
/// `false`, so a failed composite check leaves no residue behind.
pub fn transactional(check: impl FnOnce() -> bool) -> bool {
    let snapshot = current_context(|cx| cx.axes().clone());
    let passed = check();
    if !passed {
        if let Some(axes) = snapshot {
            current_context(|cx| *cx.axes_mut() = axes);
        }
    }
    passed
}

/// Keeps one binding context pushed for as long as it lives.
///
/// The guard is `!Send`: it has to be dropped on the thread whose stack it
/// pushed onto.
#[must_use = "the binding context is popped as soon as the guard is dropped"]
pub struct ScopeGuard {
    depth: usize,
    _thread: PhantomData<*const ()>,
}

impl ScopeGuard {
    /// Stack depth including this guard's own context.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let unwinding = std::thread::panicking();
        if !unwinding {
            debug_assert_eq!(depth(), self.depth, "unbalanced binding contexts inside a scoped call");
        }
        if let Err(err) = pop_context() {
            tracing::error!(%err, expected_depth = self.depth, "scope stack underflow");
            if !unwinding {
                panic!("{err}");
            }
        }
    }
}

/// Pushes a binding context and returns the guard that pops it.
pub fn enter() -> ScopeGuard {
    push_context();
    ScopeGuard {
        depth: depth(),
        _thread: PhantomData,
    }
}

/// Runs `body` inside a fresh binding context.
///
/// The context is popped on every exit path, unwinding included, and the
/// body's result is passed through untouched.
pub fn scoped<R>(body: impl FnOnce() -> R) -> R {
    let _guard = enter();
    body()
}
