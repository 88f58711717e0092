#![forbid(unsafe_code)]

//! Thread-local, stack-structured store of axis-name bindings.
//!
//! Every scoped call pushes a fresh [`BindingContext`] on entry and pops it on
//! every exit path. Shape checks only ever consult the top context, so a
//! nested scoped call sees an empty world and its caller's bindings come back
//! untouched once it returns.

pub mod config;
mod context;
mod error;
mod stack;

pub use context::{AxisSize, BindingContext, Memo};
pub use error::ScopeError;
pub use stack::{
    ScopeGuard, current_context, depth, enter, pop_context, push_context, scoped, transactional,
    with_context,
};
