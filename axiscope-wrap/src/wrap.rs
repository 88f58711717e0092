#![forbid(unsafe_code)]

use crate::error::WrapError;

/// Attaches binding-context scoping to a callable shape.
///
/// Implementations recurse into their constituent callables and rebuild the
/// same shape around them, so a method stays a method of the same kind and a
/// property keeps exactly the accessors it had. Wrapping something that is
/// already wrapped returns it unchanged.
pub trait Wrap: Sized {
    fn wrap(self) -> Result<Self, WrapError>;
}

pub fn wrap<T: Wrap>(target: T) -> Result<T, WrapError> {
    target.wrap()
}
