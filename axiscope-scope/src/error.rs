#![forbid(unsafe_code)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("scope stack underflow: pop without a matching push on this thread")]
    #[diagnostic(
        code(axiscope::scope::underflow),
        help("binding contexts are popped by the guard that pushed them; do not pop them by hand")
    )]
    EmptyStack,
}
