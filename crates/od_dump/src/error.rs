use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// The failure of a single member read.
///
/// Apart from [`ReadError::Denied`], read failures never abort a dump: the
/// engine renders them inline as `<failed to read: ...>` and moves on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReadError {
    #[error("{0}")]
    Failed(String),

    #[error("access denied: {0}")]
    Denied(String),

    #[error("member `{0}` has no getter")]
    Unreadable(&'static str),

    #[error("owner mismatch: expected `{expect}`, found `{actual}`")]
    Mismatch {
        expect: &'static str,
        actual: &'static str,
    },
}

/// The only failures a dump call surfaces to its caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DumpError {
    #[error("dump aborted by a denied member read: {0}")]
    Denied(String),

    #[error("failed to write dump output")]
    Write(#[from] core::fmt::Error),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistrationError {
    #[error("`{type_path}` is already registered with a different shadow or policy")]
    Conflict { type_path: &'static str },

    #[error("`{0}` is not an instantiation of a generic type")]
    NotGeneric(&'static str),
}
