//! Error types shared across the squall crates.
//!
//! Errors come in two tiers. Validation errors (`SquallError::new`) are
//! catalog-author-facing: a signature with an invalid shape is rejected and
//! the caller may continue with other signatures. Internal errors
//! (`SquallError::internal`) indicate a broken invariant, like a malformed
//! wire message or a misused constructor, and should be surfaced rather than
//! skipped.

use std::error::Error;
use std::fmt;

pub type Result<T, E = SquallError> = std::result::Result<T, E>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A user- or catalog-author-facing validation failure.
    Invalid,
    /// A "should never happen" invariant violation.
    Internal,
}

#[derive(Debug)]
pub struct SquallError {
    kind: ErrorKind,
    msg: String,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl SquallError {
    /// Create a new validation error.
    pub fn new(msg: impl Into<String>) -> Self {
        SquallError {
            kind: ErrorKind::Invalid,
            msg: msg.into(),
            source: None,
        }
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        SquallError {
            kind: ErrorKind::Internal,
            msg: msg.into(),
            source: None,
        }
    }

    pub fn with_source(msg: impl Into<String>, source: Box<dyn Error + Send + Sync>) -> Self {
        SquallError {
            kind: ErrorKind::Invalid,
            msg: msg.into(),
            source: Some(source),
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self.kind, ErrorKind::Internal)
    }
}

impl fmt::Display for SquallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_internal() {
            write!(f, "internal error: {}", self.msg)
        } else {
            write!(f, "{}", self.msg)
        }
    }
}

impl Error for SquallError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|s| s.as_ref() as _)
    }
}

/// Extend `Result` with methods for wrapping foreign errors with context.
pub trait ResultExt<T, E> {
    /// Wrap an error with a static context message.
    fn context(self, msg: &'static str) -> Result<T>;

    /// Wrap an error with a lazily computed context message.
    fn context_fn(self, f: impl FnOnce() -> String) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for Result<T, E>
where
    E: Error + Send + Sync + 'static,
{
    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| SquallError::with_source(msg, Box::new(e)))
    }

    fn context_fn(self, f: impl FnOnce() -> String) -> Result<T> {
        self.map_err(|e| SquallError::with_source(f(), Box::new(e)))
    }
}

/// Extend `Option` for decoding paths where a value's absence means the
/// producer broke the contract.
pub trait OptionExt<T> {
    /// Unwrap an option, returning an internal error mentioning `field` if
    /// the value is missing.
    fn required(self, field: &'static str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn required(self, field: &'static str) -> Result<T> {
        match self {
            Some(v) => Ok(v),
            None => Err(SquallError::internal(format!("missing field: {field}"))),
        }
    }
}
