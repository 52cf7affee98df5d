use thiserror::Error;

/// Reasons a [`Cursor`][crate::Cursor] can't be dereferenced.
///
/// Lookups never fail: a missing key resolves to the end cursor. Only reading the key under a
/// cursor that doesn't name a live element is an error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The cursor is the end position (or was built by `Cursor::default`).
    #[error("cursor is past the end of the container")]
    OutOfBounds,
    /// The cursor names a node that has since been removed, or that belongs to another container.
    #[error("cursor refers to a node that is no longer in this container")]
    StaleCursor,
}

/// Shorthand for results whose error is [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
