use thiserror::Error;

/// Canonical result for sequence queries.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Sequence contains no elements")]
    NoElements,

    #[error("Sequence contains no matching element")]
    NoMatch,

    #[error("Sequence contains more than one element")]
    MoreThanOneElement,

    #[error("Sequence contains more than one matching element")]
    MoreThanOneMatch,

    #[error("Index {0} is out of range")]
    IndexOutOfRange(usize),

    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    // Cursor misuse: reading `current` before the first advance, after
    // exhaustion, or after close.
    #[error("Cursor is not positioned on an element")]
    InvalidState,
}
