//! Crate-wide error type.

/// Errors raised by this crate.
///
/// The graph engines themselves never return [`Error::InvalidState`] in
/// normal operation (they tick a node only on the branch that would
/// otherwise leave it unlabeled), but the check lives at the node's label
/// setter, not in the caller's head.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A label was assigned to a node that has already been ticked.
    #[error("cannot assign a label to a node that has already been ticked")]
    InvalidState,

    /// A conflict-list input could not be parsed.
    #[error("failed to parse conflict list: {0}")]
    Parse(String),
}

/// Convenience alias for a `Result` using this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
