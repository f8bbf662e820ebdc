//! Error types for the core library.

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
///
/// Every variant is a deterministic precondition violation; none of them is
/// transient, so retrying the same call cannot succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A node with this id is already a ring member.
    #[error("node already exists: {0}")]
    AlreadyExists(String),
    /// No ring member has this id.
    #[error("node not found: {0}")]
    NotFound(String),
    /// A key was resolved against a ring with no members.
    #[error("no nodes available in the ring")]
    EmptyRing,
    /// An argument was outside its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}
