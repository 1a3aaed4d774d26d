//! Error types for membership checks.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving an account's ancestor chain.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service reported more than one parent for a single account.
    ///
    /// The organization tree is single-parent; multiple parents mean an
    /// unsupported hierarchy or a corrupted response, never something to
    /// resolve by picking one.
    #[error("Account {account_id} has {count} parents, expected exactly one")]
    AmbiguousParent { account_id: String, count: usize },

    /// The service reported no parent for a non-root account.
    #[error("Account {0} has no parent")]
    MissingParent(String),

    /// Failure from the client layer (assume-role or Organizations call).
    #[error(transparent)]
    Client(#[from] ou_membership_client::ClientError),
}
