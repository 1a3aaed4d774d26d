//! Error types for client provisioning.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while provisioning an Organizations client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// STS rejected or failed the assume-role call.
    #[error("Assume-role failed: {0}")]
    AssumeRole(String),

    /// The assume-role response carried no credentials.
    #[error("Assume-role response contained no credentials")]
    MissingCredentials,

    /// The credential expiration timestamp could not be interpreted.
    #[error("Invalid credential expiration: {0}")]
    InvalidExpiration(String),

    /// AWS Organizations API error.
    #[error("Organizations error: {0}")]
    Api(String),
}
