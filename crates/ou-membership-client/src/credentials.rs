//! Temporary session credentials returned by an assume-role call.

use chrono::{DateTime, Utc};

use crate::error::ClientError;

/// Temporary credentials issued by STS.
///
/// Immutable once issued; a refresh produces a new value rather than
/// mutating this one.
#[derive(Clone)]
pub struct SessionCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    /// When these credentials stop being valid.
    pub expiration: DateTime<Utc>,
}

impl SessionCredentials {
    /// Whether the credentials are expired as of `now`.
    ///
    /// The comparison is strict: credentials whose expiration equals `now`
    /// are already unusable.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiration
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .field("expiration", &self.expiration)
            .finish()
    }
}

impl TryFrom<&aws_sdk_sts::types::Credentials> for SessionCredentials {
    type Error = ClientError;

    fn try_from(creds: &aws_sdk_sts::types::Credentials) -> Result<Self, ClientError> {
        let exp = creds.expiration();
        let expiration = DateTime::from_timestamp(exp.secs(), exp.subsec_nanos())
            .ok_or_else(|| ClientError::InvalidExpiration(exp.to_string()))?;

        Ok(Self {
            access_key_id: creds.access_key_id().to_string(),
            secret_access_key: creds.secret_access_key().to_string(),
            session_token: creds.session_token().to_string(),
            expiration,
        })
    }
}
