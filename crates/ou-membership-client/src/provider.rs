//! Client providers: default-session and assume-role.
//!
//! A [`ClientProvider`] hands out ready-to-use Organizations clients. The
//! membership checker fetches a client from its provider before every remote
//! call, so the assume-role variant can transparently refresh credentials
//! between calls.

use std::sync::Arc;

use async_trait::async_trait;
use aws_config::Region;
use tokio::sync::RwLock;
use tracing::debug;

use crate::api::{AwsOrganizationsClient, OrganizationsApi, StsApi};
use crate::clock::{Clock, SystemClock};
use crate::credentials::SessionCredentials;
use crate::error::Result;

/// Region used to sign Organizations requests built from assumed
/// credentials. Organizations is a global service; any valid region works.
const DEFAULT_REGION: &str = "us-east-1";

/// Produces a ready-to-use Organizations client.
#[async_trait]
pub trait ClientProvider: Send + Sync {
    /// Get a client, refreshing any underlying credentials if needed.
    async fn get_client(&self) -> Result<Arc<dyn OrganizationsApi>>;
}

/// Provider backed by the ambient AWS credential chain.
///
/// The client is built once from the default provider chain and reused; the
/// SDK manages its own session underneath.
#[derive(Default)]
pub struct DefaultClientProvider {
    cached: RwLock<Option<Arc<dyn OrganizationsApi>>>,
}

impl DefaultClientProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientProvider for DefaultClientProvider {
    async fn get_client(&self) -> Result<Arc<dyn OrganizationsApi>> {
        {
            let cached = self.cached.read().await;
            if let Some(client) = cached.as_ref() {
                return Ok(Arc::clone(client));
            }
        }

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        let client: Arc<dyn OrganizationsApi> =
            Arc::new(AwsOrganizationsClient::from_sdk_config(&config));

        let mut cached = self.cached.write().await;
        *cached = Some(Arc::clone(&client));
        Ok(client)
    }
}

/// Cached assume-role state: the credentials and the client built from them.
struct CachedSession {
    credentials: SessionCredentials,
    client: Arc<dyn OrganizationsApi>,
}

/// Provider that assumes an IAM role and caches the resulting session until
/// its credentials expire.
///
/// Expiry is evaluated against the injected [`Clock`] on every call; there is
/// no background refresh. A call that finds expired credentials re-assumes
/// the role and supersedes the cached session with a new one.
pub struct AssumeRoleClientProvider {
    sts: Arc<dyn StsApi>,
    role_arn: String,
    session_name: String,
    /// Requested session lifetime. STS accepts 900-43200 seconds.
    duration_seconds: i32,
    region: Region,
    clock: Arc<dyn Clock>,
    session: RwLock<Option<CachedSession>>,
}

impl AssumeRoleClientProvider {
    pub fn new(
        sts: Arc<dyn StsApi>,
        role_arn: impl Into<String>,
        session_name: impl Into<String>,
        duration_seconds: i32,
    ) -> Self {
        Self {
            sts,
            role_arn: role_arn.into(),
            session_name: session_name.into(),
            duration_seconds,
            region: Region::new(DEFAULT_REGION),
            clock: Arc::new(SystemClock),
            session: RwLock::new(None),
        }
    }

    /// Region used when building clients from assumed credentials.
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Replace the time source (tests).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

#[async_trait]
impl ClientProvider for AssumeRoleClientProvider {
    async fn get_client(&self) -> Result<Arc<dyn OrganizationsApi>> {
        let now = self.clock.now_utc();

        {
            let session = self.session.read().await;
            if let Some(cached) = session.as_ref() {
                if !cached.credentials.is_expired(now) {
                    return Ok(Arc::clone(&cached.client));
                }
                debug!(role_arn = %self.role_arn, "Cached credentials expired, re-assuming role");
            }
        }

        let credentials = self
            .sts
            .assume_role(&self.role_arn, &self.session_name, self.duration_seconds)
            .await?;
        debug!(
            role_arn = %self.role_arn,
            expiration = %credentials.expiration,
            "Assumed role"
        );

        let client: Arc<dyn OrganizationsApi> = Arc::new(
            AwsOrganizationsClient::from_session_credentials(&credentials, self.region.clone()),
        );

        let mut session = self.session.write().await;
        *session = Some(CachedSession {
            credentials,
            client: Arc::clone(&client),
        });
        Ok(client)
    }
}
