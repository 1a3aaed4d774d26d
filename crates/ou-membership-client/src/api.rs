//! Trait seams over the AWS STS and Organizations clients.
//!
//! Providers and the membership checker talk to these traits; production
//! code wraps the real SDK clients, tests substitute hand-written fakes.

use async_trait::async_trait;
use aws_config::Region;
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_sdk_organizations::types::ParentType;

use crate::credentials::SessionCredentials;
use crate::error::{ClientError, Result};

/// Kind of parent container returned by a parent lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentKind {
    OrganizationalUnit,
    Root,
}

/// A parent container in the organization tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parent {
    pub id: String,
    pub kind: ParentKind,
}

impl Parent {
    /// Whether this parent is the organization root (has no parent itself).
    pub fn is_root(&self) -> bool {
        self.kind == ParentKind::Root
    }
}

/// Role-assumption capability of STS.
#[async_trait]
pub trait StsApi: Send + Sync {
    /// Assume `role_arn` for `duration_seconds`, returning temporary
    /// credentials. Failures are propagated as-is; no retries here.
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
        duration_seconds: i32,
    ) -> Result<SessionCredentials>;
}

/// The slice of the Organizations API the membership walk needs.
#[async_trait]
pub trait OrganizationsApi: Send + Sync {
    /// List the parents of `child_id`.
    ///
    /// Returns the raw zero-or-more entries; callers enforce the
    /// single-parent invariant.
    async fn list_parents(&self, child_id: &str) -> Result<Vec<Parent>>;
}

/// STS client backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct AwsStsClient {
    inner: aws_sdk_sts::Client,
}

impl AwsStsClient {
    pub fn new(inner: aws_sdk_sts::Client) -> Self {
        Self { inner }
    }

    /// Build a client from the ambient credential chain.
    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self {
            inner: aws_sdk_sts::Client::new(config),
        }
    }
}

#[async_trait]
impl StsApi for AwsStsClient {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
        duration_seconds: i32,
    ) -> Result<SessionCredentials> {
        let output = self
            .inner
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .duration_seconds(duration_seconds)
            .send()
            .await
            .map_err(|e| {
                ClientError::AssumeRole(aws_sdk_sts::error::DisplayErrorContext(&e).to_string())
            })?;

        let creds = output.credentials().ok_or(ClientError::MissingCredentials)?;
        SessionCredentials::try_from(creds)
    }
}

/// Organizations client backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct AwsOrganizationsClient {
    inner: aws_sdk_organizations::Client,
}

impl AwsOrganizationsClient {
    pub fn new(inner: aws_sdk_organizations::Client) -> Self {
        Self { inner }
    }

    /// Build a client from the ambient credential chain.
    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self {
            inner: aws_sdk_organizations::Client::new(config),
        }
    }

    /// Build a client signed with explicit temporary credentials.
    pub fn from_session_credentials(creds: &SessionCredentials, region: Region) -> Self {
        let provider = aws_credential_types::Credentials::new(
            creds.access_key_id.clone(),
            creds.secret_access_key.clone(),
            Some(creds.session_token.clone()),
            Some(std::time::SystemTime::from(creds.expiration)),
            "AssumeRoleClientProvider",
        );

        let conf = aws_sdk_organizations::Config::builder()
            .behavior_version(aws_sdk_organizations::config::BehaviorVersion::latest())
            .region(region)
            .credentials_provider(SharedCredentialsProvider::new(provider))
            .build();

        Self {
            inner: aws_sdk_organizations::Client::from_conf(conf),
        }
    }
}

#[async_trait]
impl OrganizationsApi for AwsOrganizationsClient {
    async fn list_parents(&self, child_id: &str) -> Result<Vec<Parent>> {
        let output = self
            .inner
            .list_parents()
            .child_id(child_id)
            .send()
            .await
            .map_err(|e| {
                ClientError::Api(
                    aws_sdk_organizations::error::DisplayErrorContext(&e).to_string(),
                )
            })?;

        output
            .parents()
            .iter()
            .map(|p| {
                let id = p
                    .id()
                    .ok_or_else(|| {
                        ClientError::Api(format!("Parent entry for {child_id} is missing an id"))
                    })?
                    .to_string();
                let kind = match p.r#type() {
                    Some(ParentType::Root) => ParentKind::Root,
                    _ => ParentKind::OrganizationalUnit,
                };
                Ok(Parent { id, kind })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_is_root() {
        let root = Parent {
            id: "r-abcd".to_string(),
            kind: ParentKind::Root,
        };
        let ou = Parent {
            id: "ou-abcd-11111111".to_string(),
            kind: ParentKind::OrganizationalUnit,
        };
        assert!(root.is_root());
        assert!(!ou.is_root());
    }
}
