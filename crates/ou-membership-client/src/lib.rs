//! Client provisioning for AWS Organizations lookups.
//!
//! Produces ready-to-use Organizations clients either from the ambient
//! credential chain or by assuming an IAM role via STS. Assumed sessions are
//! cached and re-assumed lazily, only once their credentials expire.
//!
//! # Components
//!
//! - [`api`] — trait seams over the STS and Organizations SDK clients
//! - [`credentials`] — temporary session credentials and expiry checks
//! - [`clock`] — injectable "now in UTC" time source
//! - [`provider`] — the default-session and assume-role client providers

pub mod api;
pub mod clock;
pub mod credentials;
pub mod error;
pub mod provider;

pub use api::{AwsOrganizationsClient, AwsStsClient, OrganizationsApi, Parent, ParentKind, StsApi};
pub use clock::{Clock, ManualClock, SystemClock};
pub use credentials::SessionCredentials;
pub use error::{ClientError, Result};
pub use provider::{AssumeRoleClientProvider, ClientProvider, DefaultClientProvider};

/// Region type used when building clients from explicit credentials.
pub use aws_config::Region;
