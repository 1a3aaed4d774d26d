//! OU membership checks for AWS Organizations.
//!
//! Answers "does this account live under any of these OUs (or the root)?"
//! by walking the account's ancestor chain one `ListParents` call at a time.
//! Each account -> parent lookup is cached (LRU eviction plus TTL), so
//! checking many accounts against overlapping OU sets stays cheap.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::collections::HashSet;
//! use std::sync::Arc;
//!
//! use ou_membership::{CacheConfig, OuMembershipChecker};
//! use ou_membership_client::DefaultClientProvider;
//!
//! let provider = Arc::new(DefaultClientProvider::new());
//! let checker = OuMembershipChecker::new(provider, CacheConfig::default());
//!
//! let targets: HashSet<String> = ["ou-abcd-11111111".to_string()].into_iter().collect();
//! let hit = checker.is_in_any_ou_or_descendant("111122223333", &targets).await?;
//! ```

mod cache;
mod checker;
mod error;

pub use cache::{CacheConfig, CacheStats, ParentCache, DEFAULT_MAX_ENTRIES, DEFAULT_TTL};
pub use checker::OuMembershipChecker;
pub use error::{Error, Result};
