//! Ancestor-walking OU membership checker.

use std::collections::HashSet;
use std::sync::Arc;

use ou_membership_client::{ClientProvider, Parent};
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::cache::{CacheConfig, CacheStats, ParentCache};
use crate::error::{Error, Result};

/// Checks whether accounts fall under a set of target OUs (or the root) by
/// walking the ancestor chain one parent at a time.
///
/// Intended for one logical caller at a time; the internal lock keeps the
/// cache consistent but does not de-duplicate concurrent remote lookups.
pub struct OuMembershipChecker {
    provider: Arc<dyn ClientProvider>,
    cache: Mutex<ParentCache>,
}

impl OuMembershipChecker {
    /// Create a checker over `provider` with the given cache settings.
    pub fn new(provider: Arc<dyn ClientProvider>, config: CacheConfig) -> Self {
        Self {
            provider,
            cache: Mutex::new(ParentCache::new(&config)),
        }
    }

    /// Resolve the parent of `account_id`, serving repeats from cache.
    ///
    /// The client is fetched from the provider on every remote lookup so the
    /// provider can refresh its credentials between calls. The service must
    /// report exactly one parent: zero or several is an invariant violation
    /// and fails the lookup.
    async fn get_parent(&self, account_id: &str) -> Result<Parent> {
        if let Some(parent) = self.cache.lock().await.get(account_id) {
            return Ok(parent);
        }

        let client = self.provider.get_client().await?;
        let mut parents = client.list_parents(account_id).await?;

        if parents.len() > 1 {
            return Err(Error::AmbiguousParent {
                account_id: account_id.to_string(),
                count: parents.len(),
            });
        }
        let parent = parents
            .pop()
            .ok_or_else(|| Error::MissingParent(account_id.to_string()))?;

        debug!(account_id = %account_id, parent_id = %parent.id, "Resolved parent");
        self.cache.lock().await.insert(account_id, parent.clone());
        Ok(parent)
    }

    /// Whether `account_id` sits under any of `targets` (OU ids or the root
    /// id), at any depth.
    ///
    /// Walks bottom-up from the account's immediate parent. Only ancestors
    /// are compared against `targets`, never `account_id` itself. Returns
    /// `false` once the root is reached without a match; errors from parent
    /// resolution propagate unchanged.
    pub async fn is_in_any_ou_or_descendant(
        &self,
        account_id: &str,
        targets: &HashSet<String>,
    ) -> Result<bool> {
        let mut current = account_id.to_string();

        loop {
            let parent = self.get_parent(&current).await?;
            trace!(child = %current, parent_id = %parent.id, "Visiting ancestor");

            if targets.contains(&parent.id) {
                debug!(
                    account_id = %account_id,
                    matched = %parent.id,
                    "Ancestor matched target set"
                );
                return Ok(true);
            }
            if parent.is_root() {
                return Ok(false);
            }
            current = parent.id;
        }
    }

    /// Statistics for the underlying parent cache.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.lock().await.stats()
    }
}
