//! Directory port for user profiles.

use super::BoardStoreResult;
use crate::board::domain::{EmailAddress, Profile, UserId};
use async_trait::async_trait;

/// User directory contract.
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Inserts or replaces the profile for its user.
    async fn upsert_profile(&self, profile: &Profile) -> BoardStoreResult<()>;

    /// Finds the profile of a user.
    async fn find_profile(&self, user_id: UserId) -> BoardStoreResult<Option<Profile>>;

    /// Finds the profile registered under an email address.
    async fn find_profile_by_email(
        &self,
        email: &EmailAddress,
    ) -> BoardStoreResult<Option<Profile>>;

    /// Returns up to `limit` profiles whose email starts with `prefix`,
    /// ordered by email.
    async fn search_profiles_by_email_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> BoardStoreResult<Vec<Profile>>;
}
