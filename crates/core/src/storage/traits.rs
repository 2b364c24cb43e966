use async_trait::async_trait;

use crate::user::{User, UserFilter, UserPatch};

use super::{Result, SearchResult};

/// Service for user operations.
///
/// Mutations return the number of affected rows: `0` means no user matched
/// the id. Implementations run every mutation inside a single transaction
/// and leave no partial write behind when they return an error.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Gets a user by id. Returns `None` when the user does not exist.
    async fn load(&self, id: &str) -> Result<Option<User>>;

    /// Inserts a new user.
    async fn create(&self, user: &User) -> Result<u64>;

    /// Replaces every non-id field of an existing user.
    async fn update(&self, user: &User) -> Result<u64>;

    /// Changes only the fields present in the patch.
    async fn patch(&self, patch: &UserPatch) -> Result<u64>;

    /// Deletes a user by id.
    async fn delete(&self, id: &str) -> Result<u64>;

    /// Lists users matching the filter.
    async fn search(&self, filter: &UserFilter) -> Result<SearchResult<User>>;
}
