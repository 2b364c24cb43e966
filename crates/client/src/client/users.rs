//! User API operations.

use super::UserbaseClient;
use crate::error::Result;
use userbase_core::storage::SearchResult;
use userbase_core::user::{User, UserFilter, UserPatch};

fn user_path(id: &str) -> String {
    format!("/users/{}", urlencoding::encode(id))
}

impl UserbaseClient {
    /// Get user by ID.
    pub async fn get_user(&self, id: &str) -> Result<User> {
        let response = self.client.get(self.url(&user_path(id))).send().await?;
        self.handle_response(response, &format!("User {id}")).await
    }

    /// Create a new user. An empty id lets the server generate one.
    pub async fn create_user(&self, user: &User) -> Result<User> {
        let response = self
            .client
            .post(self.url("/users"))
            .json(user)
            .send()
            .await?;
        self.handle_response(response, "User").await
    }

    /// Replace every field of an existing user.
    pub async fn update_user(&self, user: &User) -> Result<User> {
        let response = self
            .client
            .put(self.url(&user_path(&user.id)))
            .json(user)
            .send()
            .await?;
        self.handle_response(response, &format!("User {}", user.id))
            .await
    }

    /// Change only the fields present in the patch.
    pub async fn patch_user(&self, patch: &UserPatch) -> Result<UserPatch> {
        let response = self
            .client
            .patch(self.url(&user_path(&patch.id)))
            .json(patch)
            .send()
            .await?;
        self.handle_response(response, &format!("User {}", patch.id))
            .await
    }

    /// Delete user by ID. Returns the number of deleted rows.
    pub async fn delete_user(&self, id: &str) -> Result<u64> {
        let response = self.client.delete(self.url(&user_path(id))).send().await?;
        self.handle_response(response, &format!("User {id}")).await
    }

    /// Search users.
    pub async fn search_users(&self, filter: &UserFilter) -> Result<SearchResult<User>> {
        let response = self
            .client
            .get(self.url("/users/search"))
            .query(filter)
            .send()
            .await?;
        self.handle_response(response, "Users").await
    }
}
