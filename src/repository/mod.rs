use async_trait::async_trait;

use crate::error::AppResult;
use crate::model::user::{NewUser, User};

#[cfg(test)]
pub mod memory;
pub mod mysql;

/// Persistence access the user service depends on.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user, in whatever order the store returns them.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// Store a new row; the store assigns `id` and the timestamps.
    async fn insert(&self, user: NewUser) -> AppResult<User>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete(&self, id: &str) -> AppResult<bool>;
}
