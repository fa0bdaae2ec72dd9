use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::model::common::Timestamps;
use crate::model::user::{NewUser, User};
use crate::repository::UserRepository;

/// Vec-backed store used in place of MySQL by the tests.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: user.name,
            department: user.department,
            password: user.password,
            timestamps: Timestamps {
                created_at: now,
                updated_at: now,
            },
        };

        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

/// Store whose every call fails, for checking error propagation.
pub struct FailingUserRepository;

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        Err(AppError::Store(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_id(&self, _id: &str) -> AppResult<Option<User>> {
        Err(AppError::Store(sqlx::Error::PoolTimedOut))
    }

    async fn insert(&self, _user: NewUser) -> AppResult<User> {
        Err(AppError::Store(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: &str) -> AppResult<bool> {
        Err(AppError::Store(sqlx::Error::PoolTimedOut))
    }
}
