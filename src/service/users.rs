use std::sync::Arc;

use tracing::info;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::model::user::{NewUser, User};
use crate::repository::UserRepository;

/// Lifecycle operations of the user resource.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    password_secret: Arc<[u8]>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, password_secret: &str) -> Self {
        Self {
            repository,
            password_secret: Arc::from(password_secret.as_bytes()),
        }
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.find_all().await
    }

    pub async fn get_user(&self, id: &str) -> AppResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    /// Input must already be validated; only the password is transformed.
    pub async fn create_user(&self, input: NewUser) -> AppResult<User> {
        let password = hash_password(&input.password, &self.password_secret)?;

        let user = self
            .repository
            .insert(NewUser { password, ..input })
            .await?;

        info!(user_id = %user.id, department = %user.department, "Created user");
        Ok(user)
    }

    /// A missing user is not an error here, unlike `get_user`.
    pub async fn delete_user(&self, id: &str) -> AppResult<Option<User>> {
        let Some(user) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        self.repository.delete(&user.id).await?;

        info!(user_id = %user.id, "Deleted user");
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::verify_password;
    use crate::repository::memory::{FailingUserRepository, InMemoryUserRepository};

    const SECRET: &str = "test-secret";

    fn service() -> (UserService, Arc<InMemoryUserRepository>) {
        let repository = Arc::new(InMemoryUserRepository::new());
        (UserService::new(repository.clone(), SECRET), repository)
    }

    fn new_user(name: &str, department: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            department: department.to_string(),
            password: "secret1".to_string(),
        }
    }

    #[actix_web::test]
    async fn create_assigns_id_and_stores_a_hash() {
        let (service, _) = service();

        let user = service.create_user(new_user("Alice", "Eng")).await.unwrap();

        assert!(!user.id.is_empty());
        assert_eq!(user.name, "Alice");
        assert_eq!(user.department, "Eng");
        assert_ne!(user.password, "secret1");
        assert!(verify_password("secret1", &user.password, SECRET.as_bytes()));
    }

    #[actix_web::test]
    async fn list_includes_created_user_once() {
        let (service, _) = service();
        service.create_user(new_user("Alice", "Eng")).await.unwrap();
        service.create_user(new_user("Bob", "Ops")).await.unwrap();

        let users = service.list_users().await.unwrap();

        assert_eq!(users.len(), 2);
        let alices: Vec<_> = users.iter().filter(|u| u.name == "Alice").collect();
        assert_eq!(alices.len(), 1);
        assert_eq!(alices[0].department, "Eng");
    }

    #[actix_web::test]
    async fn get_unknown_id_is_not_found() {
        let (service, _) = service();

        let err = service.get_user("does-not-exist").await.unwrap_err();

        assert!(matches!(err, AppError::UserNotFound));
        assert_eq!(err.to_string(), "Could not find the user.");
    }

    #[actix_web::test]
    async fn delete_unknown_id_returns_none() {
        let (service, _) = service();

        let deleted = service.delete_user("does-not-exist").await.unwrap();

        assert!(deleted.is_none());
    }

    #[actix_web::test]
    async fn delete_returns_last_state_then_get_fails() {
        let (service, repository) = service();
        let created = service.create_user(new_user("Alice", "Eng")).await.unwrap();

        let deleted = service.delete_user(&created.id).await.unwrap();

        assert_eq!(deleted, Some(created.clone()));
        assert_eq!(repository.len(), 0);
        assert!(matches!(
            service.get_user(&created.id).await,
            Err(AppError::UserNotFound)
        ));
        assert!(service.delete_user(&created.id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn store_failures_propagate_unchanged() {
        let service = UserService::new(Arc::new(FailingUserRepository), SECRET);

        assert!(matches!(
            service.list_users().await,
            Err(AppError::Store(sqlx::Error::PoolTimedOut))
        ));
        assert!(matches!(
            service.get_user("x").await,
            Err(AppError::Store(_))
        ));
        assert!(matches!(
            service.create_user(new_user("Alice", "Eng")).await,
            Err(AppError::Store(_))
        ));
        assert!(matches!(
            service.delete_user("x").await,
            Err(AppError::Store(_))
        ));
    }
}
