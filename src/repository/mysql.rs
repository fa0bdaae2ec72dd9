use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::model::user::{NewUser, User};
use crate::repository::UserRepository;

const SELECT_USERS: &str = r#"
    SELECT id, name, department, password, created_at, updated_at
    FROM users
"#;

#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(SELECT_USERS)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let sql = format!("{SELECT_USERS} WHERE id = ?");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO users (id, name, department, password)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&user.name)
        .bind(&user.department)
        .bind(&user.password)
        .execute(&self.pool)
        .await?;

        debug!(user_id = %id, "Inserted user row");

        // read back the store-assigned timestamps
        self.find_by_id(&id)
            .await?
            .ok_or(AppError::Store(sqlx::Error::RowNotFound))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
