use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tracing::info;

use crate::config::DatabaseConfig;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id          CHAR(36)     NOT NULL PRIMARY KEY,
        name        VARCHAR(255) NOT NULL,
        department  VARCHAR(255) NOT NULL,
        password    VARCHAR(255) NOT NULL,
        created_at  DATETIME(6)  NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
        updated_at  DATETIME(6)  NOT NULL DEFAULT CURRENT_TIMESTAMP(6) ON UPDATE CURRENT_TIMESTAMP(6)
    )
"#;

pub async fn init_db(database: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPoolOptions::new()
        .max_connections(database.max_connections)
        .connect_with(database.connect_options())
        .await?;

    if database.synchronize {
        sqlx::query(CREATE_USERS_TABLE).execute(&pool).await?;
        info!(database = %database.name, "users table ready");
    }

    Ok(pool)
}
