use std::sync::Arc;

use actix_web::HttpServer;
use actix_web::web::Data;
use dotenvy::dotenv;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod repository;
mod routes;
mod service;
#[cfg(test)]
mod test_support;

use config::Config;
use db::init_db;

use crate::repository::UserRepository;
use crate::repository::mysql::MySqlUserRepository;
use crate::service::UserService;
use tracing::{error, info};
use tracing_appender::rolling;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(environment = %config.environment, "Server starting...");

    if let Err(e) = run(config).await {
        error!(error = %e, "Server error");
        return Err(e);
    }

    Ok(())
}

async fn run(config: Config) -> anyhow::Result<()> {
    let pool = init_db(&config.database).await?;

    let repository: Arc<dyn UserRepository> = Arc::new(MySqlUserRepository::new(pool));
    let service = Data::new(UserService::new(repository, &config.secret_key));

    let port = config.port;
    let development = config.is_development();
    let config = Data::new(config);

    let server = HttpServer::new(move || routes::app(config.clone(), service.clone()))
        .bind(("0.0.0.0", port))?;

    if development {
        info!("Server on http://localhost:{port}");
    } else {
        info!("Server on port {port}...");
    }

    server.run().await?;

    Ok(())
}
