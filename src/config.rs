use std::env;
use std::str::FromStr;

use sqlx::mysql::MySqlConnectOptions;
use strum_macros::{Display, EnumString};
use thiserror::Error;
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    Development,
    Production,
    Test,
    Provision,
}

/// Every problem found while reading the environment, reported at once.
#[derive(Debug, Error)]
#[error("invalid configuration: {}", .0.join("; "))]
pub struct ConfigError(pub Vec<String>);

#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    /// Create the `users` table on startup when it is missing.
    pub synchronize: bool,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.name)
    }
}

#[derive(Clone)]
pub struct Config {
    pub environment: Environment,
    pub port: u16,
    pub secret_key: String,

    // Basic auth for /docs and /docs-json
    pub admin: AdminCredentials,

    pub database: DatabaseConfig,

    // Origins allowed by CORS, `*` allows any
    pub cors_origins: Vec<String>,

    // Rate limiting, 0 turns the limiter off
    pub rate_users_per_min: u32,

    pub log_dir: String,
    pub log_level: Level,
}

impl Config {
    /// Reads the process environment; `.env` has already been loaded by then.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut reader = Reader {
            lookup,
            problems: Vec::new(),
        };

        let environment = reader.parsed_or("APP_ENV", Environment::Development);
        let production = environment == Environment::Production;

        let config = Self {
            environment,
            port: reader.parsed_or("PORT", 5000),
            secret_key: reader.required("SECRET_KEY"),
            admin: AdminCredentials {
                username: reader.required("ADMIN_USER"),
                password: reader.required("ADMIN_PASSWORD"),
            },
            database: DatabaseConfig {
                host: reader.required("DB_HOST"),
                port: reader.required_parsed("DB_PORT"),
                username: reader.required("DB_USERNAME"),
                password: reader.required("DB_PASSWORD"),
                name: reader.required("DB_NAME"),
                max_connections: reader.parsed_or("DB_MAX_CONNECTIONS", 5),
                synchronize: reader.parsed_or("DB_SYNCHRONIZE", !production),
            },
            cors_origins: reader
                .optional("CORS_ORIGIN_LIST")
                .map(|list| split_list(&list))
                .filter(|origins| !origins.is_empty())
                .unwrap_or_else(|| vec!["*".to_string()]),
            rate_users_per_min: reader.parsed_or("RATE_USERS_PER_MIN", 1000),
            log_dir: reader
                .optional("LOG_DIR")
                .unwrap_or_else(|| "logs".to_string()),
            log_level: reader.parsed_or(
                "LOG_LEVEL",
                if production { Level::INFO } else { Level::DEBUG },
            ),
        };

        if reader.problems.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError(reader.problems))
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

struct Reader<F> {
    lookup: F,
    problems: Vec<String>,
}

impl<F> Reader<F>
where
    F: Fn(&str) -> Option<String>,
{
    // blank values count as unset
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.trim().is_empty())
    }

    fn required(&mut self, key: &str) -> String {
        match self.optional(key) {
            Some(value) => value,
            None => {
                self.problems.push(format!("{key} must be set"));
                String::new()
            }
        }
    }

    fn required_parsed<T: FromStr + Default>(&mut self, key: &str) -> T {
        match self.optional(key) {
            Some(raw) => self.parse(key, &raw).unwrap_or_default(),
            None => {
                self.problems.push(format!("{key} must be set"));
                T::default()
            }
        }
    }

    fn parsed_or<T: FromStr>(&mut self, key: &str, default: T) -> T {
        match self.optional(key) {
            Some(raw) => self.parse(key, &raw).unwrap_or(default),
            None => default,
        }
    }

    fn parse<T: FromStr>(&mut self, key: &str, raw: &str) -> Option<T> {
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.problems.push(format!("{key} has an invalid value: {raw:?}"));
                None
            }
        }
    }
}
