use core_config::{AppInfo, FromEnv, app_info, env_parse_or, server::ServerConfig};

use database::postgres::PostgresConfig;
use database::common::RetryConfig;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    /// `None` when DATABASE_URL is unset; accounts are then kept in memory
    pub database: Option<PostgresConfig>,
    pub db_retry: RetryConfig,
    /// RUN_MIGRATIONS (default: true)
    pub run_migrations: bool,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env_optional()?;
        let db_retry = RetryConfig::from_env()?;
        let run_migrations = env_parse_or("RUN_MIGRATIONS", true)?;
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080

        Ok(Self {
            app: app_info!(),
            database,
            db_retry,
            run_migrations,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_without_database_url() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", None::<&str>),
                ("RUN_MIGRATIONS", None),
                ("PORT", Some("9090")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.database.is_none());
                assert!(config.run_migrations);
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.app.name, "accounts_api");
            },
        );
    }

    #[test]
    fn test_config_with_database_url() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/accounts")),
                ("RUN_MIGRATIONS", Some("false")),
            ],
            || {
                let config = Config::from_env().unwrap();
                let database = config.database.unwrap();
                assert_eq!(database.url, "postgres://localhost/accounts");
                assert!(!config.run_migrations);
            },
        );
    }

    #[test]
    fn test_config_rejects_invalid_run_migrations() {
        temp_env::with_var("RUN_MIGRATIONS", Some("sometimes"), || {
            assert!(Config::from_env().is_err());
        });
    }
}
