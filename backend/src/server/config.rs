//! Server settings loaded via OrthoConfig and the configuration handed to
//! [`super::create_server`].

use std::time::Duration;

use lesson_backend::outbound::persistence::{DbPool, PoolConfig};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings read from `LESSONS_*` environment variables, CLI flags, or a
/// configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LESSONS")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL. Lessons are kept in memory when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub database_max_connections: Option<u32>,
    /// Skip embedded migrations at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

impl ServerSettings {
    /// Host and port to bind, falling back to `0.0.0.0:8080`.
    pub fn bind_address(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Pool configuration for the configured database, if any.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_deref().map(|url| {
            PoolConfig::new(url)
                .with_max_size(
                    self.database_max_connections
                        .unwrap_or(DEFAULT_MAX_CONNECTIONS),
                )
                .with_connection_timeout(CONNECTION_TIMEOUT)
        })
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: (String, u16)) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool. Without one the server stores
    /// lessons in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "LESSONS_HOST",
        "LESSONS_PORT",
        "LESSONS_DATABASE_URL",
        "LESSONS_DATABASE_MAX_CONNECTIONS",
        "LESSONS_SKIP_MIGRATIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("lesson-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_bind_all_interfaces_in_memory() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_address(), ("0.0.0.0".to_owned(), 8080));
        assert!(settings.pool_config().is_none());
        assert!(!settings.skip_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("LESSONS_HOST", Some("127.0.0.1".to_owned())),
            ("LESSONS_PORT", Some("9090".to_owned())),
            (
                "LESSONS_DATABASE_URL",
                Some("postgres://localhost/lessons".to_owned()),
            ),
            ("LESSONS_DATABASE_MAX_CONNECTIONS", Some("4".to_owned())),
            ("LESSONS_SKIP_MIGRATIONS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_address(), ("127.0.0.1".to_owned(), 9090));
        assert!(settings.skip_migrations);
        let pool = settings.pool_config().expect("database configured");
        assert_eq!(pool.database_url(), "postgres://localhost/lessons");
        assert_eq!(pool.max_size(), 4);
    }
}
