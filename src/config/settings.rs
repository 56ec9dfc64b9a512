use std::fmt::Display;
use std::str::FromStr;

use log::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSettings {
    pub path: String,
    pub pool_size: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "padel_dashboard.db".to_string(),
            pool_size: 20,
            acquire_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSettings {
    pub path: String,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            path: "documents/jugadores.jsonl".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthSettings {
    pub session_ttl_hours: i64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            session_ttl_hours: 24,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub base_url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub debounce_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            user_agent: "PadelDashboard/0.1",
            timeout_secs: 30,
            debounce_ms: 400,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub documents: DocumentSettings,
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub client: ClientSettings,
}

impl AppConfig {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let env = Env { lookup };

        Self {
            database: DatabaseSettings {
                path: env.string("DATABASE_PATH", defaults.database.path),
                pool_size: env.parsed("DB_CONNECTION_LIMIT", defaults.database.pool_size),
                acquire_timeout_secs: env
                    .parsed("DB_ACQUIRE_TIMEOUT_SECS", defaults.database.acquire_timeout_secs),
            },
            documents: DocumentSettings {
                path: env.string("DOCUMENT_STORE_PATH", defaults.documents.path),
            },
            server: ServerSettings {
                host: env.string("HOST", defaults.server.host),
                port: env.parsed("PORT", defaults.server.port),
            },
            auth: AuthSettings {
                session_ttl_hours: env
                    .parsed("SESSION_TTL_HOURS", defaults.auth.session_ttl_hours),
            },
            client: ClientSettings {
                base_url: env.string("API_URL", defaults.client.base_url),
                ..defaults.client
            },
        }
    }
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn string(&self, key: &str, default: String) -> String {
        match (self.lookup)(key).filter(|v| !v.trim().is_empty()) {
            Some(value) => value,
            None => {
                debug!("{key} not set, using default: {default}");
                default
            }
        }
    }

    fn parsed<T>(&self, key: &str, default: T) -> T
    where
        T: FromStr + Display + PartialOrd + Default,
        T::Err: Display,
    {
        let Some(raw) = (self.lookup)(key) else {
            debug!("{key} not set, using default: {default}");
            return default;
        };

        match raw.trim().parse::<T>() {
            Ok(value) if value > T::default() => value,
            Ok(value) => {
                warn!("{key} must be positive (got {value}), using default: {default}");
                default
            }
            Err(e) => {
                warn!("Invalid {key} value '{raw}': {e}, using default: {default}");
                default
            }
        }
    }
}
