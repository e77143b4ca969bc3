use promptsmith_core::subscription::{
    TierLimits, DEFAULT_FREE_DAILY_LIMIT, DEFAULT_PRO_DAILY_LIMIT,
};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for the pool to drain after shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Maximum pooled database connections (default: `20`).
    pub db_max_connections: u32,
    /// Daily generation caps for the Free and Pro tiers.
    pub tier_limits: TierLimits,
    /// JWT validation settings.
    pub jwt: JwtConfig,
}

/// Read `name`, falling back to `default`, and parse it.
///
/// # Panics
///
/// Panics with `name` in the message if the value does not parse.
fn env_or<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + ToString,
{
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or_else(|_| panic!("{name} must be a valid {}", std::any::type_name::<T>()))
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `DB_MAX_CONNECTIONS`    | `20`                       |
    /// | `FREE_DAILY_LIMIT`      | `10`                       |
    /// | `PRO_DAILY_LIMIT`       | `100`                      |
    ///
    /// `DATABASE_URL` is read separately by `main`. See [`JwtConfig::from_env`]
    /// for the JWT variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 3000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30);
        let shutdown_timeout_secs: u64 = env_or("SHUTDOWN_TIMEOUT_SECS", 30);
        let db_max_connections: u32 =
            env_or("DB_MAX_CONNECTIONS", promptsmith_db::DEFAULT_MAX_CONNECTIONS);

        let tier_limits = TierLimits {
            free: env_or("FREE_DAILY_LIMIT", DEFAULT_FREE_DAILY_LIMIT),
            pro: env_or("PRO_DAILY_LIMIT", DEFAULT_PRO_DAILY_LIMIT),
        };
        assert!(
            tier_limits.free > 0 && tier_limits.pro > 0,
            "FREE_DAILY_LIMIT and PRO_DAILY_LIMIT must be positive"
        );

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            db_max_connections,
            tier_limits,
            jwt,
        }
    }
}
