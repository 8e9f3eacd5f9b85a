//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use cms_infra::{CloudinaryConfig, DatabaseConfig, JwtConfig};

/// Settings that make a deployment unsafe to start.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set in production")]
    MissingJwtSecret,

    #[error("JWT_SECRET still holds the sample placeholder")]
    PlaceholderJwtSecret,
}

/// Fixed window of the global limiter.
pub const GLOBAL_WINDOW: Duration = Duration::from_secs(60);
/// Fixed window of the contact-form limiter.
pub const CONTACT_WINDOW: Duration = Duration::from_secs(10 * 60);

pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:3000",
    "https://metadigitalagency.in",
    "https://www.metadigitalagency.in",
];

/// Deployment mode. Production hides debug detail from error bodies and
/// switches logs to JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Development,
    Production,
}

impl RunMode {
    pub fn is_production(self) -> bool {
        self == RunMode::Production
    }
}

impl FromStr for RunMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => RunMode::Production,
            _ => RunMode::Development,
        })
    }
}

/// The single operator account allowed to log in.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateLimitBackend {
    #[default]
    Memory,
    Redis,
}

#[derive(Debug, Clone)]
pub struct RateLimitSettings {
    /// Requests per client per [`GLOBAL_WINDOW`].
    pub global_max: u32,
    /// Contact-scope requests per client per [`CONTACT_WINDOW`].
    pub contact_max: u32,
    pub backend: RateLimitBackend,
    pub redis_url: Option<String>,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            global_max: 300,
            contact_max: 100,
            backend: RateLimitBackend::Memory,
            redis_url: None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mode: RunMode,
    pub json_logs: bool,
    pub database: Option<DatabaseConfig>,
    pub allowed_origins: Vec<String>,
    pub rate_limits: RateLimitSettings,
    pub cloudinary: Option<CloudinaryConfig>,
    pub jwt: JwtConfig,
    pub admin: Option<AdminAccount>,
    /// Take the client address from `Forwarded`/`X-Forwarded-For`. Only safe
    /// when a reverse proxy overwrites those headers.
    pub trust_proxy: bool,
    pub shutdown_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key/value source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mode: RunMode = get("APP_ENV")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let database = get("DATABASE_URL").map(|url| {
            let defaults = DatabaseConfig::new(url);
            DatabaseConfig {
                max_connections: parsed(get("DB_MAX_CONNECTIONS"))
                    .unwrap_or(defaults.max_connections),
                min_connections: parsed(get("DB_MIN_CONNECTIONS"))
                    .unwrap_or(defaults.min_connections),
                ..defaults
            }
        });

        let allowed_origins = get("ALLOWED_ORIGINS")
            .map(|list| {
                list.split(',')
                    .map(|o| o.trim().trim_end_matches('/').to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect());

        let defaults = RateLimitSettings::default();
        let rate_limits = RateLimitSettings {
            global_max: parsed(get("GLOBAL_RATE_LIMIT")).unwrap_or(defaults.global_max),
            contact_max: parsed(get("CONTACT_RATE_LIMIT")).unwrap_or(defaults.contact_max),
            backend: match get("RATE_LIMIT_BACKEND").as_deref().map(str::trim) {
                Some("redis") => RateLimitBackend::Redis,
                _ => RateLimitBackend::Memory,
            },
            redis_url: get("REDIS_URL"),
        };

        let jwt_base = get("JWT_SECRET").map_or_else(JwtConfig::default, |secret| JwtConfig::with_secret(secret));
        let jwt = JwtConfig {
            expiration_hours: parsed(get("JWT_EXPIRATION_HOURS"))
                .unwrap_or(jwt_base.expiration_hours),
            issuer: get("JWT_ISSUER").unwrap_or_else(|| jwt_base.issuer.clone()),
            ..jwt_base
        };

        let admin = match (get("ADMIN_EMAIL"), get("ADMIN_PASSWORD_HASH")) {
            (Some(email), Some(password_hash)) => Some(AdminAccount {
                email: email.trim().to_string(),
                password_hash: password_hash.trim().to_string(),
            }),
            _ => None,
        };

        Self {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed(get("PORT")).unwrap_or(5001),
            mode,
            json_logs: mode.is_production()
                || get("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
            database,
            allowed_origins,
            rate_limits,
            cloudinary: CloudinaryConfig::from_parts(
                get("CLOUDINARY_CLOUD_NAME"),
                get("CLOUDINARY_API_KEY"),
                get("CLOUDINARY_API_SECRET"),
            ),
            jwt,
            admin,
            trust_proxy: get("TRUST_PROXY").is_some_and(|v| flag(&v)),
            shutdown_timeout: Duration::from_secs(
                parsed(get("SHUTDOWN_TIMEOUT_SECS")).unwrap_or(10),
            ),
        }
    }
}

impl AppConfig {
    /// Refuse settings that would let anyone mint admin tokens. Development
    /// tolerates them; `AppContext::from_config` logs a warning instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.mode.is_production() {
            return Ok(());
        }
        if self.jwt.generated_secret {
            return Err(ConfigError::MissingJwtSecret);
        }
        if self.jwt.uses_placeholder_secret() {
            return Err(ConfigError::PlaceholderJwtSecret);
        }
        Ok(())
    }
}

fn parsed<T: FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}

fn flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
