//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Instant;

use cms_core::ports::{
    ContactRepository, ObjectStore, PasswordService, PostRepository, RateLimiter,
    ServiceRepository, TokenService,
};
use cms_core::services::{BlogService, ContactService, ServiceCatalog};
use cms_infra::{
    Argon2PasswordService, DatabaseConnections, InMemoryContactRepository, InMemoryObjectStore,
    InMemoryPostRepository, InMemoryRateLimiter, InMemoryServiceRepository, JwtTokenService,
    RateLimitConfig,
};

use crate::config::{
    AdminAccount, AppConfig, CONTACT_WINDOW, GLOBAL_WINDOW, RateLimitBackend, RateLimitSettings,
    RunMode,
};
use crate::middleware::{ClientAddr, OriginPolicy};

/// Content services plus the upload store, shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub blogs: BlogService,
    pub services: ServiceCatalog,
    pub contacts: ContactService,
    pub uploads: Arc<dyn ObjectStore>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        pages: Arc<dyn ServiceRepository>,
        messages: Arc<dyn ContactRepository>,
        uploads: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            blogs: BlogService::new(posts),
            services: ServiceCatalog::new(pages),
            contacts: ContactService::new(messages),
            uploads,
            started_at: Instant::now(),
        }
    }

    /// Everything in process memory. Nothing survives a restart.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryServiceRepository::new()),
            Arc::new(InMemoryContactRepository::new()),
            Arc::new(InMemoryObjectStore::new()),
        )
    }
}

/// Credential checking for the admin surface.
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    /// `None` disables login entirely.
    pub admin: Option<AdminAccount>,
}

/// Everything `build_app` needs, resolved once at startup.
#[derive(Clone)]
pub struct AppContext {
    pub state: AppState,
    pub auth: AuthState,
    pub origins: OriginPolicy,
    pub global_limiter: Arc<dyn RateLimiter>,
    pub contact_limiter: Arc<dyn RateLimiter>,
    pub client_addr: ClientAddr,
    pub mode: RunMode,
    pub db: Option<DatabaseConnections>,
}

impl AppContext {
    /// Wire the in-memory adapters for `config`. Used by tests and as the
    /// starting point of [`AppContext::from_config`].
    pub fn in_memory(config: &AppConfig) -> Self {
        let (global_limiter, contact_limiter) = memory_limiters(&config.rate_limits);
        Self {
            state: AppState::in_memory(),
            auth: AuthState {
                tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
                passwords: Arc::new(Argon2PasswordService::new()),
                admin: config.admin.clone(),
            },
            origins: OriginPolicy::new(config.allowed_origins.iter().cloned()),
            global_limiter,
            contact_limiter,
            client_addr: ClientAddr::new(config.trust_proxy),
            mode: config.mode,
            db: None,
        }
    }

    /// Connect the configured backends. Each one that is missing or
    /// unreachable falls back to its in-memory adapter with a warning.
    pub async fn from_config(config: &AppConfig) -> Self {
        let mut ctx = Self::in_memory(config);

        if config.jwt.generated_secret {
            tracing::warn!("JWT_SECRET not set - using a per-process secret, tokens die on restart");
        } else if config.jwt.uses_placeholder_secret() {
            tracing::warn!("JWT_SECRET holds the sample placeholder - set a real secret");
        }
        if config.admin.is_none() {
            tracing::warn!("ADMIN_EMAIL / ADMIN_PASSWORD_HASH not set - admin login is disabled");
        }

        ctx.connect_database(config).await;
        ctx.connect_uploads(config);
        ctx.connect_rate_limiter(&config.rate_limits).await;

        tracing::info!(
            database = ctx.db.is_some(),
            mode = ?ctx.mode,
            "Application state initialized"
        );
        ctx
    }

    #[cfg(feature = "postgres")]
    async fn connect_database(&mut self, config: &AppConfig) {
        use cms_infra::{PostgresContactRepository, PostgresPostRepository, PostgresServiceRepository};

        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set - content is kept in memory");
            return;
        };

        match DatabaseConnections::init(db_config).await {
            Ok(connections) => {
                let conn = connections.main.clone();
                self.state = AppState::new(
                    Arc::new(PostgresPostRepository::new(conn.clone())),
                    Arc::new(PostgresServiceRepository::new(conn.clone())),
                    Arc::new(PostgresContactRepository::new(conn)),
                    self.state.uploads.clone(),
                );
                self.db = Some(connections);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to database - content is kept in memory");
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect_database(&mut self, config: &AppConfig) {
        if config.database.is_some() {
            tracing::warn!("Built without the postgres feature - DATABASE_URL is ignored");
        }
    }

    #[cfg(feature = "cloudinary")]
    fn connect_uploads(&mut self, config: &AppConfig) {
        use cms_infra::CloudinaryStore;

        let Some(cloudinary) = config.cloudinary.clone() else {
            tracing::warn!("Cloudinary credentials not set - uploads are kept in memory");
            return;
        };

        match CloudinaryStore::new(cloudinary) {
            Ok(store) => self.state.uploads = Arc::new(store),
            Err(e) => tracing::error!(error = %e, "Cloudinary client unavailable - uploads are kept in memory"),
        }
    }

    #[cfg(not(feature = "cloudinary"))]
    fn connect_uploads(&mut self, config: &AppConfig) {
        if config.cloudinary.is_some() {
            tracing::warn!("Built without the cloudinary feature - uploads are kept in memory");
        }
    }

    #[cfg(feature = "redis")]
    async fn connect_rate_limiter(&mut self, settings: &RateLimitSettings) {
        use cms_infra::{RedisConfig, RedisRateLimitConfig, RedisRateLimiter};

        if settings.backend != RateLimitBackend::Redis {
            return;
        }
        let Some(url) = settings.redis_url.clone() else {
            tracing::warn!("RATE_LIMIT_BACKEND=redis but REDIS_URL is not set - limiting per process");
            return;
        };

        let config = RedisRateLimitConfig {
            redis: RedisConfig {
                url,
                ..RedisConfig::default()
            },
            max_requests: settings.global_max,
            window: GLOBAL_WINDOW,
            key_prefix: "ratelimit:global".to_string(),
        };
        match RedisRateLimiter::new(config).await {
            Ok(global) => {
                let contact =
                    global.with_namespace("ratelimit:contact", settings.contact_max, CONTACT_WINDOW);
                self.global_limiter = Arc::new(global);
                self.contact_limiter = Arc::new(contact);
            }
            Err(e) => {
                tracing::error!(error = %e, "Redis unavailable - limiting per process");
            }
        }
    }

    #[cfg(not(feature = "redis"))]
    async fn connect_rate_limiter(&mut self, settings: &RateLimitSettings) {
        if settings.backend == RateLimitBackend::Redis {
            tracing::warn!("Built without the redis feature - limiting per process");
        }
    }
}

fn memory_limiters(settings: &RateLimitSettings) -> (Arc<dyn RateLimiter>, Arc<dyn RateLimiter>) {
    let global = InMemoryRateLimiter::new(RateLimitConfig {
        max_requests: settings.global_max,
        window: GLOBAL_WINDOW,
    });
    let contact = InMemoryRateLimiter::new(RateLimitConfig {
        max_requests: settings.contact_max,
        window: CONTACT_WINDOW,
    });
    (Arc::new(global), Arc::new(contact))
}
