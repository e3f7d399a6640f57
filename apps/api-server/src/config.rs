//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use actix_web::cookie::SameSite;

#[cfg(feature = "postgres")]
use quill_infra::database::DatabaseConfig;

/// Cookie security flags for the credential cookie.
///
/// One configuration surface instead of divergent code paths: local
/// development runs `secure=false, same_site=strict`, a cross-site
/// deployment runs `secure=true, same_site=none`.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub secure: bool,
    pub same_site: SameSitePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSitePolicy {
    Strict,
    Lax,
    None,
}

impl SameSitePolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "lax" => Some(Self::Lax),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

impl From<SameSitePolicy> for SameSite {
    fn from(policy: SameSitePolicy) -> Self {
        match policy {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::Lax => SameSite::Lax,
            SameSitePolicy::None => SameSite::None,
        }
    }
}

impl CookieSettings {
    fn from_env() -> Self {
        let secure = env::var("COOKIE_SECURE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(false);

        let same_site = env::var("COOKIE_SAME_SITE")
            .ok()
            .and_then(|s| SameSitePolicy::parse(&s))
            .unwrap_or(SameSitePolicy::Strict);

        Self { secure, same_site }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub upload_dir: PathBuf,
    pub cookies: CookieSettings,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        #[cfg(feature = "postgres")]
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            cookies: CookieSettings::from_env(),
            #[cfg(feature = "postgres")]
            database,
        }
    }
}
