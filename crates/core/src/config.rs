use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub postgres: PostgresConfig,
    pub smtp: SmtpConfig,
    pub ches: ChesConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            app: AppConfig::from_env(),
            postgres: PostgresConfig::from_env(),
            smtp: SmtpConfig::from_env(),
            ches: ChesConfig::from_env(),
        }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  app:       base_url={}", self.app.base_url);
        tracing::info!(
            "  postgres:  host={}, db={}",
            self.postgres.host,
            self.postgres.database
        );
        tracing::info!(
            "  smtp:      host={}, from={}, configured={}",
            self.smtp.host,
            self.smtp.from,
            self.smtp.is_configured()
        );
        tracing::info!(
            "  ches:      url={}, configured={}",
            self.ches.api_url.as_deref().unwrap_or("(none)"),
            self.ches.is_configured()
        );
    }
}

// ── Application ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Public frontend base URL used when building email links.
    pub base_url: String,
}

impl AppConfig {
    fn from_env() -> Self {
        Self {
            base_url: env_or("FORMS_BASE_URL", "http://localhost:8080/app"),
        }
    }
}

// ── PostgreSQL ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ssl_mode: String,
    pub max_connections: u32,
}

impl PostgresConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("PG_HOST", "localhost"),
            port: env_u16("PG_PORT", 5432),
            database: env_or("PG_DATABASE", "forms"),
            username: env_opt("PG_USERNAME"),
            password: env_opt("PG_PASSWORD"),
            ssl_mode: env_or("PG_SSL_MODE", "prefer"),
            max_connections: env_u32("PG_MAX_CONNECTIONS", 10),
        }
    }

    pub fn connection_string(&self) -> String {
        let user = self.username.as_deref().unwrap_or("postgres");
        let pass = self.password.as_deref().unwrap_or("");
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            user, pass, self.host, self.port, self.database, self.ssl_mode
        )
    }

    pub fn is_configured(&self) -> bool {
        self.username.is_some()
    }
}

// ── SMTP ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: Option<u16>,
    pub tls: Option<bool>,
    /// Sender address, e.g. `"Hosted Forms <no-reply@example.com>"`.
    pub from: String,
}

impl SmtpConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("SMTP_HOST", "localhost"),
            port: env_opt("SMTP_PORT").and_then(|v| v.parse().ok()),
            tls: env_opt("SMTP_TLS").map(|v| v == "true"),
            from: env_or("SMTP_FROM", "no-reply@localhost"),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.host != "localhost"
    }
}

// ── CHES relay ────────────────────────────────────────────────

/// Hosted email relay endpoint (posts rendered messages as JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChesConfig {
    pub api_url: Option<String>,
    pub auth_token: Option<String>,
}

impl ChesConfig {
    fn from_env() -> Self {
        Self {
            api_url: env_opt("CHES_API_URL"),
            auth_token: env_opt("CHES_AUTH_TOKEN"),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_url.is_some()
    }
}
