use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, Context};

/// Development frontends that are always allowed to call the API.
pub const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://127.0.0.1:5500",
    "http://localhost:5173",
    "http://localhost:3000",
    "http://localhost:4173",
];

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,

    pub jwt_secret: String,
    pub jwt_ttl_secs: i64,

    pub admin_password: String,

    pub auth_rate_limit_max: u32,
    pub auth_rate_limit_window_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => format!(
                "postgres://{}:{}@{}:{}/{}",
                var_or("DB_USER", "moodpick"),
                var_or("DB_PASSWORD", "moodpick"),
                var_or("DB_HOST", "db"),
                var_or("DB_PORT", "5432"),
                var_or("DB_NAME", "moodpick"),
            ),
        };

        let mut cors_origins: Vec<String> =
            DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect();
        if let Ok(extra) = env::var("CORS_EXTRA_ORIGINS") {
            cors_origins.extend(
                extra
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from),
            );
        }

        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("JWT_SECRET must be set"))?;

        Ok(Self {
            database_url,
            host: var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", "8080")?,
            cors_origins,

            jwt_secret,
            jwt_ttl_secs: parse_var("JWT_TTL_SECS", "86400")?,

            admin_password: var_or("ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD),

            auth_rate_limit_max: parse_var("AUTH_RATE_LIMIT_MAX", "10")?,
            auth_rate_limit_window_secs: parse_var("AUTH_RATE_LIMIT_WINDOW_SECS", "60")?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_var<T>(key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = var_or(key, default);
    raw.parse::<T>()
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("{key} must be a number, got {raw:?}"))
}
