use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";
pub const DEFAULT_FACT_URL: &str = "https://catfact.ninja/fact";
/// Ten years; keeps `now + session_ttl` well inside chrono's range.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365 * 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must be a number in range, got '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub ip_lookup_url: String,
    pub fact_url: String,
    pub http_timeout: Duration,
    pub session_ttl: chrono::Duration,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = number(&lookup, "PORT", 8080)?;
        let timeout_secs: u64 = number(&lookup, "HTTP_TIMEOUT_SECS", 5)?;
        let session_ttl = session_ttl(&lookup)?;

        Ok(Self {
            database_url,
            host,
            port,
            ip_lookup_url: lookup("IP_LOOKUP_URL")
                .unwrap_or_else(|| DEFAULT_IP_LOOKUP_URL.to_string()),
            fact_url: lookup("FACT_URL").unwrap_or_else(|| DEFAULT_FACT_URL.to_string()),
            http_timeout: Duration::from_secs(timeout_secs),
            session_ttl,
        })
    }
}

fn session_ttl(lookup: &impl Fn(&str) -> Option<String>) -> Result<chrono::Duration, ConfigError> {
    let name = "SESSION_TTL_HOURS";
    let hours: i64 = number(lookup, name, 336)?;
    Some(hours)
        .filter(|h| (1..=MAX_SESSION_TTL_HOURS).contains(h))
        .and_then(chrono::Duration::try_hours)
        .ok_or(ConfigError::Invalid {
            name,
            value: hours.to_string(),
        })
}

fn number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
