use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;

/// Default interval between background rate refreshes: 6 hours.
pub const DEFAULT_RATE_REFRESH_SECS: u64 = 6 * 60 * 60;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    pub cnb_base_url: String,
    /// `None` disables the background rate refresh.
    pub rate_refresh_interval: Option<Duration>,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env_or(key, default)
        .trim()
        .parse()
        .with_context(|| format!("Invalid {}", key))
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = parse_env("PW_LISTEN_ADDR", "0.0.0.0:8080")?;
        let db_path = env_or("PW_DB_PATH", "./db/pennywise.db");
        let cors_allow = env_or("PW_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = parse_env("PW_REQUEST_TIMEOUT_MS", "30000")?;
        let static_dir = env_or("PW_STATIC_DIR", "dist");
        let cnb_base_url = env_or("PW_CNB_BASE_URL", "https://www.cnb.cz");
        let refresh_secs: u64 = parse_env(
            "PW_RATE_REFRESH_INTERVAL_SECS",
            &DEFAULT_RATE_REFRESH_SECS.to_string(),
        )?;

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir,
            cnb_base_url,
            rate_refresh_interval: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_timeout_is_rejected() {
        std::env::set_var("PW_REQUEST_TIMEOUT_MS", "soon");
        let result = Config::from_env();
        std::env::set_var("PW_REQUEST_TIMEOUT_MS", "1500");
        let valid = Config::from_env();
        std::env::remove_var("PW_REQUEST_TIMEOUT_MS");

        match result {
            Ok(_) => panic!("malformed timeout was accepted"),
            Err(e) => assert!(e.to_string().contains("PW_REQUEST_TIMEOUT_MS")),
        }
        let config = valid.unwrap_or_else(|e| panic!("valid timeout rejected: {}", e));
        assert_eq!(config.request_timeout, Duration::from_millis(1500));
    }
}
