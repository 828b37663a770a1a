use std::env;

use anyhow::{anyhow, Result};

fn get_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn get_env_u64(key: &str, default: u64) -> Result<u64> {
    match get_env(key) {
        None => Ok(default),
        Some(v) => Ok(v
            .parse::<u64>()
            .map_err(|e| anyhow!("{key} invalid int: {e}"))?),
    }
}

fn get_env_usize(key: &str, default: usize) -> Result<usize> {
    match get_env(key) {
        None => Ok(default),
        Some(v) => Ok(v
            .parse::<usize>()
            .map_err(|e| anyhow!("{key} invalid int: {e}"))?),
    }
}

fn get_env_string(key: &str, default: &str) -> String {
    get_env(key).unwrap_or_else(|| default.to_string())
}

#[derive(Debug, Clone)]
pub struct Settings {
    // Server bind
    pub host: String,
    pub port: u16,

    // Upstream + auth
    pub backend_api_url: String,
    pub dashboard_password: String,

    // Session / forwarding
    pub session_max_age_secs: u64,
    pub proxy_timeout_secs: u64,

    // UI
    pub poll_interval_secs: u64,
    pub page_size: usize,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let backend_api_url = get_env_string("BACKEND_API_URL", "http://localhost:5000")
            .trim_end_matches('/')
            .to_string();

        // Required; there is no default password.
        let dashboard_password = get_env("DASHBOARD_PASSWORD")
            .ok_or_else(|| anyhow!("DASHBOARD_PASSWORD must be set"))?;

        let s = Self {
            host: get_env_string("DASHBOARD_HOST", "127.0.0.1"),
            port: get_env_usize("DASHBOARD_PORT", 3000)? as u16,
            backend_api_url,
            dashboard_password,
            session_max_age_secs: get_env_u64("SESSION_MAX_AGE_SECS", 86_400)?,
            proxy_timeout_secs: get_env_u64("PROXY_TIMEOUT_SECS", 10)?,
            poll_interval_secs: get_env_u64("POLL_INTERVAL_SECS", 15)?,
            page_size: get_env_usize("PAGE_SIZE", 12)?,
        };

        s.validate()?;
        Ok(s)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.backend_api_url.starts_with("http://")
            && !self.backend_api_url.starts_with("https://")
        {
            return Err(anyhow!(
                "BACKEND_API_URL must be an http(s) URL (got {})",
                self.backend_api_url
            ));
        }
        if self.proxy_timeout_secs < 1 {
            return Err(anyhow!(
                "PROXY_TIMEOUT_SECS must be >= 1 (got {})",
                self.proxy_timeout_secs
            ));
        }
        if self.poll_interval_secs < 1 {
            return Err(anyhow!(
                "POLL_INTERVAL_SECS must be >= 1 (got {})",
                self.poll_interval_secs
            ));
        }
        if self.page_size < 1 {
            return Err(anyhow!("PAGE_SIZE must be >= 1 (got {})", self.page_size));
        }
        if self.session_max_age_secs < 60 {
            return Err(anyhow!(
                "SESSION_MAX_AGE_SECS must be >= 60 (got {})",
                self.session_max_age_secs
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Settings {
        Settings {
            host: "127.0.0.1".to_string(),
            port: 3000,
            backend_api_url: "http://localhost:5000".to_string(),
            dashboard_password: "secret".to_string(),
            session_max_age_secs: 86_400,
            proxy_timeout_secs: 10,
            poll_interval_secs: 15,
            page_size: 12,
        }
    }

    #[test]
    fn valid_settings_pass() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn backend_url_must_be_http() {
        let mut s = base();
        s.backend_api_url = "localhost:5000".to_string();
        assert!(s.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut s = base();
        s.proxy_timeout_secs = 0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn zero_page_size_rejected() {
        let mut s = base();
        s.page_size = 0;
        assert!(s.validate().is_err());
    }
}
