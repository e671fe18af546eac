//! Configuration loading from environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

/// Which upstream the server asks for rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Hardcoded catalog rates.
    Static,
    /// exchangerate-api style HTTP endpoint.
    Http,
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "static" => Ok(ProviderKind::Static),
            "http" => Ok(ProviderKind::Http),
            other => anyhow::bail!("Unknown rate provider: {} (expected static or http)", other),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub provider: ProviderKind,
    pub rates_api_url: String,
    pub cache_freshness: Duration,
    /// `None` when `LOOKUP_TIMEOUT_MS=0`.
    pub lookup_timeout: Option<Duration>,
    pub rate_limit_per_minute: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = parse_or(&get, "PORT", 3000u16)?;

        let provider = get("RATE_PROVIDER")
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or(ProviderKind::Static);

        let rates_api_url =
            get("RATES_API_URL").unwrap_or_else(|| rates_client::DEFAULT_BASE_URL.to_string());

        let cache_freshness = Duration::from_secs(parse_or(&get, "CACHE_FRESHNESS_SECS", 3600u64)?);

        let lookup_timeout = match parse_or(&get, "LOOKUP_TIMEOUT_MS", 5000u64)? {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };

        let rate_limit_per_minute = parse_or(&get, "RATE_LIMIT_PER_MINUTE", 100u32)?;

        Ok(Self {
            port,
            provider,
            rates_api_url,
            cache_freshness,
            lookup_timeout,
            rate_limit_per_minute,
        })
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.provider, ProviderKind::Static);
        assert_eq!(config.cache_freshness, Duration::from_secs(3600));
        assert_eq!(config.lookup_timeout, Some(Duration::from_millis(5000)));
        assert_eq!(config.rate_limit_per_minute, 100);
        assert_eq!(config.rates_api_url, rates_client::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("RATE_PROVIDER", "HTTP"),
            ("RATES_API_URL", "http://rates.local/latest"),
            ("CACHE_FRESHNESS_SECS", "60"),
            ("LOOKUP_TIMEOUT_MS", "0"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.provider, ProviderKind::Http);
        assert_eq!(config.rates_api_url, "http://rates.local/latest");
        assert_eq!(config.cache_freshness, Duration::from_secs(60));
        assert_eq!(config.lookup_timeout, None);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(load(&[("PORT", "not-a-port")]).is_err());
        assert!(load(&[("RATE_PROVIDER", "carrier-pigeon")]).is_err());
        assert!(load(&[("CACHE_FRESHNESS_SECS", "-1")]).is_err());
    }
}
