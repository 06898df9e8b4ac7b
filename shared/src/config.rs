use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Sled,
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "sled" => StoreBackend::Sled,
            "memory" => StoreBackend::Memory,
            other => {
                warn!("Unknown KRT_STORE_BACKEND '{}', falling back to sled", other);
                StoreBackend::Sled
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub data_dir: String,
    pub store_backend: StoreBackend,
    pub cache_ttl: Duration,
    pub cache_max_entries: Option<u64>,
    pub allowed_origins: Vec<String>,
}

impl Config {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_HTTP_PORT: u16 = 8080;
    const DEFAULT_DATA_DIR: &'static str = "./data";
    const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 60 * 60;

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let cache_ttl_secs = parse_or(
            "KRT_CACHE_TTL_SECS",
            lookup("KRT_CACHE_TTL_SECS"),
            Self::DEFAULT_CACHE_TTL_SECS,
        );

        let cache_max_entries = lookup("KRT_CACHE_MAX_ENTRIES").and_then(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|_| warn!("Ignoring unparseable KRT_CACHE_MAX_ENTRIES '{}'", raw))
                .ok()
        });

        Self {
            host: lookup("KRT_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            http_port: parse_or(
                "KRT_HTTP_PORT",
                lookup("KRT_HTTP_PORT"),
                Self::DEFAULT_HTTP_PORT,
            ),
            data_dir: lookup("KRT_DATA_DIR").unwrap_or_else(|| Self::DEFAULT_DATA_DIR.to_string()),
            store_backend: lookup("KRT_STORE_BACKEND")
                .map(|v| StoreBackend::parse(&v))
                .unwrap_or(StoreBackend::Sled),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            cache_max_entries,
            allowed_origins: lookup("KRT_ALLOWED_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse::<T>().unwrap_or_else(|_| {
            warn!("Unparseable {} '{}', using default {}", name, value, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.data_dir, "./data");
        assert_eq!(config.store_backend, StoreBackend::Sled);
        assert_eq!(config.cache_ttl, Duration::from_secs(86_400));
        assert_eq!(config.cache_max_entries, None);
        assert_eq!(config.allowed_origins, vec!["*".to_string()]);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("KRT_HOST", "127.0.0.1"),
            ("KRT_HTTP_PORT", "9090"),
            ("KRT_STORE_BACKEND", "MEMORY"),
            ("KRT_CACHE_TTL_SECS", "60"),
            ("KRT_CACHE_MAX_ENTRIES", "500"),
            ("KRT_ALLOWED_ORIGINS", "http://a.test, http://b.test"),
        ]);
        assert_eq!(config.bind_address(), "127.0.0.1:9090");
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.cache_max_entries, Some(500));
        assert_eq!(
            config.allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_from(&[
            ("KRT_HTTP_PORT", "not-a-port"),
            ("KRT_STORE_BACKEND", "postgres"),
            ("KRT_CACHE_MAX_ENTRIES", "lots"),
        ]);
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.store_backend, StoreBackend::Sled);
        assert_eq!(config.cache_max_entries, None);
    }
}
