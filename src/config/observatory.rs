//! Observatory configuration structures and loading

use serde::{Deserialize, Serialize};

/// Default NOAA GOES primary X-ray flux feed (24h, per-minute).
pub const DEFAULT_XRAY_URL: &str =
    "https://services.swpc.noaa.gov/json/goes/primary/xrays-1-day.json";

/// Top-level configuration for the observatory service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ObservatoryConfig {
    pub server: ServerConfig,
    pub feeds: FeedConfig,
    pub advisor: AdvisorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Dashboard API bind address
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// GOES X-ray flux feed URL
    pub xray_url: String,
    /// Keep every Nth per-minute sample for charting
    pub xray_sample_stride: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            xray_url: DEFAULT_XRAY_URL.to_string(),
            xray_sample_stride: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Generative-AI endpoint base URL
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// API key; the `GEMINI_API_KEY` env var overrides the TOML value
    pub api_key: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: String::new(),
        }
    }
}

impl ObservatoryConfig {
    /// Load configuration: `SOLARIS_CONFIG` path, then `./solaris.toml`,
    /// then defaults. Malformed TOML falls back to defaults with a warning
    /// rather than aborting startup.
    pub fn load() -> Self {
        let path = std::env::var("SOLARIS_CONFIG").unwrap_or_else(|_| "solaris.toml".to_string());

        let mut config = match std::fs::read_to_string(&path) {
            Ok(raw) => match toml::from_str::<Self>(&raw) {
                Ok(config) => {
                    tracing::info!(path = %path, "Configuration loaded");
                    config
                }
                Err(err) => {
                    tracing::warn!(path = %path, error = %err, "Malformed config, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!("No config file found, using defaults");
                Self::default()
            }
        };

        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.advisor.api_key = key;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ObservatoryConfig::default();
        assert_eq!(config.server.addr, "0.0.0.0:8080");
        assert_eq!(config.feeds.xray_sample_stride, 15);
        assert!(config.feeds.xray_url.contains("swpc.noaa.gov"));
        assert_eq!(config.advisor.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let raw = r#"
[server]
addr = "127.0.0.1:9090"

[feeds]
xray_sample_stride = 30
"#;
        let config: ObservatoryConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.server.addr, "127.0.0.1:9090");
        assert_eq!(config.feeds.xray_sample_stride, 30);
        // Untouched sections keep their defaults.
        assert_eq!(config.feeds.xray_url, DEFAULT_XRAY_URL);
        assert_eq!(config.advisor.model, "gemini-2.5-flash");
    }
}
