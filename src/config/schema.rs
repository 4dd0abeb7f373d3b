//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config
//! file, and every field has a default so a minimal (or absent) file works.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the forum server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ForumConfig {
    /// Listener configuration (bind address, TLS material).
    pub listener: ListenerConfig,

    /// Request admission control. The only tunables of the core.
    pub rate_limit: RateLimitConfig,

    /// Static asset directories.
    pub assets: AssetConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// TLS configuration. The server is HTTPS-only.
    pub tls: TlsConfig,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: TlsConfig::default(),
        }
    }
}

/// TLS material paths for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_path: "./tls/cert.pem".to_string(),
            key_path: "./tls/key.pem".to_string(),
        }
    }
}

/// Rate limiting configuration: a fixed-window threshold.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum requests admitted per client per window.
    pub max_requests: u32,

    /// Window duration in seconds.
    pub window_secs: u64,
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 30,
            window_secs: 60,
        }
    }
}

/// Directories backing the static asset routes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory served under `/css/`.
    pub css_dir: String,

    /// Directory served under `/web/images/`.
    pub images_dir: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            css_dir: "./web/css".to_string(),
            images_dir: "./web/images".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_deployed_layout() {
        let config = ForumConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.listener.tls.cert_path, "./tls/cert.pem");
        assert_eq!(config.listener.tls.key_path, "./tls/key.pem");
        assert_eq!(config.rate_limit.max_requests, 30);
        assert_eq!(config.rate_limit.window(), Duration::from_secs(60));
        assert_eq!(config.assets.css_dir, "./web/css");
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: ForumConfig = toml::from_str(
            r#"
            [rate_limit]
            max_requests = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
