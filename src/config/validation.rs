//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (threshold and window strictly positive)
//! - Check the bind addresses actually parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure: ForumConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::ForumConfig;

/// A single semantic problem found in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem.
pub fn validate_config(config: &ForumConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".into(),
            message: format!("not a valid socket address: {:?}", config.listener.bind_address),
        });
    }
    if config.listener.tls.cert_path.is_empty() {
        errors.push(ValidationError {
            field: "listener.tls.cert_path".into(),
            message: "must not be empty".into(),
        });
    }
    if config.listener.tls.key_path.is_empty() {
        errors.push(ValidationError {
            field: "listener.tls.key_path".into(),
            message: "must not be empty".into(),
        });
    }

    if config.rate_limit.max_requests == 0 {
        errors.push(ValidationError {
            field: "rate_limit.max_requests".into(),
            message: "must be at least 1".into(),
        });
    }
    if config.rate_limit.window_secs == 0 {
        errors.push(ValidationError {
            field: "rate_limit.window_secs".into(),
            message: "must be at least 1".into(),
        });
    }

    if config.assets.css_dir.is_empty() {
        errors.push(ValidationError {
            field: "assets.css_dir".into(),
            message: "must not be empty".into(),
        });
    }
    if config.assets.images_dir.is_empty() {
        errors.push(ValidationError {
            field: "assets.images_dir".into(),
            message: "must not be empty".into(),
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address".into(),
            message: format!(
                "not a valid socket address: {:?}",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ForumConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error_not_just_the_first() {
        let mut config = ForumConfig::default();
        config.rate_limit.max_requests = 0;
        config.rate_limit.window_secs = 0;
        config.listener.bind_address = "not-an-address".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"rate_limit.max_requests"));
        assert!(fields.contains(&"rate_limit.window_secs"));
        assert!(fields.contains(&"listener.bind_address"));
    }

    #[test]
    fn metrics_address_is_only_checked_when_enabled() {
        let mut config = ForumConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
