//! Startup error chain.

use thiserror::Error;

/// Errors that abort server startup.
///
/// Exactly one of these is reported out of `main`; there is no partial
/// start. Request-path rejections are not errors and never appear here.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("TLS error: {0}")]
    Tls(#[from] crate::net::TlsError),

    #[error("invalid bind address {addr}: {source}")]
    BindAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
