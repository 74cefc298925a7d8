// ── Core error types ──
//
// User-facing errors from powerctl-core. These are NOT transport-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<powerctl_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// A reference-bearing wire field whose shape is ambiguous: an inline
/// object that carries no `resource_uri`.
///
/// The only failure mode of flatten/hydrate -- the codec does data shaping,
/// not validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("reference field {field:?} is an inline object with no resource_uri")]
pub struct ShapeError {
    pub field: &'static str,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The outlet was hydrated without a `resource_uri`, so there is no
    /// sub-resource endpoint to persist to.
    #[error("Outlet {identifier:?} has no resource_uri to persist to")]
    OutletNotPersistable { identifier: String },

    #[error("Cannot connect to manager at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<powerctl_api::Error> for CoreError {
    fn from(err: powerctl_api::Error) -> Self {
        match err {
            powerctl_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            powerctl_api::Error::InvalidUrl(e) => CoreError::Internal(format!("invalid URL: {e}")),
            powerctl_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            powerctl_api::Error::Api { message, status } => CoreError::Api {
                message,
                status: Some(status),
            },
            powerctl_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("deserialization error: {message}"))
            }
        }
    }
}
