//! Unified error handling for `ai-llm-service`.
//!
//! This module exposes a single top-level error type [`AiLlmError`] for the whole
//! library and groups domain-specific errors in nested enums ([`ConfigError`] for
//! start-up problems, [`ModelError`] for per-call transport failures). Small helpers
//! for reading/validating environment variables return the unified [`Result<T>`].
//!
//! All messages include the suffix `[AI LLM Service]` to simplify attribution in logs.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
///
/// `Config` is fatal and only produced while building a client. `Model` is
/// produced per call, after the transport retry budget has been spent.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Remote model call failed.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl AiLlmError {
    /// Whether another attempt of the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            AiLlmError::Config(_) => false,
            AiLlmError::Model(m) => m.is_retryable(),
        }
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Model identifier is not in the allow-list.
    #[error("[AI LLM Service] unsupported model `{model}`; available models: {available}")]
    UnsupportedModel {
        /// Requested identifier.
        model: String,
        /// Comma-separated allow-list.
        available: String,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `AI_BASE_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[AI LLM Service] {field} is out of range: {detail}")]
    OutOfRange {
        /// Field name (e.g., `temperature`).
        field: &'static str,
        /// Description of the expected range.
        detail: &'static str,
    },

    /// The HTTP client (proxy, TLS, headers) could not be built.
    #[error("[AI LLM Service] cannot build HTTP client: {0}")]
    Client(String),
}

/* ------------------------------------------------------------------------- */
/* Model errors                                                              */
/* ------------------------------------------------------------------------- */

/// Failure of a single chat completion call.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ModelError {
    /// Connection-level failure without an HTTP status (DNS/connect/reset).
    #[error("[AI LLM Service] network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout.
    #[error("[AI LLM Service] request timed out after {0:?}")]
    Timeout(Duration),

    /// Credentials were rejected by the proxy or the provider (401/403/407).
    #[error("[AI LLM Service] authentication failed: HTTP {status} from {url}: {snippet}")]
    Auth {
        /// HTTP status returned.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body.
        snippet: String,
    },

    /// Provider answered but the answer is unusable.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ModelError {
    /// Network, timeout, throttling and server-side failures are retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelError::Network(_) | ModelError::Timeout(_) => true,
            ModelError::Auth { .. } => false,
            ModelError::Provider(ProviderError::HttpStatus(h)) => {
                h.status == StatusCode::TOO_MANY_REQUESTS || h.status.is_server_error()
            }
            ModelError::Provider(_) => false,
        }
    }
}

/// Provider-level failure after a response was received.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Non-success HTTP status (other than authentication failures).
    #[error("[AI LLM Service] {0}")]
    HttpStatus(HttpError),

    /// Response body could not be decoded as a chat completion.
    #[error("[AI LLM Service] decode error: {0}")]
    Decode(String),

    /// The completion contained no choice with message content.
    #[error("[AI LLM Service] completion returned no choices with content")]
    EmptyChoices,
}

/// HTTP status details captured for diagnostics.
#[derive(Debug)]
pub struct HttpError {
    /// Numeric HTTP status code.
    pub status: StatusCode,
    /// Request URL.
    pub url: String,
    /// Short snippet of the response body (trimmed).
    pub snippet: String,
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {} from {}: {}", self.status, self.url, self.snippet)
    }
}

/// Classifies a `reqwest` failure into a [`ModelError`].
///
/// `timeout` is the configured per-request timeout, reported back on
/// [`ModelError::Timeout`].
pub fn classify_transport(e: &reqwest::Error, timeout: Duration) -> ModelError {
    if e.is_timeout() {
        return ModelError::Timeout(timeout);
    }
    if e.is_decode() {
        return ProviderError::Decode(e.to_string()).into();
    }
    ModelError::Network(e.to_string())
}

/// Classifies a non-success HTTP status into a [`ModelError`].
pub fn classify_status(status: StatusCode, url: String, body: &str) -> ModelError {
    let snippet = make_snippet(body);
    match status {
        StatusCode::UNAUTHORIZED
        | StatusCode::FORBIDDEN
        | StatusCode::PROXY_AUTHENTICATION_REQUIRED => ModelError::Auth {
            status,
            url,
            snippet,
        },
        _ => ProviderError::HttpStatus(HttpError {
            status,
            url,
            snippet,
        })
        .into(),
    }
}

/// Trims a response body to a single-line snippet suitable for logs.
pub fn make_snippet(body: &str) -> String {
    const MAX: usize = 200;
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX {
        flat
    } else {
        let mut s: String = flat.chars().take(MAX).collect();
        s.push('…');
        s
    }
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Fetches a required, non-empty variable through `lookup`.
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] if the variable is absent or empty.
pub fn must_var<F>(lookup: &F, name: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Fetches an optional variable (`None` if unset/empty).
pub fn opt_var<F>(lookup: &F, name: &'static str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an optional `u32` (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u32`.
pub fn opt_u32<F>(lookup: &F, name: &'static str) -> Result<Option<u32>>
where
    F: Fn(&str) -> Option<String>,
{
    match opt_var(lookup, name) {
        Some(v) => v.parse::<u32>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        }),
        None => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers (return unified `Result<T>`)                           */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start with a
/// valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Validates that a floating-point value lies within an inclusive range.
///
/// # Errors
/// Returns [`ConfigError::OutOfRange`] if `value` is outside `[min, max]`.
pub fn validate_range_f32(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            detail: "expected value in inclusive range",
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_are_not_retryable() {
        let e = classify_status(StatusCode::UNAUTHORIZED, "u".into(), "denied");
        assert!(matches!(e, ModelError::Auth { .. }));
        assert!(!e.is_retryable());
    }

    #[test]
    fn server_and_throttle_statuses_are_retryable() {
        assert!(classify_status(StatusCode::BAD_GATEWAY, "u".into(), "").is_retryable());
        assert!(classify_status(StatusCode::TOO_MANY_REQUESTS, "u".into(), "").is_retryable());
        assert!(!classify_status(StatusCode::BAD_REQUEST, "u".into(), "").is_retryable());
    }

    #[test]
    fn snippet_is_flattened_and_bounded() {
        let body = format!("line one\n  line two {}", "x".repeat(500));
        let s = make_snippet(&body);
        assert!(s.starts_with("line one line two"));
        assert!(s.chars().count() <= 201);
    }

    #[test]
    fn lookup_helpers() {
        let lookup = |name: &str| match name {
            "SET" => Some(" value ".to_string()),
            "BLANK" => Some("   ".to_string()),
            "NUM" => Some("42".to_string()),
            "BAD" => Some("4x".to_string()),
            _ => None,
        };
        assert_eq!(must_var(&lookup, "SET").unwrap(), "value");
        assert!(must_var(&lookup, "BLANK").is_err());
        assert_eq!(opt_var(&lookup, "MISSING"), None);
        assert_eq!(opt_u32(&lookup, "NUM").unwrap(), Some(42));
        assert!(opt_u32(&lookup, "BAD").is_err());
    }

    #[test]
    fn endpoint_and_range_validation() {
        assert!(validate_http_endpoint("X", "https://a").is_ok());
        assert!(validate_http_endpoint("X", "ftp://a").is_err());
        assert!(validate_range_f32("t", 0.7, 0.0, 2.0).is_ok());
        assert!(validate_range_f32("t", f32::NAN, 0.0, 2.0).is_err());
    }
}
