//! Model client config loaded strictly from environment variables.
//!
//! # Environment variables
//!
//! - `OPENAI_API_KEY` = model credential (mandatory)
//! - `PROXYAPI_KEY`   = proxy credential (mandatory)
//! - `AI_MODEL`       = allow-listed model id (optional, default `gpt-4.1`)
//! - `AI_BASE_URL`    = API root (optional, default `https://api.openai.com/v1`)
//! - `PROXYAPI_URL`   = proxy endpoint (optional, default `http://api.proxyapi.ru:3128`)
//! - `LLM_MAX_TOKENS` = optional max tokens override (u32)

use crate::{
    config::{
        llm_model_config::{
            DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_TOKENS, DEFAULT_PROXY_URL,
            DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS, ModelClientConfig,
        },
        model_id::ModelId,
    },
    error_handler::{
        Result, must_var, opt_u32, opt_var, validate_http_endpoint, validate_range_f32,
    },
};

impl ModelClientConfig {
    /// Reads the config from the process environment.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingVar`](crate::error_handler::ConfigError::MissingVar)
    ///   if a credential is missing
    /// - [`ConfigError::UnsupportedModel`](crate::error_handler::ConfigError::UnsupportedModel)
    ///   if `AI_MODEL` is not allow-listed
    /// - [`ConfigError::InvalidFormat`](crate::error_handler::ConfigError::InvalidFormat)
    ///   for non-http(s) URLs
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = must_var(&lookup, "OPENAI_API_KEY")?;
        let proxy_key = must_var(&lookup, "PROXYAPI_KEY")?;

        let model = match opt_var(&lookup, "AI_MODEL") {
            Some(m) => m.parse::<ModelId>()?,
            None => ModelId::default(),
        };

        let base_url = opt_var(&lookup, "AI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        validate_http_endpoint("AI_BASE_URL", &base_url)?;

        let proxy_url = opt_var(&lookup, "PROXYAPI_URL").unwrap_or_else(|| DEFAULT_PROXY_URL.into());
        validate_http_endpoint("PROXYAPI_URL", &proxy_url)?;

        let max_tokens = opt_u32(&lookup, "LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS);

        let cfg = Self {
            model,
            api_key,
            base_url,
            proxy_url,
            proxy_key,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            accept_invalid_certs: true,
        };
        validate_range_f32("temperature", cfg.temperature, 0.0, 2.0)?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error_handler::{AiLlmError, ConfigError};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_are_applied() {
        let cfg = ModelClientConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PROXYAPI_KEY", "px-test"),
        ]))
        .unwrap();

        assert_eq!(cfg.model, ModelId::Gpt41);
        assert_eq!(cfg.temperature, 0.7);
        assert_eq!(cfg.max_tokens, 1000);
        assert_eq!(cfg.timeout_secs, 60);
        assert_eq!(cfg.max_attempts, 3);
        assert!(cfg.accept_invalid_certs);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn missing_proxy_key_is_a_config_error() {
        let err = ModelClientConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk")]))
            .unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::MissingVar("PROXYAPI_KEY"))
        ));
    }

    #[test]
    fn missing_model_key_is_a_config_error() {
        let err =
            ModelClientConfig::from_lookup(lookup_from(&[("PROXYAPI_KEY", "px")])).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::MissingVar("OPENAI_API_KEY"))
        ));
    }

    #[test]
    fn unsupported_model_is_rejected() {
        let err = ModelClientConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk"),
            ("PROXYAPI_KEY", "px"),
            ("AI_MODEL", "llama3"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::UnsupportedModel { .. })
        ));
    }

    #[test]
    fn overrides_are_read() {
        let cfg = ModelClientConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk"),
            ("PROXYAPI_KEY", "px"),
            ("AI_MODEL", "gpt-4o"),
            ("LLM_MAX_TOKENS", "512"),
            ("AI_BASE_URL", "http://localhost:9000/v1"),
        ]))
        .unwrap();
        assert_eq!(cfg.model, ModelId::Gpt4o);
        assert_eq!(cfg.max_tokens, 512);
        assert_eq!(cfg.base_url, "http://localhost:9000/v1");
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let cfg = ModelClientConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-secret"),
            ("PROXYAPI_KEY", "px-secret"),
        ]))
        .unwrap();
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("sk-secret"));
        assert!(!dbg.contains("px-secret"));
    }
}
