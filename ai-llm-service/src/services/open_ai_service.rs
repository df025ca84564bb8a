//! OpenAI-compatible chat completion client.
//!
//! Minimal, non-streaming client around `POST {base_url}/chat/completions`,
//! routed through the configured HTTP(S) proxy.
//!
//! Constructor validation:
//! - both credentials must be present (enforced by [`ModelClientConfig`])
//! - `base_url` must start with http:// or https://
//! - the proxy URL must be accepted by `reqwest::Proxy`
//!
//! Transport failures are retried up to `max_attempts` times (first try
//! included). Prompts are side-effect-free reads, so repeating one is safe.

use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::{
    config::llm_model_config::{ModelClientConfig, SYSTEM_PROMPT},
    error_handler::{
        AiLlmError, ConfigError, ModelError, ProviderError, classify_status, classify_transport,
        validate_http_endpoint,
    },
    services::ChatCompletion,
};

/// Pause before retry `n` is `RETRY_BACKOFF * n`.
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Thin client for an OpenAI-compatible chat API.
///
/// Owns a preconfigured `reqwest::Client` (proxy, timeout, default headers).
/// The connection pool is released when the service is dropped, so no
/// explicit close is needed on any exit path.
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: ModelClientConfig,
    url_chat: String,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`] if `cfg.base_url` is not http(s)
    /// - [`ConfigError::Client`] if the proxy, headers or client cannot be built
    pub fn new(cfg: ModelClientConfig) -> Result<Self, AiLlmError> {
        let base = cfg.base_url.trim();
        validate_http_endpoint("AI_BASE_URL", base)?;

        let timeout = Duration::from_secs(cfg.timeout_secs);

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            bearer(&cfg.api_key, "invalid model credential header")?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let proxy = reqwest::Proxy::all(cfg.proxy_url.as_str())
            .map_err(|e| ConfigError::Client(format!("invalid proxy url: {e}")))?
            .custom_http_auth(bearer(&cfg.proxy_key, "invalid proxy credential header")?);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .proxy(proxy)
            .danger_accept_invalid_certs(cfg.accept_invalid_certs)
            .redirect(reqwest::redirect::Policy::limited(10))
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        let url_chat = format!("{}/chat/completions", base.trim_end_matches('/'));

        if cfg.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for the model client");
        }
        info!(
            model = %cfg.model,
            base_url = %cfg.base_url,
            proxy = %cfg.proxy_url,
            timeout_secs = cfg.timeout_secs,
            max_attempts = cfg.max_attempts,
            "OpenAiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &ModelClientConfig {
        &self.cfg
    }

    /// Sends `prompt` with the fixed system message, retrying transport failures.
    ///
    /// # Errors
    /// The last [`ModelError`] once the retry budget is spent, or the first
    /// non-retryable one (authentication, 4xx, undecodable body).
    pub async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        with_retries(self.cfg.max_attempts, RETRY_BACKOFF, |attempt| {
            self.generate_once(prompt, attempt)
        })
        .await
    }

    /// Performs exactly one `/chat/completions` round trip.
    async fn generate_once(&self, prompt: &str, attempt: u32) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let timeout = Duration::from_secs(self.cfg.timeout_secs);
        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            attempt,
            "POST {}", self.url_chat
        );

        let resp = self
            .client
            .post(&self.url_chat)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport(&e, timeout))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let err = classify_status(status, self.url_chat.clone(), &text);

            error!(
                %status,
                url = %self.url_chat,
                model = %self.cfg.model,
                attempt,
                latency_ms = started.elapsed().as_millis(),
                "chat completion returned non-success status"
            );
            return Err(err.into());
        }

        let out: ChatCompletionResponse = resp.json().await.map_err(|e| {
            error!(
                error = %e,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode chat completion response"
            );
            if e.is_timeout() {
                ModelError::Timeout(timeout)
            } else {
                ProviderError::Decode(format!(
                    "serde error: {e}; expected `choices[0].message.content`"
                ))
                .into()
            }
        })?;

        let content = first_content(out)
            .ok_or_else(|| ModelError::Provider(ProviderError::EmptyChoices))?;

        info!(
            model = %self.cfg.model,
            attempt,
            latency_ms = started.elapsed().as_millis(),
            answer_len = content.len(),
            "chat completion completed"
        );

        Ok(content)
    }
}

impl ChatCompletion for OpenAiService {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, AiLlmError>> + Send {
        self.generate(prompt)
    }
}

fn bearer(token: &str, what: &str) -> Result<header::HeaderValue, ConfigError> {
    header::HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| ConfigError::Client(format!("{what}: {e}")))
}

/// Content of the first choice that carries any.
fn first_content(resp: ChatCompletionResponse) -> Option<String> {
    resp.choices.into_iter().find_map(|c| c.message.content)
}

/// Runs `op` until it succeeds, fails with a non-retryable error, or
/// `max_attempts` tries have been made. `op` receives the 1-based attempt.
pub(crate) async fn with_retries<T, F, Fut>(
    max_attempts: u32,
    backoff: Duration,
    mut op: F,
) -> Result<T, AiLlmError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, AiLlmError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(v) => return Ok(v),
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                warn!(attempt, max_attempts, error = %e, "model call failed, retrying");
                tokio::time::sleep(backoff * attempt).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

impl<'a> ChatCompletionRequest<'a> {
    /// System instruction first, then the prompt as the user message.
    fn from_cfg(cfg: &'a ModelClientConfig, prompt: &'a str) -> Self {
        Self {
            model: cfg.model.as_str(),
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal response for `/chat/completions`.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}
