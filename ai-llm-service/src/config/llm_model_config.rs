use crate::config::model_id::ModelId;

/// Sampling temperature used for every analysis prompt.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Upper bound on tokens in a single model answer.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
/// Per-request network timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Attempts per request, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// OpenAI-compatible API root (without trailing `/chat/completions`).
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// HTTP(S) proxy the transport is routed through.
pub const DEFAULT_PROXY_URL: &str = "http://api.proxyapi.ru:3128";

/// Fixed instruction sent as the `system` message of every completion.
pub const SYSTEM_PROMPT: &str = "Ты - эксперт по анализу кода. Твоя задача - анализировать код и давать конкретные рекомендации. Всегда отвечай в формате JSON.";

/// Configuration of the remote model client.
///
/// Build it with [`ModelClientConfig::from_env`] (or `from_lookup` in tests);
/// construction fails if either credential is missing or the model is not
/// allow-listed.
///
/// # Fields
///
/// - `model`: allow-listed model identifier.
/// - `api_key`: model credential, sent as `Authorization: Bearer`.
/// - `base_url`: API root, e.g. `https://api.openai.com/v1`.
/// - `proxy_url` / `proxy_key`: proxy endpoint and its credential.
/// - `temperature`, `max_tokens`: sampling options sent with every request.
/// - `timeout_secs`: per-request timeout.
/// - `max_attempts`: transport retry budget (first try included).
/// - `accept_invalid_certs`: TLS verification switch, see below.
#[derive(Clone, PartialEq)]
pub struct ModelClientConfig {
    pub model: ModelId,
    pub api_key: String,
    pub base_url: String,
    pub proxy_url: String,
    pub proxy_key: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub max_attempts: u32,
    /// Certificate verification is disabled by default: the proxy terminates
    /// TLS with a certificate that does not chain to public roots. Set to
    /// `false` when calling the provider directly.
    pub accept_invalid_certs: bool,
}

impl std::fmt::Debug for ModelClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelClientConfig")
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("proxy_url", &self.proxy_url)
            .field("proxy_key", &"<redacted>")
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}
