//! Configuration types for the quest generator.
//!
//! All configuration is loaded from environment variables. The generator
//! needs to know which LLM backend to use (URL, API key, model); when no
//! backend is configured it runs offline and every call produces the
//! fallback quest.

use std::time::Duration;

use crate::error::GeneratorError;

/// Complete generator configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// LLM backend configuration. `None` means offline: every generation
    /// call degrades to the fallback quest.
    pub backend: Option<LlmBackendConfig>,
    /// Maximum time allowed for one generation request (HTTP + parsing).
    pub request_timeout: Duration,
    /// Path to the prompt templates directory.
    pub templates_dir: String,
}

/// Configuration for a single LLM backend.
#[derive(Debug, Clone)]
pub struct LlmBackendConfig {
    /// The backend type (openai-compatible or anthropic).
    pub backend_type: BackendType,
    /// Base API URL (e.g. `https://api.openai.com/v1`).
    pub api_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
}

/// Supported LLM backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// `OpenAI`-compatible chat completions API (works with `OpenAI`,
    /// `DeepSeek`, Ollama).
    OpenAi,
    /// Anthropic Messages API (different request format).
    Anthropic,
}

impl GeneratorConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `LLM_BACKEND` -- backend type (`openai` or `anthropic`);
    ///   unset means offline mode
    /// - `LLM_API_URL` -- API base URL (required when a backend is set)
    /// - `LLM_API_KEY` -- API key (required when a backend is set)
    /// - `LLM_MODEL` -- model name (required when a backend is set)
    /// - `LLM_REQUEST_TIMEOUT_MS` -- per-request deadline (default 10000)
    /// - `TEMPLATES_DIR` -- path to prompt templates (default `templates`)
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Config`] if `LLM_BACKEND` is set but the
    /// rest of the backend variables are missing or invalid.
    pub fn from_env() -> Result<Self, GeneratorError> {
        let backend = match std::env::var("LLM_BACKEND") {
            Ok(kind) => Some(load_backend_config(&kind)?),
            Err(_) => None,
        };

        let request_timeout_ms: u64 = std::env::var("LLM_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "10000".to_owned())
            .parse()
            .map_err(|e| GeneratorError::Config(format!("invalid LLM_REQUEST_TIMEOUT_MS: {e}")))?;

        let templates_dir =
            std::env::var("TEMPLATES_DIR").unwrap_or_else(|_| "templates".to_owned());

        Ok(Self {
            backend,
            request_timeout: Duration::from_millis(request_timeout_ms),
            templates_dir,
        })
    }
}

/// Read a required environment variable.
fn env_var(name: &str) -> Result<String, GeneratorError> {
    std::env::var(name)
        .map_err(|e| GeneratorError::Config(format!("missing required env var {name}: {e}")))
}

/// Build an LLM backend config from the `LLM_*` environment variables.
fn load_backend_config(kind: &str) -> Result<LlmBackendConfig, GeneratorError> {
    let backend_type = match kind.to_lowercase().as_str() {
        "openai" | "openai-compatible" | "ollama" | "deepseek" => BackendType::OpenAi,
        "anthropic" => BackendType::Anthropic,
        other => {
            return Err(GeneratorError::Config(format!(
                "unknown LLM_BACKEND: {other} (expected openai or anthropic)"
            )));
        }
    };

    Ok(LlmBackendConfig {
        backend_type,
        api_url: env_var("LLM_API_URL")?,
        api_key: env_var("LLM_API_KEY")?,
        model: env_var("LLM_MODEL")?,
    })
}
