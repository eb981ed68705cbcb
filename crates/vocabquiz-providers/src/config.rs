//! Provider configuration and factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use vocabquiz_core::traits::{AnswerOracle, ExampleGenerator, VocabGenerator};

use crate::gemini::GeminiProvider;
use crate::openai::OpenAiProvider;

/// Configuration for a single language-model provider.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Gemini {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        model: Option<String>,
    },
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        org_id: Option<String>,
        #[serde(default)]
        model: Option<String>,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Gemini {
                api_key: _,
                base_url,
                model,
            } => f
                .debug_struct("Gemini")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("model", model)
                .finish(),
            ProviderConfig::OpenAI {
                api_key: _,
                base_url,
                org_id,
                model,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("org_id", org_id)
                .field("model", model)
                .finish(),
        }
    }
}

/// Top-level vocabquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabquizConfig {
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Default provider to use.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Max retries on provider errors.
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Delay between retries in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_retries() -> u32 {
    2
}
fn default_retry_delay() -> u64 {
    500
}

impl Default for VocabquizConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            max_retries: default_retries(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Resolve env vars in a provider config.
fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::Gemini {
            api_key,
            base_url,
            model,
        } => ProviderConfig::Gemini {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            model: model.clone(),
        },
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
            model,
        } => ProviderConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            org_id: org_id.as_ref().map(|o| resolve_env_vars(o)),
            model: model.clone(),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `vocabquiz.toml` in the current directory
/// 2. `~/.config/vocabquiz/config.toml`
///
/// Environment variable overrides: `VOCABQUIZ_GEMINI_KEY`, `VOCABQUIZ_OPENAI_KEY`.
pub fn load_config() -> Result<VocabquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<VocabquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("vocabquiz.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<VocabquizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => VocabquizConfig::default(),
    };

    // Apply env var overrides
    if let Ok(key) = std::env::var("VOCABQUIZ_GEMINI_KEY") {
        config
            .providers
            .entry("gemini".into())
            .or_insert(ProviderConfig::Gemini {
                api_key: String::new(),
                base_url: None,
                model: None,
            });
        if let Some(ProviderConfig::Gemini { api_key, .. }) = config.providers.get_mut("gemini") {
            *api_key = key;
        }
    }

    if let Ok(key) = std::env::var("VOCABQUIZ_OPENAI_KEY") {
        config
            .providers
            .entry("openai".into())
            .or_insert(ProviderConfig::OpenAI {
                api_key: String::new(),
                base_url: None,
                org_id: None,
                model: None,
            });
        if let Some(ProviderConfig::OpenAI { api_key, .. }) = config.providers.get_mut("openai") {
            *api_key = key;
        }
    }

    // Resolve env vars in all provider configs
    let resolved: HashMap<String, ProviderConfig> = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();
    config.providers = resolved;

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("vocabquiz"))
}

/// One backend wearing all three quiz hats.
#[derive(Clone)]
pub struct QuizBackend {
    pub oracle: Arc<dyn AnswerOracle>,
    pub examples: Arc<dyn ExampleGenerator>,
    pub vocab: Arc<dyn VocabGenerator>,
}

impl std::fmt::Debug for QuizBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizBackend")
            .field("oracle", &self.oracle.name())
            .finish_non_exhaustive()
    }
}

/// Create a backend from a named provider configuration.
pub fn create_backend(name: &str, config: &VocabquizConfig) -> Result<QuizBackend> {
    let provider = config
        .providers
        .get(name)
        .with_context(|| format!("provider '{name}' is not configured"))?;

    match provider {
        ProviderConfig::Gemini {
            api_key,
            base_url,
            model,
        } => {
            if api_key.is_empty() {
                anyhow::bail!("provider '{name}' has no API key configured");
            }
            let p = Arc::new(GeminiProvider::new(
                api_key,
                base_url.clone(),
                model.clone(),
            ));
            Ok(QuizBackend {
                oracle: p.clone(),
                examples: p.clone(),
                vocab: p,
            })
        }
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
            model,
        } => {
            if api_key.is_empty() {
                anyhow::bail!("provider '{name}' has no API key configured");
            }
            let p = Arc::new(OpenAiProvider::new(
                api_key,
                base_url.clone(),
                org_id.clone(),
                model.clone(),
            ));
            Ok(QuizBackend {
                oracle: p.clone(),
                examples: p.clone(),
                vocab: p,
            })
        }
    }
}
