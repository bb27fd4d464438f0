//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (or an explicit path), then applies `DATACHAT_LOG_LEVEL` and
//! `DATACHAT_ANSWER_ENDPOINT` env overrides.

use std::{
    env,
    fs,
    path::Path,
};

use serde::Deserialize;

use crate::error::AppError;
use crate::logger;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Texts shown by the conversation controller.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Seeded system message every new transcript starts with.
    pub greeting: String,
    /// Transient entry rendered while an answer is pending.
    pub processing_text: String,
    /// System message appended when the answering call fails.
    pub fallback_text: String,
}

/// Answering service configuration (`[answer]`).
#[derive(Debug, Clone)]
pub struct AnswerConfig {
    /// Which provider is active (`"http"` or `"dummy"`).
    /// Maps to `default` in `[answer]` TOML.
    pub provider: String,
    /// Full URL the question is POSTed to.
    pub endpoint: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// Host plugin packaging (`[plugin]`).
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Debug packaging appends `_DEBUG` to the registry key.
    pub debug: bool,
}

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_name: String,
    pub log_level: String,
    pub chat: ChatConfig,
    pub answer: AnswerConfig,
    pub plugin: PluginConfig,
}

/// Raw TOML shape: `serde` target before resolution.
#[derive(Deserialize)]
struct RawConfig {
    chat: RawChat,
    #[serde(default)]
    answer: RawAnswer,
    #[serde(default)]
    plugin: RawPlugin,
}

#[derive(Deserialize)]
struct RawChat {
    bot_name: String,
    log_level: String,
    #[serde(default = "default_greeting")]
    greeting: String,
    #[serde(default = "default_processing_text")]
    processing_text: String,
    #[serde(default = "default_fallback_text")]
    fallback_text: String,
}

#[derive(Deserialize)]
struct RawAnswer {
    /// Maps to `default = "..."` in `[answer]`.
    #[serde(rename = "default", default = "default_answer_provider")]
    provider: String,
    #[serde(default = "default_answer_endpoint")]
    endpoint: String,
    #[serde(default = "default_answer_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawAnswer {
    fn default() -> Self {
        Self {
            provider: default_answer_provider(),
            endpoint: default_answer_endpoint(),
            timeout_seconds: default_answer_timeout_seconds(),
        }
    }
}

#[derive(Deserialize, Default)]
struct RawPlugin {
    #[serde(default)]
    debug: bool,
}

fn default_greeting() -> String { "Olá! Sou o chatbot de dados. Como posso ajudar?".to_string() }
fn default_processing_text() -> String { "Processando sua pergunta...".to_string() }
fn default_fallback_text() -> String { "Desculpe, ocorreu um erro ao processar sua pergunta.".to_string() }
fn default_answer_provider() -> String { "http".to_string() }
fn default_answer_endpoint() -> String {
    "https://chatbot-api-hs3febfij-guilhermealvees-projects.vercel.app/consulta".to_string()
}
fn default_answer_timeout_seconds() -> u64 { 30 }

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            processing_text: default_processing_text(),
            fallback_text: default_fallback_text(),
        }
    }
}

/// Load config from `path` (or `config/default.toml`), then apply env-var overrides.
pub fn load(path: Option<&str>) -> Result<Config, AppError> {
    let log_level_override = env::var("DATACHAT_LOG_LEVEL").ok();
    let endpoint_override = env::var("DATACHAT_ANSWER_ENDPOINT").ok();
    load_from(
        Path::new(path.unwrap_or(DEFAULT_CONFIG_PATH)),
        log_level_override.as_deref(),
        endpoint_override.as_deref(),
    )
}

/// Internal loader: accepts an explicit path and optional overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(
    path: &Path,
    log_level_override: Option<&str>,
    endpoint_override: Option<&str>,
) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    let c = parsed.chat;
    let a = parsed.answer;

    if a.timeout_seconds == 0 {
        return Err(AppError::Config("answer.timeout_seconds must be greater than zero".into()));
    }

    let log_level = log_level_override.unwrap_or(&c.log_level).to_string();
    logger::parse_level(&log_level)
        .map_err(|e| AppError::Config(format!("chat.log_level: {e}")))?;

    Ok(Config {
        bot_name: c.bot_name,
        log_level,
        chat: ChatConfig {
            greeting: c.greeting,
            processing_text: c.processing_text,
            fallback_text: c.fallback_text,
        },
        answer: AnswerConfig {
            provider: a.provider,
            endpoint: endpoint_override.unwrap_or(&a.endpoint).to_string(),
            timeout_seconds: a.timeout_seconds,
        },
        plugin: PluginConfig {
            debug: parsed.plugin.debug,
        },
    })
}
