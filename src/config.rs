use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable the API key falls back to when not configured
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub llm: LlmConfig,
    pub interview: InterviewConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Chat-completions endpoint (OpenAI-compatible)
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,

    /// Extra attempts after a 503 while the model loads
    pub max_retries: u32,

    /// Wait before the first retry; doubled for each later one
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InterviewConfig {
    pub num_initial_questions: usize,
    pub num_followup_questions: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract executable (name on PATH or absolute path)
    pub binary: String,
    pub languages: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "project-interviewer".to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.7,
            timeout_secs: 60,
            max_retries: 1,
            retry_delay_ms: 20_000,
        }
    }
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            num_initial_questions: 3,
            num_followup_questions: 2,
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary: "tesseract".to_string(),
            languages: vec!["eng".to_string()],
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the optional file at `path`
    /// (any extension the `config` crate understands), then
    /// `INTERVIEWER_*` environment variables (`__` separates sections).
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("INTERVIEWER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path))?;

        let mut cfg: Config = settings
            .try_deserialize()
            .context("Invalid configuration")?;

        if cfg.llm.api_key.is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                cfg.llm.api_key = key;
            }
        }

        Ok(cfg)
    }
}
