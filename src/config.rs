use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-5.1-codex-preview";

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    pub client_dir: PathBuf,
    pub use_mock_ai: bool,
    pub openai: OpenAiConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process env.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let openai = OpenAiConfig {
            // an empty key counts as no key
            api_key: var("OPENAI_API_KEY").filter(|v| !v.trim().is_empty()),
            base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into()),
            model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into()),
        };
        let port = match var("PORT") {
            Some(v) => v.parse::<u16>().with_context(|| format!("invalid PORT {v:?}"))?,
            None => 5050,
        };
        Ok(Self {
            host: var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            data_path: var("DATA_PATH")
                .unwrap_or_else(|| "data/entries.json".into())
                .into(),
            client_dir: var("CLIENT_DIR").unwrap_or_else(|| "client".into()).into(),
            use_mock_ai: var("USE_MOCK_AI").is_some_and(|v| v == "true"),
            openai,
        })
    }

    /// Mock analysis is used when forced or when there is no provider credential.
    pub fn mock_mode(&self) -> bool {
        self.use_mock_ai || self.openai.api_key.is_none()
    }
}
