//! Environment-backed configuration.

use std::env;
use std::path::PathBuf;

use crate::error::{NauvooError, Result};

const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
const DEFAULT_WEATHER_ENDPOINT: &str = "http://api.weatherapi.com/v1";
const DEFAULT_IMAGE_DIR: &str = "images";

/// Which chat backend to talk to.
#[derive(Debug, Clone, PartialEq)]
pub enum Backend {
    Ollama { base_url: String, model: String },
    OpenAi { api_key: String, model: String },
}

/// Runtime configuration, resolved from the environment.
///
/// `from_env` loads a `.env` file when present, then reads:
/// `CHAT_BACKEND` (`ollama` | `openai`, default `ollama`), `OLLAMA_ENDPOINT`,
/// `OLLAMA_MODEL`, `OPENAI_API_KEY`, `OPENAI_MODEL`, `MODEL_TEMPERATURE`,
/// `WEATHER_API_KEY`, `WEATHER_API_ENDPOINT`, `IMAGE_API_ENDPOINT`,
/// `IMAGE_OUTPUT_DIR`.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Backend,
    pub temperature: Option<f64>,
    pub weather_api_key: Option<String>,
    pub weather_endpoint: String,
    pub image_endpoint: Option<String>,
    pub image_output_dir: PathBuf,
}

impl Config {
    /// Resolve configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let backend = match env::var("CHAT_BACKEND").as_deref() {
            Ok("openai") => Backend::OpenAi {
                api_key: env::var("OPENAI_API_KEY").map_err(|_| {
                    NauvooError::Configuration(
                        "CHAT_BACKEND=openai requires OPENAI_API_KEY".into(),
                    )
                })?,
                model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            },
            Ok("ollama") | Err(_) => Backend::Ollama {
                base_url: env_or("OLLAMA_ENDPOINT", DEFAULT_OLLAMA_ENDPOINT),
                model: env_or("OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL),
            },
            Ok(other) => {
                return Err(NauvooError::Configuration(format!(
                    "unknown CHAT_BACKEND '{other}' (expected 'ollama' or 'openai')"
                )))
            }
        };

        let temperature = match env::var("MODEL_TEMPERATURE") {
            Ok(raw) => Some(raw.parse::<f64>().map_err(|_| {
                NauvooError::Configuration(format!("MODEL_TEMPERATURE '{raw}' is not a number"))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            backend,
            temperature,
            weather_api_key: env::var("WEATHER_API_KEY").ok(),
            weather_endpoint: env_or("WEATHER_API_ENDPOINT", DEFAULT_WEATHER_ENDPOINT),
            image_endpoint: env::var("IMAGE_API_ENDPOINT").ok(),
            image_output_dir: PathBuf::from(env_or("IMAGE_OUTPUT_DIR", DEFAULT_IMAGE_DIR)),
        })
    }

    /// Config pointed at a local Ollama endpoint, independent of the env.
    pub fn ollama(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            backend: Backend::Ollama {
                base_url: base_url.into(),
                model: model.into(),
            },
            temperature: None,
            weather_api_key: None,
            weather_endpoint: DEFAULT_WEATHER_ENDPOINT.to_string(),
            image_endpoint: None,
            image_output_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_weather_api_key(mut self, key: impl Into<String>) -> Self {
        self.weather_api_key = Some(key.into());
        self
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
