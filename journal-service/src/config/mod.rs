use journal_core::config as core_config;
use journal_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct JournalConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub generation: GenerationConfig,
    pub firestore: FirestoreConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: String,
    /// When false (dev/test), mock providers replace the Google APIs.
    pub enabled: bool,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Generative model for the callable endpoint (e.g. gemini-2.0-flash).
    pub text_model: String,
}

/// Fixed generation parameters, read once at startup.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub max_output_tokens: i32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: i32,
}

#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub database: String,
    pub access_token: String,
    /// When false (dev/test), a recording in-memory store replaces Firestore.
    pub enabled: bool,
}

impl JournalConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(JournalConfig {
            common: common_config,
            google: GoogleConfig {
                api_key: get_env("GOOGLE_API_KEY", Some(""), is_prod)?,
                enabled: get_env("GOOGLE_ENABLED", Some("true"), is_prod)? == "true",
            },
            models: ModelConfig {
                text_model: get_env("GENAI_TEXT_MODEL", Some("gemini-2.0-flash"), is_prod)?,
            },
            generation: GenerationConfig {
                max_output_tokens: parse_env("GENAI_MAX_OUTPUT_TOKENS", 256, is_prod)?,
                temperature: parse_env("GENAI_TEMPERATURE", 0.5, is_prod)?,
                top_p: parse_env("GENAI_TOP_P", 0.8, is_prod)?,
                top_k: parse_env("GENAI_TOP_K", 40, is_prod)?,
            },
            firestore: FirestoreConfig {
                project_id: get_env("GCLOUD_PROJECT", Some("demo-project"), is_prod)?,
                database: get_env("FIRESTORE_DATABASE", Some("(default)"), is_prod)?,
                access_token: get_env("FIRESTORE_ACCESS_TOKEN", Some(""), is_prod)?,
                enabled: get_env("FIRESTORE_ENABLED", Some("true"), is_prod)? == "true",
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_env<T: std::str::FromStr + std::fmt::Display>(
    key: &str,
    default: T,
    is_prod: bool,
) -> Result<T, AppError> {
    let raw = get_env(key, Some(&default.to_string()), is_prod)?;
    raw.parse().map_err(|_| {
        AppError::ConfigError(anyhow::anyhow!("{} has an invalid value: {}", key, raw))
    })
}
