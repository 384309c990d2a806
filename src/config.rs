use std::{env, time::Duration};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_OPENAI_API_KEY: &str = "openai_api_key";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub quests_collection: String,
    pub counters_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: String,
    pub openai_api_key: SecretString,
    pub openai_api_base: String,
    pub openai_model: String,
    pub model_timeout_secs: u64,
    pub model_connect_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "curiosity-quest-local".to_string()),
            quests_collection: env::var("QUESTS_COLLECTION")
                .unwrap_or_else(|_| "quests".to_string()),
            counters_collection: env::var("COUNTERS_COLLECTION")
                .unwrap_or_else(|_| "counters".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            openai_api_key: SecretString::from(
                env::var("OPENAI_API_KEY").unwrap_or_else(|_| DEFAULT_OPENAI_API_KEY.to_string()),
            ),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            model_timeout_secs: env::var("MODEL_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
            model_connect_timeout_secs: env::var("MODEL_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        }
    }

    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }

    pub fn model_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.model_connect_timeout_secs)
    }

    /// Fails when a setting the model pipeline cannot run without still holds its
    /// development default.
    pub fn validate_for_production(&self) -> AppResult<()> {
        let api_key = self.openai_api_key.expose_secret();

        if api_key == DEFAULT_OPENAI_API_KEY || api_key.trim().is_empty() {
            return Err(AppError::ConfigError(
                "OPENAI_API_KEY is not set. Export a valid API key before starting the server."
                    .to_string(),
            ));
        }

        if self.model_timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "MODEL_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "curiosity-quest-test".to_string(),
            quests_collection: "quests".to_string(),
            counters_collection: "counters".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: "http://localhost:5173".to_string(),
            openai_api_key: SecretString::from("test-openai-key".to_string()),
            openai_api_base: "http://127.0.0.1:1".to_string(),
            openai_model: "gpt-3.5-turbo".to_string(),
            model_timeout_secs: 5,
            model_connect_timeout_secs: 1,
        }
    }
}
