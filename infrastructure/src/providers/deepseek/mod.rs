//! DeepSeek LLM gateway
//!
//! Talks to an OpenAI-compatible chat-completions endpoint with native tool
//! calling. DeepSeek is the default backend; any service exposing the same
//! wire format works by pointing `base_url` elsewhere.

mod session;
mod types;

pub use session::DeepseekSession;

use crate::config::FileProviderConfig;
use async_trait::async_trait;
use maestro_application::{GatewayError, LlmGateway, LlmSession};
use maestro_domain::Model;

/// Gateway creating chat-completions sessions against one endpoint.
#[derive(Debug)]
pub struct DeepseekGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DeepseekGateway {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build a gateway from the `[provider]` config section, reading the API
    /// key from the configured environment variable.
    pub fn from_config(config: &FileProviderConfig) -> Result<Self, GatewayError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| GatewayError::MissingApiKey(config.api_key_env.clone()))?;
        Ok(Self::new(&config.base_url, api_key))
    }
}

#[async_trait]
impl LlmGateway for DeepseekGateway {
    async fn create_session(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(DeepseekSession::new(
            self.client.clone(),
            format!("{}/chat/completions", self.base_url),
            self.api_key.clone(),
            model.clone(),
            system_prompt,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let gateway = DeepseekGateway::new("https://api.deepseek.com/", "key");
        assert_eq!(gateway.base_url, "https://api.deepseek.com");
    }

    #[test]
    fn test_from_config_requires_api_key_env() {
        let config = FileProviderConfig {
            api_key_env: "MAESTRO_TEST_KEY_THAT_DOES_NOT_EXIST".to_string(),
            ..FileProviderConfig::default()
        };
        let err = DeepseekGateway::from_config(&config).unwrap_err();
        assert!(matches!(err, GatewayError::MissingApiKey(_)));
    }
}
