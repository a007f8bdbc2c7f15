use crate::config::Config;
use crate::errors::AppError;
use crate::models::{GenerationApiRequest, GenerationApiResponse, GenerationMessage};
use std::time::Duration;

/// Client for the Text Generation Service (chat-completions style API).
#[derive(Clone)]
pub struct GenerationClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GenerationClient {
    /// Creates a new `GenerationClient`.
    ///
    /// The base URL comes from configuration so tests can point the client at
    /// a mock server.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::GenerationFailure(format!("Failed to create generation client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.generation_base_url.clone(),
            api_key: config.generation_api_key.clone(),
            model: config.generation_model.clone(),
        })
    }

    /// Requests one personalized welcome text for a lead.
    ///
    /// Reads the completion at index 0. A response with no choices, or with
    /// absent/empty content at index 0, yields an empty string rather than an
    /// error; only transport and non-2xx failures are reported.
    ///
    /// # Arguments
    ///
    /// * `name` - The lead's name.
    /// * `industry` - The industry the lead selected.
    ///
    /// # Returns
    ///
    /// * `Result<String, AppError>` - The personalized text (possibly empty).
    pub async fn personalize(&self, name: &str, industry: &str) -> Result<String, AppError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        tracing::info!("Requesting personalized text for industry: {}", industry);

        let body = GenerationApiRequest {
            model: self.model.clone(),
            messages: vec![
                GenerationMessage {
                    role: "system".to_string(),
                    content: Some(
                        "You write short, warm welcome messages for new marketing leads. \
                         Two or three sentences, plain text."
                            .to_string(),
                    ),
                },
                GenerationMessage {
                    role: "user".to_string(),
                    content: Some(format!(
                        "Write a welcome message for {} who works in the {} industry.",
                        name, industry
                    )),
                },
            ],
            max_tokens: 200,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::GenerationFailure(format!("Generation request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::GenerationFailure(format!(
                "Generation service returned {}: {}",
                status, error_text
            )));
        }

        let data: GenerationApiResponse = response.json().await.map_err(|e| {
            AppError::GenerationFailure(format!("Failed to parse generation response: {}", e))
        })?;

        // Index 0 is the only choice this service consumes. Later indices may
        // or may not exist and must never be read.
        let text = data
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        if text.is_empty() {
            tracing::warn!("Generation response carried no usable content, using empty text");
        } else {
            tracing::info!("✓ Personalized text generated ({} chars)", text.len());
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: &str) -> Config {
        Config {
            database_url: "postgresql://test".to_string(),
            port: 8080,
            generation_base_url: base_url.to_string(),
            generation_api_key: "test_key".to_string(),
            generation_model: "test-model".to_string(),
            email_base_url: "http://localhost".to_string(),
            email_api_key: "test_key".to_string(),
            email_from: "hello@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = GenerationClient::new(&test_config("https://example.com"));
        assert!(client.is_ok());
    }
}
