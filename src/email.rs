use crate::config::Config;
use crate::errors::AppError;
use crate::models::{EmailSendRequest, EmailSendResponse};
use std::time::Duration;

/// Client for the transactional Email Delivery Service.
#[derive(Clone)]
pub struct EmailClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    from: String,
}

/// Builds the confirmation email HTML body.
///
/// Every newline in the generated text becomes a `<br>` tag. An empty
/// personalized text produces a body with no placeholder artifacts.
pub fn html_body(name: &str, personalized: &str) -> String {
    let personalized_html = personalized.replace('\n', "<br>");

    let middle = if personalized_html.is_empty() {
        String::new()
    } else {
        format!("<p>{}</p>", personalized_html)
    };

    format!(
        "<html><body>\
         <p>Hi {},</p>\
         {}\
         <p>Thanks for reaching out. We received your details and will be in touch shortly.</p>\
         </body></html>",
        name, middle
    )
}

impl EmailClient {
    /// Creates a new `EmailClient`.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::DeliveryFailure(format!("Failed to create email client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.email_base_url.clone(),
            api_key: config.email_api_key.clone(),
            from: config.email_from.clone(),
        })
    }

    /// Submits one confirmation email for delivery.
    ///
    /// Called exactly once per pipeline invocation. A non-2xx response is a
    /// delivery failure, which is fatal to the invocation.
    ///
    /// # Arguments
    ///
    /// * `to` - The recipient address.
    /// * `subject` - The email subject line.
    /// * `html` - The HTML body.
    ///
    /// # Returns
    ///
    /// * `Result<Option<String>, AppError>` - The provider message id, if any.
    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<Option<String>, AppError> {
        let url = format!("{}/emails", self.base_url);
        tracing::info!("Submitting confirmation email to {}", to);

        let body = EmailSendRequest {
            from: self.from.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::DeliveryFailure(format!("Email request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::DeliveryFailure(format!(
                "Email service returned {}: {}",
                status, error_text
            )));
        }

        let ack: EmailSendResponse = response.json().await.unwrap_or(EmailSendResponse {
            id: None,
        });

        tracing::info!("✓ Confirmation email submitted (id: {:?})", ack.id);
        Ok(ack.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newlines_become_br_tags() {
        let body = html_body("Jane", "Welcome!\nGreat to meet you.\nTalk soon.");
        assert!(body.contains("Welcome!<br>Great to meet you.<br>Talk soon."));
        assert!(!body.contains('\n'));
    }

    #[test]
    fn empty_text_produces_clean_body() {
        let body = html_body("Jane", "");
        assert!(body.contains("Hi Jane,"));
        assert!(!body.contains("undefined"));
        assert!(!body.contains("<p></p>"));
    }

    #[test]
    fn name_is_embedded() {
        let body = html_body("Jane", "hello");
        assert!(body.contains("Hi Jane,"));
        assert!(body.contains("<p>hello</p>"));
    }
}
