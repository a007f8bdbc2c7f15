use crate::email::{self, EmailClient};
use crate::errors::AppError;
use crate::generation::GenerationClient;
use crate::models::{ConfirmationRequest, Lead};
use crate::storage;
use sqlx::PgPool;

/// Subject line for every confirmation email.
pub const CONFIRMATION_SUBJECT: &str = "Thanks for getting in touch";

/// Pipeline stages, in execution order.
///
/// The flow is linear: Validated → Generated → Persisted → Sent → Done.
/// Only the delivery stage short-circuits the invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Generation,
    Persistence,
    Delivery,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Generation => "generation",
            Stage::Persistence => "persistence",
            Stage::Delivery => "delivery",
        }
    }
}

/// Result of one pipeline invocation.
///
/// An outcome exists only if the email was submitted; delivery failure is
/// returned as an error instead. Non-fatal stage failures are recorded here.
#[derive(Debug, Default)]
pub struct ConfirmationOutcome {
    /// The stored lead, if persistence succeeded.
    pub lead: Option<Lead>,
    /// Generation stage error, if the personalized text was substituted.
    pub generation_error: Option<String>,
    /// Persistence stage error, if the lead row was not created.
    pub persistence_error: Option<String>,
    /// Provider message id for the submitted email, if reported.
    pub message_id: Option<String>,
}

/// The confirmation pipeline: generate, persist, render, send.
///
/// Stateless across invocations; each run owns its request/response lifecycle
/// exclusively. The three external calls are independent and non-atomic: no
/// retries, no compensation, no transaction spans them.
pub struct ConfirmationPipeline<'a> {
    pub db: &'a PgPool,
    pub generation: &'a GenerationClient,
    pub email: &'a EmailClient,
}

impl ConfirmationPipeline<'_> {
    /// Runs the pipeline for one validated submission.
    ///
    /// 1. Request personalized text (choice index 0; failure substitutes an
    ///    empty string and is recorded, never fatal).
    /// 2. Insert the lead. Failure is recorded but the email is still
    ///    attempted: a lost row must not also cost the lead their
    ///    confirmation, and the failure is surfaced to the caller.
    /// 3. Render the HTML body (newlines become `<br>`).
    /// 4. Submit the email exactly once. This is the only fatal stage.
    ///
    /// # Arguments
    ///
    /// * `req` - A submission that already passed validation.
    ///
    /// # Returns
    ///
    /// * `Result<ConfirmationOutcome, AppError>` - The outcome, or a
    ///   `DeliveryFailure` if the email could not be submitted.
    pub async fn run(&self, req: &ConfirmationRequest) -> Result<ConfirmationOutcome, AppError> {
        let mut outcome = ConfirmationOutcome::default();

        // Stage 1: generation (non-fatal)
        let personalized = match self.generation.personalize(&req.name, &req.industry).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(stage = Stage::Generation.as_str(), "⚠️  {}", e);
                outcome.generation_error = Some(e.to_string());
                String::new()
            }
        };

        // Stage 2: persistence (reported, does not block delivery)
        match storage::insert_lead(self.db, req).await {
            Ok(lead) => outcome.lead = Some(lead),
            Err(e) => {
                tracing::error!(stage = Stage::Persistence.as_str(), "❌ {}", e);
                outcome.persistence_error = Some(e.to_string());
            }
        }

        // Stage 3: render
        let body = email::html_body(req.name.trim(), &personalized);

        // Stage 4: delivery (fatal, exactly one send)
        let message_id = self
            .email
            .send(req.email.trim(), CONFIRMATION_SUBJECT, &body)
            .await?;
        outcome.message_id = message_id;

        tracing::info!(
            "✅ Confirmation pipeline done: persisted={}, generated={}",
            outcome.persistence_error.is_none(),
            outcome.generation_error.is_none()
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_identify_the_origin() {
        assert_eq!(Stage::Generation.as_str(), "generation");
        assert_eq!(Stage::Persistence.as_str(), "persistence");
        assert_eq!(Stage::Delivery.as_str(), "delivery");
    }
}
