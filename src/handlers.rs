use crate::config::Config;
use crate::email::EmailClient;
use crate::errors::AppError;
use crate::generation::GenerationClient;
use crate::models::{ConfirmationRequest, ConfirmationResponse};
use crate::pipeline::ConfirmationPipeline;
use crate::{render, storage, validation};
use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Utc;
use moka::future::Cache;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Application configuration.
    pub config: Config,
    /// Client for the Text Generation Service.
    pub generation: GenerationClient,
    /// Client for the Email Delivery Service.
    pub email: EmailClient,
    /// In-flight submission cache keyed by normalized email.
    /// Suppresses concurrent duplicate submissions so a double dispatch never
    /// produces two lead rows or two emails.
    pub in_flight: Cache<String, i64>,
}

/// Health check endpoint.
///
/// Returns the service status, version, and health information.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "lead-capture-api",
            "version": "0.1.0"
        })),
    )
}

/// GET /
///
/// Serves the lead-capture form page.
pub async fn capture_form() -> Html<&'static str> {
    Html(render::FORM_PAGE)
}

/// GET /dashboard
///
/// Renders the ancillary per-industry lead chart.
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let counts = storage::industry_counts(&state.db).await?;
    Ok(Html(render::dashboard_page(&counts)))
}

/// POST /api/v1/confirmations
///
/// Runs the confirmation pipeline for one lead submission.
///
/// Flow:
/// 1. Validate the payload (non-empty name, email shape, non-empty industry).
/// 2. Suppress a concurrent duplicate for the same email (in-flight cache).
/// 3. Run the pipeline: generate → persist → render → send.
/// 4. Map the outcome: delivery failure is the only overall failure;
///    a persistence failure is surfaced as a warning on a success response.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `payload` - JSON body containing the submission.
///
/// # Returns
///
/// * `Result<impl IntoResponse, AppError>` - The confirmation response or an error.
pub async fn confirm_lead(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ConfirmationRequest>,
) -> Result<(StatusCode, Json<ConfirmationResponse>), AppError> {
    tracing::info!("📨 Received lead submission: industry={}", payload.industry);

    validation::validate_request(&payload)?;

    // Concurrent duplicate suppression: second rapid submission for the same
    // email gets a response without running the pipeline again.
    let key = validation::submission_key(&payload);
    if state.in_flight.contains_key(&key) {
        tracing::warn!("⚠️  Submission already in flight for {}", key);
        return Ok((
            StatusCode::OK,
            Json(ConfirmationResponse {
                success: false,
                message: "This submission is already being processed".to_string(),
                warning: None,
            }),
        ));
    }
    state.in_flight.insert(key.clone(), Utc::now().timestamp()).await;

    let pipeline = ConfirmationPipeline {
        db: &state.db,
        generation: &state.generation,
        email: &state.email,
    };
    let result = pipeline.run(&payload).await;

    // Release the key before propagating any error so the user can retry.
    state.in_flight.invalidate(&key).await;
    let outcome = result?;

    let warning = outcome
        .persistence_error
        .map(|_| "Lead record could not be stored".to_string());

    Ok((
        StatusCode::CREATED,
        Json(ConfirmationResponse {
            success: true,
            message: "Confirmation email sent".to_string(),
            warning,
        }),
    ))
}
