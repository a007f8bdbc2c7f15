use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============ Database Models ============

/// A captured lead as stored in the `leads` table.
///
/// Created once per form submission, never mutated, never deleted.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lead {
    /// Unique identifier for the lead.
    pub id: Uuid,
    /// Name as submitted through the capture form.
    pub name: String,
    /// Lowercased, validated email address.
    pub email: String,
    /// Industry the lead selected.
    pub industry: String,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Per-industry lead count, feeding the dashboard chart.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IndustryCount {
    pub industry: String,
    pub total: i64,
}

// ============ API Models ============

/// Payload for one confirmation pipeline invocation.
///
/// Ephemeral: lives only for the duration of the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    pub name: String,
    pub email: String,
    pub industry: String,
}

/// Response returned to the capture form.
#[derive(Debug, Serialize)]
pub struct ConfirmationResponse {
    /// True only if the confirmation email was submitted for delivery.
    pub success: bool,
    /// Human-readable status message.
    pub message: String,
    /// Set when a non-fatal stage failed (e.g. the lead row was not stored).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

// ============ Text Generation Service Wire Types ============

/// Chat-completions style request body.
#[derive(Debug, Serialize)]
pub struct GenerationApiRequest {
    pub model: String,
    pub messages: Vec<GenerationMessage>,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationMessage {
    pub role: String,
    /// Absent or null content is tolerated and treated as empty.
    pub content: Option<String>,
}

/// Chat-completions style response body.
///
/// Candidate completions are addressed by index; the pipeline reads index 0.
#[derive(Debug, Deserialize)]
pub struct GenerationApiResponse {
    #[serde(default)]
    pub choices: Vec<GenerationChoice>,
}

#[derive(Debug, Deserialize)]
pub struct GenerationChoice {
    pub message: GenerationMessage,
}

// ============ Email Delivery Service Wire Types ============

/// Transactional email send payload.
#[derive(Debug, Serialize)]
pub struct EmailSendRequest {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Provider acknowledgment for a submitted email.
#[derive(Debug, Deserialize)]
pub struct EmailSendResponse {
    pub id: Option<String>,
}
