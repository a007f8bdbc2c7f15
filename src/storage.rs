use crate::errors::AppError;
use crate::models::{ConfirmationRequest, IndustryCount, Lead};
use sqlx::PgPool;
use uuid::Uuid;

/// Inserts one lead row.
///
/// At most one row is created per successful pipeline invocation; rows are
/// never updated or deleted by this service. The creation timestamp is
/// assigned by the database.
pub async fn insert_lead(pool: &PgPool, req: &ConfirmationRequest) -> Result<Lead, AppError> {
    let lead = sqlx::query_as::<_, Lead>(
        r#"
        INSERT INTO leads (id, name, email, industry)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, industry, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.name.trim())
    .bind(req.email.trim().to_lowercase())
    .bind(req.industry.trim())
    .fetch_one(pool)
    .await?;

    tracing::info!("✓ Lead stored: {} ({})", lead.id, lead.email);
    Ok(lead)
}

/// Lead counts grouped by industry, most popular first.
pub async fn industry_counts(pool: &PgPool) -> Result<Vec<IndustryCount>, AppError> {
    let counts = sqlx::query_as::<_, IndustryCount>(
        r#"
        SELECT industry, COUNT(*) AS total
        FROM leads
        GROUP BY industry
        ORDER BY total DESC, industry ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(counts)
}
