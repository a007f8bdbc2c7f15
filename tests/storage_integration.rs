use std::env;
use uuid::Uuid;

use lead_capture_api::db::Database;
use lead_capture_api::models::ConfirmationRequest;
use lead_capture_api::storage;

/// Integration smoke test for lead storage.
/// Marked ignored to avoid running against production by accident; set TEST_DATABASE_URL to run.
#[tokio::test]
#[ignore]
async fn insert_lead_smoke_test() -> anyhow::Result<()> {
    let db_url = env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .map_err(|_| anyhow::anyhow!("Set TEST_DATABASE_URL or DATABASE_URL to run this test"))?;

    let db = Database::new(&db_url).await?;

    // Unique email to avoid conflicts on repeated runs.
    let email = format!("jane+{}@x.com", Uuid::new_v4());
    let req = ConfirmationRequest {
        name: "Jane".to_string(),
        email: email.clone(),
        industry: "finance".to_string(),
    };

    let lead = storage::insert_lead(&db.pool, &req)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    assert_eq!(lead.name, "Jane");
    assert_eq!(lead.email, email.to_lowercase());
    assert_eq!(lead.industry, "finance");
    assert_ne!(lead.id, Uuid::nil());

    let counts = storage::industry_counts(&db.pool)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    assert!(counts.iter().any(|c| c.industry == "finance" && c.total >= 1));

    Ok(())
}
