use axum::{
    routing::{get, post},
    Router,
};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lead_capture_api::config::Config;
use lead_capture_api::db::Database;
use lead_capture_api::email::EmailClient;
use lead_capture_api::generation::GenerationClient;
use lead_capture_api::handlers::{self, AppState};

/// Main entry point for the application.
///
/// Initializes logging, configuration, the database pool, the external API
/// clients, and the HTTP routes with their middleware (CORS, rate limiting,
/// request body limit), then starts the Axum server.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok if the server runs successfully, or an error if initialization fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_capture_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Initialize database connection pool
    let db = Database::new(&config.database_url).await?;
    tracing::info!("Database connection pool established");

    // In-flight submission cache: suppresses concurrent duplicate submissions
    // for the same email. 60 second TTL covers any single pipeline run.
    let in_flight = Cache::builder()
        .time_to_live(Duration::from_secs(60))
        .max_capacity(10_000)
        .build();
    tracing::info!("In-flight submission cache initialized");

    // External API clients
    let generation = GenerationClient::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize generation client: {}", e))?;
    tracing::info!("✓ Generation client initialized: {}", config.generation_base_url);

    let email = EmailClient::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize email client: {}", e))?;
    tracing::info!("✓ Email client initialized: {}", config.email_base_url);

    // Build application state
    let app_state = Arc::new(AppState {
        db: db.pool.clone(),
        config: config.clone(),
        generation,
        email,
        in_flight,
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    // Build protected routes with security layers
    let protected_routes = Router::new()
        .route("/", get(handlers::capture_form))
        .route("/dashboard", get(handlers::dashboard))
        .route("/api/v1/confirmations", post(handlers::confirm_lead))
        .layer(
            ServiceBuilder::new()
                // Request size limit: form submissions are tiny
                .layer(RequestBodyLimitLayer::new(32 * 1024))
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    // Build final app with health check (bypasses rate limiting)
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
