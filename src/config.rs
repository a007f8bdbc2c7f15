use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub generation_base_url: String,
    pub generation_api_key: String,
    pub generation_model: String,
    pub email_base_url: String,
    pub email_api_key: String,
    pub email_from: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DATABASE_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            generation_base_url: std::env::var("GENERATION_BASE_URL")
                .map_err(|_| anyhow::anyhow!("GENERATION_BASE_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("GENERATION_BASE_URL cannot be empty");
                    }
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("GENERATION_BASE_URL must start with http:// or https://");
                    }
                    Ok(url)
                })?,
            generation_api_key: std::env::var("GENERATION_API_KEY")
                .map_err(|_| anyhow::anyhow!("GENERATION_API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("GENERATION_API_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            generation_model: std::env::var("GENERATION_MODEL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "gpt-4o-mini".to_string()),
            email_base_url: std::env::var("EMAIL_BASE_URL")
                .map_err(|_| anyhow::anyhow!("EMAIL_BASE_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("EMAIL_BASE_URL cannot be empty");
                    }
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("EMAIL_BASE_URL must start with http:// or https://");
                    }
                    Ok(url)
                })?,
            email_api_key: std::env::var("EMAIL_API_KEY")
                .map_err(|_| anyhow::anyhow!("EMAIL_API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("EMAIL_API_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            email_from: std::env::var("EMAIL_FROM")
                .map_err(|_| anyhow::anyhow!("EMAIL_FROM environment variable required"))
                .and_then(|from| {
                    if from.trim().is_empty() {
                        anyhow::bail!("EMAIL_FROM cannot be empty");
                    }
                    Ok(from)
                })?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!(
            "Database URL: {}...",
            &config.database_url[..20.min(config.database_url.len())]
        );
        tracing::debug!("Generation Base URL: {}", config.generation_base_url);
        tracing::debug!("Generation Model: {}", config.generation_model);
        tracing::debug!("Email Base URL: {}", config.email_base_url);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}
