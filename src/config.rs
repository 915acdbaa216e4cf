use serde::Deserialize;

use crate::models::{FilterCriteria, LeadStatus};

/// Runtime configuration, loaded from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the lead-generation backend.
    pub backend_url: String,
    /// User identifier sent with favorite mutations.
    pub user_id: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Filter defaults applied at startup, before the user touches anything.
    pub default_filters: FilterCriteria,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            backend_url: std::env::var("BACKEND_URL")
                .map_err(|_| anyhow::anyhow!("BACKEND_URL environment variable required"))
                .and_then(|url| {
                    let url = url.trim().trim_end_matches('/').to_string();
                    if url.is_empty() {
                        anyhow::bail!("BACKEND_URL cannot be empty");
                    }
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("BACKEND_URL must start with http:// or https://");
                    }
                    // Reject anything url::Url cannot parse before reqwest sees it
                    url::Url::parse(&url)
                        .map_err(|e| anyhow::anyhow!("BACKEND_URL is not a valid URL: {}", e))?;
                    Ok(url)
                })?,
            user_id: std::env::var("USER_ID")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "default_user".to_string()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("REQUEST_TIMEOUT_SECS must be a valid number"))?,
            default_filters: FilterCriteria {
                min_quality_score: std::env::var("MIN_QUALITY_SCORE")
                    .unwrap_or_else(|_| "70".to_string())
                    .parse()
                    .map_err(|_| {
                        anyhow::anyhow!("MIN_QUALITY_SCORE must be an integer between 0 and 100")
                    })
                    .and_then(|score: u8| {
                        if score > 100 {
                            anyhow::bail!("MIN_QUALITY_SCORE must be between 0 and 100");
                        }
                        Ok(score)
                    })?,
                lead_status: match std::env::var("LEAD_STATUS") {
                    Ok(s) if !s.trim().is_empty() => Some(
                        s.parse::<LeadStatus>()
                            .map_err(|e| anyhow::anyhow!("LEAD_STATUS invalid: {}", e))?,
                    ),
                    _ => None,
                },
                has_contact: std::env::var("REQUIRE_CONTACT")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .map_err(|_| anyhow::anyhow!("REQUIRE_CONTACT must be true or false"))?,
            },
        };

        if config.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
        }

        // Log successful configuration load (no sensitive values here)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Backend URL: {}", config.backend_url);
        tracing::debug!("User ID: {}", config.user_id);
        tracing::debug!(
            "Default filters: min_quality_score={}, lead_status={:?}, has_contact={}",
            config.default_filters.min_quality_score,
            config.default_filters.lead_status,
            config.default_filters.has_contact
        );

        Ok(config)
    }
}
