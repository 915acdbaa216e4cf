use moka::future::Cache;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::{
    AddFavoriteRequest, BusinessType, BusinessTypesResponse, CsvExport, FavoriteRecord,
    FavoritesResponse, HealthStatus, SearchCriteria, SearchResponse,
};

/// How long a fetched business-type listing stays fresh.
const BUSINESS_TYPES_TTL: Duration = Duration::from_secs(300);

/// Client for the lead-generation backend API.
///
/// All search ranking, quality scoring and geocoding happen server-side;
/// this client only speaks the HTTP contract. Failures are returned to the
/// caller and never retried here.
#[derive(Clone)]
pub struct LeadApiClient {
    client: reqwest::Client,
    base_url: String,
    types_cache: Cache<(), Vec<BusinessType>>,
}

impl LeadApiClient {
    /// Creates a new `LeadApiClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the backend, without a trailing slash.
    /// * `timeout` - Per-request timeout.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let types_cache = Cache::builder()
            .time_to_live(BUSINESS_TYPES_TTL)
            .max_capacity(1)
            .build();

        Ok(Self {
            client,
            base_url,
            types_cache,
        })
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            config.backend_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Checks backend liveness via `GET /api/health`.
    pub async fn health(&self) -> Result<HealthStatus, AppError> {
        let url = format!("{}/api/health", self.base_url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Server {
                status: status.as_u16(),
                message: format!("Health check failed: {}", error_text),
            });
        }

        let data = response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("Failed to parse health response: {}", e)))?;

        Ok(data)
    }

    /// Fetches the selectable business categories via
    /// `GET /api/business-types`, with a short-TTL in-process cache so
    /// repeated lookups within a run hit the backend once.
    pub async fn business_types(&self) -> Result<Vec<BusinessType>, AppError> {
        self.types_cache
            .try_get_with((), self.fetch_business_types())
            .await
            .map_err(|e: Arc<AppError>| (*e).clone())
    }

    async fn fetch_business_types(&self) -> Result<Vec<BusinessType>, AppError> {
        let url = format!("{}/api/business-types", self.base_url);
        tracing::info!("Fetching business types from {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Server {
                status: status.as_u16(),
                message: format!("Business types fetch failed: {}", error_text),
            });
        }

        let data: BusinessTypesResponse = response.json().await.map_err(|e| {
            AppError::Decode(format!("Failed to parse business types response: {}", e))
        })?;

        Ok(data.business_types)
    }

    /// Runs a business search via `POST /api/search-businesses`.
    ///
    /// Criteria are validated client-side first; a rejected radius never
    /// reaches the network.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResponse, AppError> {
        criteria.validate()?;

        let url = format!("{}/api/search-businesses", self.base_url);
        tracing::info!(
            "Searching '{}' near '{}' within {} km",
            criteria.business_type,
            criteria.location,
            criteria.radius
        );

        let body = json!({
            "business_type": criteria.business_type,
            "location": criteria.location,
            "radius": criteria.radius,
        });

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Server {
                status: status.as_u16(),
                message: format!("Search failed: {}", error_text),
            });
        }

        let data: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("Failed to parse search response: {}", e)))?;

        tracing::info!("Search returned {} businesses", data.businesses.len());
        Ok(data)
    }

    /// Fetches the authoritative favorites list via `GET /api/favorites`.
    pub async fn favorites(&self) -> Result<Vec<FavoriteRecord>, AppError> {
        let url = format!("{}/api/favorites", self.base_url);
        tracing::debug!("Fetching favorites from {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Server {
                status: status.as_u16(),
                message: format!("Favorites fetch failed: {}", error_text),
            });
        }

        let data: FavoritesResponse = response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("Failed to parse favorites response: {}", e)))?;

        Ok(data.favorites)
    }

    /// Saves a business via `POST /api/favorites`.
    pub async fn add_favorite(&self, business_id: &str, user_id: &str) -> Result<(), AppError> {
        let url = format!("{}/api/favorites", self.base_url);
        tracing::info!("Adding business {} to favorites", business_id);

        let body = AddFavoriteRequest {
            business_id: business_id.to_string(),
            user_id: user_id.to_string(),
        };

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Server {
                status: status.as_u16(),
                message: format!("Add favorite failed: {}", error_text),
            });
        }

        Ok(())
    }

    /// Deletes a saved favorite via `DELETE /api/favorites/{favorite_id}`.
    pub async fn remove_favorite(&self, favorite_id: &str) -> Result<(), AppError> {
        let url = format!("{}/api/favorites/{}", self.base_url, favorite_id);
        tracing::info!("Removing favorite {}", favorite_id);

        let response = self.client.delete(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Server {
                status: status.as_u16(),
                message: format!("Remove favorite failed: {}", error_text),
            });
        }

        Ok(())
    }

    /// Fetches pre-formatted export data via `GET /api/export-csv`.
    pub async fn export_csv(
        &self,
        business_type: &str,
        min_quality_score: u8,
    ) -> Result<CsvExport, AppError> {
        // Build URL with proper parameter encoding
        let url = reqwest::Url::parse_with_params(
            &format!("{}/api/export-csv", self.base_url),
            &[
                ("business_type", business_type),
                ("min_quality_score", &min_quality_score.to_string()),
            ],
        )
        .map_err(|e| AppError::Internal(format!("Failed to build export URL: {}", e)))?;

        tracing::info!(
            "Exporting CSV for '{}' with min score {}",
            business_type,
            min_quality_score
        );

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Server {
                status: status.as_u16(),
                message: format!("CSV export failed: {}", error_text),
            });
        }

        let data: CsvExport = response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("Failed to parse export response: {}", e)))?;

        tracing::info!("Export returned {} rows", data.rows.len());
        Ok(data)
    }
}
