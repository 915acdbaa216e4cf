use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

// ============ Domain Models ============

/// Lead priority tag assigned by the backend.
///
/// The backend derives this from the quality score; `unqualified` is emitted
/// for very low scores and is filterable like any other status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    /// High sales urgency.
    Hot,
    /// Medium sales urgency.
    Warm,
    /// Low sales urgency.
    Cold,
    /// Below the backend's qualification cutoff.
    Unqualified,
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LeadStatus::Hot => "hot",
            LeadStatus::Warm => "warm",
            LeadStatus::Cold => "cold",
            LeadStatus::Unqualified => "unqualified",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for LeadStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hot" => Ok(LeadStatus::Hot),
            "warm" => Ok(LeadStatus::Warm),
            "cold" => Ok(LeadStatus::Cold),
            "unqualified" => Ok(LeadStatus::Unqualified),
            other => Err(AppError::BadRequest(format!(
                "Unknown lead status '{}' (expected hot, warm, cold or unqualified)",
                other
            ))),
        }
    }
}

/// A single business returned by the search endpoint.
///
/// Immutable once received; ranking, scoring and geocoding all happen
/// server-side and are only consumed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    /// Unique identifier within a result set.
    pub id: String,
    /// Display name of the business.
    pub name: String,
    /// Business category tag (e.g., "restaurant", "saas").
    pub business_type: String,
    /// Postal address.
    pub address: String,
    /// Phone number, if known.
    pub phone: Option<String>,
    /// Website URL, if known.
    pub website: Option<String>,
    /// Email address, if known.
    pub email: Option<String>,
    /// Latitude of the business location.
    pub lat: f64,
    /// Longitude of the business location.
    pub lon: f64,
    /// Lead desirability score, 0-100, computed by the backend.
    pub quality_score: u8,
    /// Lead priority tag.
    pub lead_status: LeadStatus,
    /// Timestamp of the last backend update for this record.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl BusinessRecord {
    /// Whether at least one contact channel (phone or email) is present.
    ///
    /// Empty and whitespace-only values count as absent.
    pub fn has_contact(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.phone) || filled(&self.email)
    }
}

/// A user-saved business, persisted server-side.
///
/// Created by a successful add call, destroyed by a successful remove call,
/// never mutated otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    /// Server-assigned favorite identifier.
    pub favorite_id: String,
    /// The favorited business.
    #[serde(flatten)]
    pub business: BusinessRecord,
}

/// Resolved coordinates of the last successful search, used to re-center
/// the map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchLocation {
    pub lat: f64,
    pub lon: f64,
}

/// A selectable business category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessType {
    /// Machine value sent in search requests.
    pub value: String,
    /// Human-readable label.
    pub label: String,
}

// ============ Search & Filter Criteria ============

/// Parameters for a business search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Category tag, or a free-text override.
    pub business_type: String,
    /// Location query string (city, state or zip).
    pub location: String,
    /// Search radius in kilometers, 1-50 inclusive.
    pub radius: u32,
}

/// Inclusive radius bounds accepted by the search form.
pub const MIN_RADIUS_KM: u32 = 1;
pub const MAX_RADIUS_KM: u32 = 50;

impl SearchCriteria {
    /// Validates the criteria before any network call is made.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.location.trim().is_empty() {
            return Err(AppError::BadRequest("Location cannot be empty".to_string()));
        }
        if self.business_type.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Business type cannot be empty".to_string(),
            ));
        }
        if self.radius < MIN_RADIUS_KM || self.radius > MAX_RADIUS_KM {
            return Err(AppError::BadRequest(format!(
                "Radius must be between {} and {} km, got {}",
                MIN_RADIUS_KM, MAX_RADIUS_KM, self.radius
            )));
        }
        Ok(())
    }

    /// Applies a free-text category override, lower-cased and trimmed,
    /// matching the custom search box behavior. Blank overrides keep the
    /// preset value.
    pub fn with_custom_type(mut self, custom: &str) -> Self {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            self.business_type = trimmed.to_lowercase();
        }
        self
    }
}

/// Client-side filter narrowing a fetched result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Inclusive lower bound on the quality score.
    pub min_quality_score: u8,
    /// Restrict to a single lead status; `None` means no restriction.
    pub lead_status: Option<LeadStatus>,
    /// Require at least one contact channel (phone or email).
    pub has_contact: bool,
}

impl Default for FilterCriteria {
    /// The search form defaults: score 70+, any status, contact required.
    fn default() -> Self {
        Self {
            min_quality_score: 70,
            lead_status: None,
            has_contact: true,
        }
    }
}

// ============ Wire Models ============

/// Response body of `POST /api/search-businesses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The fetched result set.
    pub businesses: Vec<BusinessRecord>,
    /// Coordinates the location query resolved to.
    pub search_location: SearchLocation,
    /// Total count as reported by the backend.
    #[serde(default)]
    pub total: Option<usize>,
    /// Backend status message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body of `GET /api/favorites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<FavoriteRecord>,
    #[serde(default)]
    pub total: Option<usize>,
}

/// Response body of `GET /api/business-types`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessTypesResponse {
    pub business_types: Vec<BusinessType>,
}

/// Request body of `POST /api/favorites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFavoriteRequest {
    pub business_id: String,
    pub user_id: String,
}

/// Response body of `GET /api/export-csv`.
///
/// The backend ships pre-formatted cells; the client only assembles and
/// quotes the CSV text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvExport {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub filename: String,
    #[serde(default)]
    pub total: Option<usize>,
}

/// Response body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}
