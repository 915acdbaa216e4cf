//! Application context: the one object that owns the stores, the API client
//! and the presentational state, passed explicitly instead of living in
//! ambient globals.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::api_client::LeadApiClient;
use crate::config::Config;
use crate::errors::AppError;
use crate::export;
use crate::favorites::FavoritesSync;
use crate::filter::{self, StatusTally};
use crate::models::{FilterCriteria, SearchCriteria};
use crate::store::ResultStore;
use crate::theme::Theme;

/// Which sidebar tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    #[default]
    Search,
    Favorites,
}

#[derive(Debug, Default)]
struct UiState {
    theme: Theme,
    active_tab: ActiveTab,
}

/// Outcome of a completed search, for the caller to present.
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    /// Records fetched from the backend.
    pub fetched: usize,
    /// Size of the qualified subset after filtering.
    pub qualified: usize,
    /// Whether this completion was applied, or discarded because a newer
    /// search superseded it.
    pub applied: bool,
}

impl SearchOutcome {
    /// Zero records came back. A valid outcome, not an error; the user is
    /// always notified of it.
    pub fn is_empty(&self) -> bool {
        self.fetched == 0
    }
}

/// Owns all client-side state for one user session.
///
/// Each store has exactly one owner; nothing reaches into another
/// component's state directly.
pub struct AppContext {
    config: Config,
    client: Arc<LeadApiClient>,
    store: ResultStore,
    favorites: FavoritesSync,
    ui: Mutex<UiState>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = Arc::new(LeadApiClient::from_config(&config)?);
        let store = ResultStore::new(config.default_filters);
        let favorites = FavoritesSync::new(Arc::clone(&client), config.user_id.clone());
        Ok(Self {
            config,
            client,
            store,
            favorites,
            ui: Mutex::new(UiState::default()),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &LeadApiClient {
        &self.client
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn favorites(&self) -> &FavoritesSync {
        &self.favorites
    }

    /// Runs a search end to end: clears stale results, issues the request,
    /// and applies the completion unless a newer search superseded it.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<SearchOutcome, AppError> {
        criteria.validate()?;

        let ticket = self.store.begin_search();
        // Stale markers must not linger while the search is pending.
        self.store.clear();

        let response = self.client.search(criteria).await?;

        let fetched = response.businesses.len();
        let applied =
            self.store
                .complete_search(ticket, response.businesses, Some(response.search_location));
        let qualified = self.store.snapshot().qualified.len();

        Ok(SearchOutcome {
            fetched,
            qualified,
            applied,
        })
    }

    /// Replaces the filter criteria and returns the new qualified count.
    pub fn set_filter(&self, criteria: FilterCriteria) -> usize {
        self.store.set_filter(criteria);
        self.store.snapshot().qualified.len()
    }

    /// Per-status counts over the current qualified subset.
    pub fn qualified_tally(&self) -> StatusTally {
        filter::tally(&self.store.snapshot().qualified)
    }

    /// Fetches export data for the given business type using the current
    /// minimum quality score, and writes the CSV file into `out_dir`.
    pub async fn export_csv(
        &self,
        business_type: &str,
        out_dir: &Path,
    ) -> Result<PathBuf, AppError> {
        let min_score = self.store.snapshot().criteria.min_quality_score;
        let payload = self.client.export_csv(business_type, min_score).await?;
        export::write_csv(&payload, out_dir).await
    }

    fn ui(&self) -> std::sync::MutexGuard<'_, UiState> {
        self.ui.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn theme(&self) -> Theme {
        self.ui().theme
    }

    pub fn set_theme(&self, theme: Theme) {
        self.ui().theme = theme;
    }

    pub fn toggle_theme(&self) -> Theme {
        let mut ui = self.ui();
        ui.theme = match ui.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        ui.theme
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.ui().active_tab
    }

    pub fn set_active_tab(&self, tab: ActiveTab) {
        self.ui().active_tab = tab;
    }
}
