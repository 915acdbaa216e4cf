//! Favorites synchronizer.
//!
//! Keeps a favorite-id to business mapping in step with the server by
//! re-fetching the authoritative list after every mutation. There is no
//! optimistic local merge: a failed call leaves local state untouched, and
//! the full re-read after each write keeps the client from diverging from
//! the server's source of truth.
//!
//! Re-fetches carry a monotonically increasing sequence number. A stale
//! re-fetch response that arrives after a newer one has been applied is
//! discarded, so interleaved mutations always settle on the most recent
//! successfully fetched server state.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::api_client::LeadApiClient;
use crate::errors::{AppError, ResultExt};
use crate::models::{BusinessRecord, FavoriteRecord};

#[derive(Debug, Default)]
struct FavoritesInner {
    entries: BTreeMap<String, FavoriteRecord>,
    /// Highest re-fetch sequence handed out.
    issued: u64,
    /// Sequence of the last applied re-fetch.
    applied: u64,
}

/// Reconciles local favorites state with server-confirmed records.
pub struct FavoritesSync {
    client: Arc<LeadApiClient>,
    user_id: String,
    inner: Mutex<FavoritesInner>,
}

impl FavoritesSync {
    pub fn new(client: Arc<LeadApiClient>, user_id: impl Into<String>) -> Self {
        Self {
            client,
            user_id: user_id.into(),
            inner: Mutex::new(FavoritesInner::default()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FavoritesInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reserves the next re-fetch sequence number.
    ///
    /// Exposed separately from [`FavoritesSync::apply_refresh`] so the
    /// fetch itself can happen outside any lock; [`FavoritesSync::refresh`]
    /// is the usual entry point.
    pub fn begin_refresh(&self) -> u64 {
        let mut inner = self.lock();
        inner.issued += 1;
        inner.issued
    }

    /// Applies a fetched favorites payload for the given sequence number.
    ///
    /// Returns whether the payload was applied; payloads at or below the
    /// last applied sequence are discarded so older responses never
    /// overwrite newer data.
    pub fn apply_refresh(&self, seq: u64, records: Vec<FavoriteRecord>) -> bool {
        let mut inner = self.lock();
        if seq <= inner.applied {
            tracing::debug!(
                "Discarding stale favorites re-fetch (seq {}, applied {})",
                seq,
                inner.applied
            );
            return false;
        }
        inner.applied = seq;
        inner.entries = records
            .into_iter()
            .map(|r| (r.favorite_id.clone(), r))
            .collect();
        true
    }

    /// Re-fetches the authoritative favorites list and applies it, unless a
    /// newer re-fetch has been applied in the meantime. Returns whether the
    /// fetched payload was applied. A fetch failure leaves local state
    /// untouched.
    pub async fn refresh(&self) -> Result<bool, AppError> {
        let seq = self.begin_refresh();
        let records = self
            .client
            .favorites()
            .await
            .context("refreshing favorites")?;
        Ok(self.apply_refresh(seq, records))
    }

    /// Saves a business server-side, then re-reads the full list.
    ///
    /// A failed create call changes nothing locally; the error is returned
    /// for the caller to surface.
    pub async fn add(&self, business: &BusinessRecord) -> Result<(), AppError> {
        self.add_by_id(&business.id).await
    }

    /// Saves a business by its identifier, then re-reads the full list.
    pub async fn add_by_id(&self, business_id: &str) -> Result<(), AppError> {
        self.client
            .add_favorite(business_id, &self.user_id)
            .await
            .context("adding favorite")?;
        self.refresh().await?;
        Ok(())
    }

    /// Deletes a saved favorite server-side, then re-reads the full list.
    ///
    /// A failed delete call changes nothing locally.
    pub async fn remove(&self, favorite_id: &str) -> Result<(), AppError> {
        self.client
            .remove_favorite(favorite_id)
            .await
            .context("removing favorite")?;
        self.refresh().await?;
        Ok(())
    }

    /// Looks up a favorite by its server-assigned identifier.
    pub fn get(&self, favorite_id: &str) -> Option<FavoriteRecord> {
        self.lock().entries.get(favorite_id).cloned()
    }

    /// Current favorites, ordered by favorite identifier.
    pub fn snapshot(&self) -> Vec<FavoriteRecord> {
        self.lock().entries.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadStatus;
    use std::time::Duration;

    fn favorite(fav_id: &str, business_id: &str) -> FavoriteRecord {
        FavoriteRecord {
            favorite_id: fav_id.to_string(),
            business: BusinessRecord {
                id: business_id.to_string(),
                name: format!("Business {}", business_id),
                business_type: "saas".to_string(),
                address: "1 Main St".to_string(),
                phone: Some("555-0100".to_string()),
                website: None,
                email: None,
                lat: 37.0,
                lon: -122.0,
                quality_score: 80,
                lead_status: LeadStatus::Hot,
                last_updated: None,
            },
        }
    }

    fn sync() -> FavoritesSync {
        let client = Arc::new(
            LeadApiClient::new("http://localhost:1".to_string(), Duration::from_secs(1))
                .expect("client"),
        );
        FavoritesSync::new(client, "default_user")
    }

    #[test]
    fn stale_refresh_does_not_overwrite_newer_payload() {
        let favorites = sync();
        let seq1 = favorites.begin_refresh();
        let seq2 = favorites.begin_refresh();

        // The second mutation's re-fetch lands first.
        assert!(favorites.apply_refresh(seq2, vec![favorite("f2", "b2")]));
        // The first one arrives late and must be dropped.
        assert!(!favorites.apply_refresh(seq1, vec![favorite("f1", "b1")]));

        let snapshot = favorites.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].favorite_id, "f2");
    }

    #[test]
    fn refresh_replaces_entire_mapping() {
        let favorites = sync();
        let seq = favorites.begin_refresh();
        assert!(favorites.apply_refresh(seq, vec![favorite("f1", "b1"), favorite("f2", "b2")]));
        assert_eq!(favorites.len(), 2);

        let seq = favorites.begin_refresh();
        assert!(favorites.apply_refresh(seq, vec![favorite("f3", "b3")]));
        assert_eq!(favorites.len(), 1);
        assert!(favorites.get("f1").is_none());
        assert_eq!(favorites.get("f3").unwrap().business.id, "b3");
    }
}
