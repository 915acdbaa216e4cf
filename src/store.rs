//! Reactive store for search results and the derived qualified subset.
//!
//! The store owns the raw result set, the last search location and the filter
//! criteria, and recomputes the qualified subset through a single shared path
//! whenever either input changes. Result sets are a few hundred records at
//! most, so recomputation is a full pass rather than incremental.
//!
//! Completions of in-flight searches are guarded by a monotonically
//! increasing ticket: a slow response whose ticket has been superseded is
//! discarded instead of clobbering fresher results.

use std::sync::{Mutex, PoisonError};

use crate::filter;
use crate::models::{BusinessRecord, FilterCriteria, SearchLocation};

/// Ticket identifying one issued search. Obtained from
/// [`ResultStore::begin_search`] and redeemed in
/// [`ResultStore::complete_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// A read-consistent snapshot of the store at one point in time.
///
/// A results replacement and a filter change can never be observed
/// half-applied through a snapshot.
#[derive(Debug, Clone)]
pub struct ResultSnapshot {
    /// The last-fetched raw result set.
    pub results: Vec<BusinessRecord>,
    /// Resolved location of the last successful search.
    pub location: Option<SearchLocation>,
    /// The filter criteria in effect.
    pub criteria: FilterCriteria,
    /// The derived qualified subset.
    pub qualified: Vec<BusinessRecord>,
}

#[derive(Debug)]
struct Inner {
    results: Vec<BusinessRecord>,
    location: Option<SearchLocation>,
    criteria: FilterCriteria,
    qualified: Vec<BusinessRecord>,
    /// Highest search ticket handed out so far.
    issued: u64,
    /// Ticket of the last applied search completion.
    applied: u64,
}

/// Holds the current result set and derives the qualified view.
///
/// Single logical writer; all reads go through [`ResultStore::snapshot`].
#[derive(Debug)]
pub struct ResultStore {
    inner: Mutex<Inner>,
}

impl ResultStore {
    /// Creates an empty store: no results, no location, the given filter
    /// defaults.
    pub fn new(default_criteria: FilterCriteria) -> Self {
        Self {
            inner: Mutex::new(Inner {
                results: Vec::new(),
                location: None,
                criteria: default_criteria,
                qualified: Vec::new(),
                issued: 0,
                applied: 0,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means a panic elsewhere; the data is still
        // a consistent snapshot because every mutation recomputes fully.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The one recomputation path shared by every mutation, so the derived
    /// view cannot drift between call sites.
    fn recompute(inner: &mut Inner) {
        inner.qualified = filter::qualified(&inner.results, &inner.criteria);
    }

    /// Registers a new in-flight search and returns its ticket.
    pub fn begin_search(&self) -> SearchTicket {
        let mut inner = self.lock();
        inner.issued += 1;
        SearchTicket(inner.issued)
    }

    /// Applies a search completion, unless a newer search has been issued
    /// since the ticket was taken. Returns whether the completion was
    /// applied; a discarded completion leaves the store untouched.
    pub fn complete_search(
        &self,
        ticket: SearchTicket,
        records: Vec<BusinessRecord>,
        location: Option<SearchLocation>,
    ) -> bool {
        let mut inner = self.lock();
        if ticket.0 != inner.issued || ticket.0 <= inner.applied {
            tracing::debug!(
                "Discarding stale search completion (ticket {}, issued {}, applied {})",
                ticket.0,
                inner.issued,
                inner.applied
            );
            return false;
        }
        inner.applied = ticket.0;
        inner.results = records;
        inner.location = location;
        Self::recompute(&mut inner);
        true
    }

    /// Replaces the raw result set and search location atomically.
    pub fn set_results(&self, records: Vec<BusinessRecord>, location: Option<SearchLocation>) {
        let mut inner = self.lock();
        inner.results = records;
        inner.location = location;
        Self::recompute(&mut inner);
    }

    /// Replaces the filter criteria.
    pub fn set_filter(&self, criteria: FilterCriteria) {
        let mut inner = self.lock();
        inner.criteria = criteria;
        Self::recompute(&mut inner);
    }

    /// Empties results and location, keeping the filter criteria. Called
    /// before a new search starts so stale markers never render while the
    /// search is pending.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.results = Vec::new();
        inner.location = None;
        Self::recompute(&mut inner);
    }

    /// Returns a consistent snapshot of the current state.
    pub fn snapshot(&self) -> ResultSnapshot {
        let inner = self.lock();
        ResultSnapshot {
            results: inner.results.clone(),
            location: inner.location,
            criteria: inner.criteria,
            qualified: inner.qualified.clone(),
        }
    }
}
