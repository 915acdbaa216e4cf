//! The client-side filter predicate.
//!
//! Narrows a fetched result set to the "qualified subset": records that meet
//! the minimum quality score, the optional lead-status restriction and the
//! optional contact-channel requirement. Each record is evaluated
//! independently; the predicate is total, deterministic and side-effect-free.

use crate::models::{BusinessRecord, FilterCriteria, LeadStatus};

/// Whether a single record passes the filter criteria.
///
/// No field other than the quality score, lead status and contact channels
/// affects the outcome.
pub fn matches(record: &BusinessRecord, criteria: &FilterCriteria) -> bool {
    if record.quality_score < criteria.min_quality_score {
        return false;
    }
    if let Some(status) = criteria.lead_status {
        if record.lead_status != status {
            return false;
        }
    }
    if criteria.has_contact && !record.has_contact() {
        return false;
    }
    true
}

/// The qualified subset of a result set: exactly the records for which
/// [`matches`] holds, in their original order.
pub fn qualified(records: &[BusinessRecord], criteria: &FilterCriteria) -> Vec<BusinessRecord> {
    records
        .iter()
        .filter(|r| matches(r, criteria))
        .cloned()
        .collect()
}

/// Per-status counts over a record set, as shown in the results stats panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTally {
    pub hot: usize,
    pub warm: usize,
    pub cold: usize,
    pub unqualified: usize,
}

/// Counts records per lead status.
pub fn tally(records: &[BusinessRecord]) -> StatusTally {
    let mut counts = StatusTally::default();
    for record in records {
        match record.lead_status {
            LeadStatus::Hot => counts.hot += 1,
            LeadStatus::Warm => counts.warm += 1,
            LeadStatus::Cold => counts.cold += 1,
            LeadStatus::Unqualified => counts.unqualified += 1,
        }
    }
    counts
}
