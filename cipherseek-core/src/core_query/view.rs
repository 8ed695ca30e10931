//! ViewState - serializable projection of lifecycle state for presentation
//!
//! A pure snapshot: presentation code reads it, never writes it. All
//! mutation happens through `QueryLifecycle` transitions.

use super::types::{CategoryFilter, Record, RecordPhase, SearchPhase, StatusNotice};
use crate::core_ledger::RecordId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Presentation-facing snapshot of the query lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Current search submission phase
    pub search_phase: SearchPhase,

    /// Whether the search form is open
    pub search_modal_open: bool,

    /// Records with a decrypt request in flight
    pub decrypting: Vec<RecordId>,

    /// Active result-list projection
    pub active_filter: CategoryFilter,

    /// Current status notice; already filtered for expiry
    pub status: Option<StatusNotice>,

    /// Records in the mirror
    pub total_records: usize,

    /// Records with `verified = true`
    pub verified_records: usize,
}

impl ViewState {
    /// Whether a search submission is in flight
    pub fn searching(&self) -> bool {
        self.search_phase.is_active()
    }

    /// Whether a decrypt is in flight for the given record.
    ///
    /// The presentation layer disables the decrypt control on this, which
    /// is where re-trigger-while-in-flight is meant to be stopped.
    pub fn is_decrypting(&self, id: &RecordId) -> bool {
        self.decrypting.contains(id)
    }

    /// Decrypt sub-lifecycle phase of a record
    pub fn record_phase(&self, record: &Record) -> RecordPhase {
        if record.verified {
            RecordPhase::Verified
        } else if self.is_decrypting(&record.id) {
            RecordPhase::Decrypting
        } else {
            RecordPhase::Unverified
        }
    }
}

/// Build a snapshot from the orchestrator's internal fields
pub(crate) fn project(
    records: &[Record],
    search_phase: SearchPhase,
    search_modal_open: bool,
    decrypting: &HashSet<RecordId>,
    active_filter: &CategoryFilter,
    status: &Option<StatusNotice>,
) -> ViewState {
    let mut decrypting: Vec<RecordId> = decrypting.iter().cloned().collect();
    decrypting.sort_by(|a, b| a.as_str().cmp(b.as_str()));

    ViewState {
        search_phase,
        search_modal_open,
        decrypting,
        active_filter: active_filter.clone(),
        status: status.clone().filter(|notice| !notice.is_expired()),
        total_records: records.len(),
        verified_records: records.iter().filter(|r| r.verified).count(),
    }
}
