//! Core data types for the query lifecycle

use crate::core_ledger::{Address, CiphertextHandle, RecordId, RecordState};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Local mirror of a confidential search record held by the ledger.
///
/// Public metadata plus an encrypted payload reference; `clear_value` is
/// populated only once a decryption proof has been attested on-chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Opaque unique id, chosen at submission time
    pub id: RecordId,

    /// Human-readable title, public
    pub label: String,

    /// Public classification tag
    pub category: String,

    /// Reference to the encrypted payload, immutable once created
    pub ciphertext_handle: CiphertextHandle,

    /// Free-text note attached at creation
    pub note: String,

    /// Creation timestamp in seconds, set by the ledger
    pub created_at: u64,

    /// Submitting account
    pub creator: Address,

    /// Flips true exactly once, on successful attestation
    pub verified: bool,

    /// Authenticated plaintext; never present while unverified
    pub clear_value: Option<u64>,
}

impl Record {
    /// Build a mirror entry from on-ledger state
    pub fn from_state(id: RecordId, state: RecordState) -> Self {
        Self {
            id,
            label: state.label,
            category: state.category,
            ciphertext_handle: state.ciphertext_handle,
            note: state.note,
            created_at: state.created_at,
            creator: state.creator,
            verified: state.verified,
            // An unverified record must never expose a guessed plaintext
            clear_value: if state.verified { state.clear_value } else { None },
        }
    }

    /// The plaintext, gated on the verified bit
    pub fn authenticated_clear_value(&self) -> Option<u64> {
        if self.verified {
            self.clear_value
        } else {
            None
        }
    }
}

/// Client-side search draft, discarded on success or cancel.
///
/// Holds the plaintext keyword, so it is scrubbed on drop.
#[derive(Debug, Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct QuerySubmission {
    /// Keyword integer code, as typed
    pub keyword: String,
    /// Category code, as typed
    pub category: String,
}

impl QuerySubmission {
    /// Create a new draft
    pub fn new(keyword: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            category: category.into(),
        }
    }

    /// Parse the keyword, falling back to the sentinel on failure.
    /// The fallback is explicit policy, not an error path.
    pub fn keyword_code(&self, sentinel: u64) -> u64 {
        self.keyword.trim().parse().unwrap_or(sentinel)
    }

    /// Parse the category code, falling back to the default on failure
    pub fn category_code(&self, default: u32) -> u32 {
        self.category.trim().parse().unwrap_or(default)
    }
}

/// States of a search submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPhase {
    /// No submission in flight
    #[default]
    Init,
    /// Keyword being encrypted
    Encrypting,
    /// Record-creation transaction being broadcast
    Submitting,
    /// Broadcast accepted, awaiting finality
    Confirming,
    /// Last submission confirmed
    Complete,
    /// Last submission failed; a new one may start
    Failed,
}

impl SearchPhase {
    /// Whether a submission is currently in flight
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            SearchPhase::Encrypting | SearchPhase::Submitting | SearchPhase::Confirming
        )
    }
}

/// Per-record decrypt states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordPhase {
    /// No authenticated plaintext yet
    Unverified,
    /// Decrypt request in flight
    Decrypting,
    /// Plaintext attested on-chain
    Verified,
}

/// Outcome classification of a status notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Pending,
    Success,
    Error,
}

/// Transient, auto-expiring user-facing indicator of an operation's outcome.
///
/// Expiry is cosmetic: it hides the notice, it never aborts the underlying
/// call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusNotice {
    pub kind: StatusKind,
    pub message: String,
    pub expires_at: SystemTime,
}

impl StatusNotice {
    /// Create a notice visible for the given window
    pub fn new(kind: StatusKind, message: impl Into<String>, window: Duration) -> Self {
        Self {
            kind,
            message: message.into(),
            expires_at: SystemTime::now() + window,
        }
    }

    /// Pending notice
    pub fn pending(message: impl Into<String>, window: Duration) -> Self {
        Self::new(StatusKind::Pending, message, window)
    }

    /// Success notice
    pub fn success(message: impl Into<String>, window: Duration) -> Self {
        Self::new(StatusKind::Success, message, window)
    }

    /// Error notice
    pub fn error(message: impl Into<String>, window: Duration) -> Self {
        Self::new(StatusKind::Error, message, window)
    }

    /// Whether the display window has elapsed
    pub fn is_expired(&self) -> bool {
        SystemTime::now() >= self.expires_at
    }
}

/// Result-list projection selector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// Full current list
    #[default]
    All,
    /// Only records with `verified = true`
    Verified,
    /// Only records with a matching category tag
    Category(String),
}

impl CategoryFilter {
    /// Parse the filter from its tab string
    pub fn parse(tab: &str) -> Self {
        match tab {
            "all" => CategoryFilter::All,
            "verified" => CategoryFilter::Verified,
            other => CategoryFilter::Category(other.to_string()),
        }
    }

    /// Whether the record belongs to this projection
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Verified => record.verified,
            CategoryFilter::Category(tag) => record.category == *tag,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(tab: String) -> Self {
        CategoryFilter::parse(&tab)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => "all".to_string(),
            CategoryFilter::Verified => "verified".to_string(),
            CategoryFilter::Category(tag) => tag,
        }
    }
}
