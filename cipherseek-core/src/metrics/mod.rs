//! Metrics collection for observability

use metrics::{counter, describe_counter, describe_gauge, gauge};

/// Initialize metrics with descriptions
pub fn init_metrics() {
    // Query lifecycle metrics
    describe_counter!("query.search.submitted", "Encrypted search submissions started");
    describe_counter!("query.search.completed", "Encrypted search submissions confirmed on-chain");
    describe_counter!("query.search.failed", "Encrypted search submissions that failed");

    // Decrypt lifecycle metrics
    describe_counter!("query.decrypt.requested", "Record decrypt requests started");
    describe_counter!("query.decrypt.completed", "Record decrypts attested and verified");
    describe_counter!("query.decrypt.short_circuit", "Decrypt requests served from already-verified records");
    describe_counter!("query.decrypt.failed", "Record decrypt requests that failed");

    // Ledger metrics
    describe_counter!("ledger.availability.checks", "Ledger availability probes");
    describe_gauge!("ledger.records.mirrored", "Records currently held in the local mirror");
}

/// Record a counter metric
pub fn record_counter(name: &'static str, value: u64) {
    counter!(name).increment(value);
}

/// Record a gauge metric
pub fn record_gauge(name: &'static str, value: f64) {
    gauge!(name).set(value);
}
