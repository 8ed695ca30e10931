//! QueryLifecycle - main orchestrator for the confidential-query flow
//!
//! Drives a submission through encrypt -> submit -> confirm, and a record
//! through fetch -> decrypt -> attest, while keeping the local record
//! mirror and the `ViewState` consistent with every outcome.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │   QueryLifecycle    │
//! └──┬─────┬──────┬─────┘
//!    │     │      │
//!    ▼     ▼      ▼
//! Gateway Ledger Oracle
//! ```

use crate::{
    config::Config,
    core_gateway::{EncryptionGateway, EncryptionProvider},
    core_ledger::{Address, LedgerContract, LedgerReader, LedgerWriter, RecordId},
    core_oracle::{DecryptionCoordinator, DecryptionOracle, OracleError},
    core_query::{
        errors::{QueryError, QueryResult},
        types::{CategoryFilter, QuerySubmission, Record, SearchPhase, StatusNotice},
        view::{self, ViewState},
        wallet::WalletSession,
    },
    metrics::{record_counter, record_gauge},
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Default)]
struct LifecycleState {
    /// Mirror of the ledger's records; truth stays on the ledger
    records: Vec<Record>,
    /// Cached contract address, used as the encrypt recipient context
    contract_address: Option<Address>,
    search_phase: SearchPhase,
    search_modal_open: bool,
    decrypting: HashSet<RecordId>,
    active_filter: CategoryFilter,
    status: Option<StatusNotice>,
}

/// Orchestrates encryption, ledger and oracle calls for confidential queries
pub struct QueryLifecycle {
    config: Arc<Config>,
    wallet: Arc<dyn WalletSession>,
    gateway: Arc<EncryptionGateway>,
    contract: Arc<dyn LedgerContract>,
    reader: LedgerReader,
    coordinator: DecryptionCoordinator,
    state: Arc<RwLock<LifecycleState>>,
}

impl QueryLifecycle {
    /// Create a lifecycle over the given collaborators
    pub fn new(
        config: Arc<Config>,
        wallet: Arc<dyn WalletSession>,
        provider: Arc<dyn EncryptionProvider>,
        contract: Arc<dyn LedgerContract>,
        oracle: Arc<dyn DecryptionOracle>,
    ) -> Self {
        Self {
            config,
            wallet,
            gateway: Arc::new(EncryptionGateway::new(provider)),
            reader: LedgerReader::new(contract.clone()),
            contract,
            coordinator: DecryptionCoordinator::new(oracle),
            state: Arc::new(RwLock::new(LifecycleState::default())),
        }
    }

    /// The encryption gateway (exposed for initialization probes)
    pub fn gateway(&self) -> &EncryptionGateway {
        &self.gateway
    }

    /// Perform the encryption-service handshake if an account is connected.
    ///
    /// Safe to call on every connect event: concurrent and repeated calls
    /// collapse onto one handshake, and a failure is surfaced as a status
    /// notice and retried on the next trigger.
    pub async fn ensure_initialized(&self) -> QueryResult<()> {
        if !self.wallet.is_connected() {
            return Ok(());
        }
        match self.gateway.initialize().await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Encryption gateway initialization failed");
                let err = QueryError::from(e);
                self.post_status(StatusNotice::error(
                    err.user_message("Encryption service initialization failed"),
                    self.config.status.search_window,
                ))
                .await;
                Err(err)
            }
        }
    }

    /// Refresh the record mirror from the ledger.
    ///
    /// Individual record failures are logged and skipped; only a failure to
    /// enumerate aborts the reload. Without a connected account this is a
    /// quiet no-op.
    pub async fn reload(&self) -> QueryResult<()> {
        if !self.wallet.is_connected() {
            debug!("Wallet not connected, skipping reload");
            return Ok(());
        }

        let contract_address = self.reader.contract_address().await?;
        let ids = self.reader.list_record_ids().await?;

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            match self.reader.get_record(&id).await {
                Ok(state) => records.push(Record::from_state(id, state)),
                Err(e) => {
                    warn!(record_id = %id, error = %e, "Skipping record that failed to load");
                }
            }
        }
        // Newest first, matching the prepend order of fresh submissions
        records.reverse();

        let count = records.len();
        let mut st = self.state.write().await;
        st.contract_address = Some(contract_address);
        st.records = records;
        drop(st);

        record_gauge("ledger.records.mirrored", count as f64);
        info!(records = count, "Record mirror reloaded");
        Ok(())
    }

    /// Submit an encrypted search.
    ///
    /// On success the new record id is returned and an unverified mirror
    /// entry is prepended, so the list reflects the submission before the
    /// next full reload. If the confirmed record cannot be read back, the
    /// submission still succeeds and the entry appears on the next reload.
    /// The draft is consumed and scrubbed either way.
    pub async fn submit_search(&self, draft: QuerySubmission) -> QueryResult<RecordId> {
        let window = self.config.status.search_window;
        let account = self.require_account(window).await?;

        {
            let mut st = self.state.write().await;
            if st.search_phase.is_active() {
                return Err(QueryError::Precondition(
                    "A search submission is already in flight".to_string(),
                ));
            }
            st.search_phase = SearchPhase::Encrypting;
            st.status = Some(StatusNotice::pending("Encrypting search keyword...", window));
        }
        record_counter("query.search.submitted", 1);

        let result = self.run_submit(&account, &draft).await;

        // Cleanup path: flags are reset on every outcome
        let mut st = self.state.write().await;
        match result {
            Ok((id, mirror)) => {
                info!(record_id = %id, "Encrypted search confirmed");
                if let Some(record) = mirror {
                    st.records.insert(0, record);
                }
                st.search_phase = SearchPhase::Complete;
                st.search_modal_open = false;
                st.status = Some(StatusNotice::success("Encrypted search submitted", window));
                record_gauge("ledger.records.mirrored", st.records.len() as f64);
                record_counter("query.search.completed", 1);
                Ok(id)
            }
            Err(e) => {
                warn!(error = %e, "Search submission failed");
                st.search_phase = SearchPhase::Failed;
                st.status = Some(StatusNotice::error(e.user_message("Search failed"), window));
                record_counter("query.search.failed", 1);
                Err(e)
            }
        }
    }

    async fn run_submit(
        &self,
        account: &Address,
        draft: &QuerySubmission,
    ) -> QueryResult<(RecordId, Option<Record>)> {
        self.gateway.initialize().await?;

        let recipient = self.contract_recipient().await?;
        let keyword = draft.keyword_code(self.config.search.sentinel_keyword);
        let category = draft.category_code(self.config.search.default_category);

        let encrypted = self.gateway.encrypt(&recipient, account, keyword).await?;

        self.set_phase(SearchPhase::Submitting).await;
        let id = RecordId::new(format!("sub-{}", Uuid::new_v4()));
        let label = format!("Keyword search: {}", draft.keyword.trim());
        let note = format!("category: {}", category);

        let writer = LedgerWriter::new(self.contract.clone(), account.clone());
        let tx = writer
            .create_record(
                id.clone(),
                label,
                encrypted.ciphertext,
                encrypted.proof,
                category,
                0,
                note,
            )
            .await?;

        self.set_phase(SearchPhase::Confirming).await;
        self.post_status(StatusNotice::pending(
            "Waiting for confirmation...",
            self.config.status.search_window,
        ))
        .await;
        tx.confirm().await?;

        // The record is durable once the transaction confirms. The mirror
        // entry is built from the ledger's own copy; if that read-back
        // fails, the submission still reports success and the next reload
        // picks the record up.
        let mirror = match self.reader.get_record(&id).await {
            Ok(state) => Some(Record::from_state(id.clone(), state)),
            Err(e) => {
                warn!(record_id = %id, error = %e, "Confirmed record could not be read back");
                None
            }
        };

        Ok((id, mirror))
    }

    /// Reveal a record's plaintext.
    ///
    /// Already-verified records are served from the ledger without touching
    /// the oracle. A decrypt already in flight for the same record is a
    /// no-op returning `None`. Returns the authenticated clear value.
    pub async fn decrypt_record(&self, id: &RecordId) -> QueryResult<Option<u64>> {
        let window = self.config.status.decrypt_window;
        let account = self.require_account(window).await?;

        {
            let mut st = self.state.write().await;
            if st.decrypting.contains(id) {
                debug!(record_id = %id, "Decrypt already in flight, ignoring");
                return Ok(None);
            }
            st.decrypting.insert(id.clone());
            st.status = Some(StatusNotice::pending("Requesting decryption...", window));
        }
        record_counter("query.decrypt.requested", 1);

        let result = self.run_decrypt(&account, id).await;

        // Cleanup path: the in-flight marker is removed on every outcome
        let mut st = self.state.write().await;
        st.decrypting.remove(id);
        match result {
            Ok((value, short_circuit)) => {
                if let Some(record) = st.records.iter_mut().find(|r| r.id == *id) {
                    record.verified = true;
                    record.clear_value = Some(value);
                }
                let message = if short_circuit {
                    record_counter("query.decrypt.short_circuit", 1);
                    "Record already verified"
                } else {
                    record_counter("query.decrypt.completed", 1);
                    "Keyword decrypted"
                };
                info!(record_id = %id, short_circuit, "Record plaintext revealed");
                st.status = Some(StatusNotice::success(message, window));
                Ok(Some(value))
            }
            Err(e) => {
                warn!(record_id = %id, error = %e, "Decrypt failed");
                st.status = Some(StatusNotice::error(e.user_message("Decryption failed"), window));
                record_counter("query.decrypt.failed", 1);
                Err(e)
            }
        }
    }

    async fn run_decrypt(&self, account: &Address, id: &RecordId) -> QueryResult<(u64, bool)> {
        let state = self.reader.get_record(id).await?;

        if state.verified {
            // Bypass the oracle entirely; the ledger already holds the
            // authenticated plaintext
            let value = state.clear_value.ok_or_else(|| {
                QueryError::Oracle(OracleError::Decryption(
                    "verified record is missing its clear value".to_string(),
                ))
            })?;
            return Ok((value, true));
        }

        let handle = self.reader.encrypted_handle(id).await?;
        let recipient = self.contract_recipient().await?;
        let writer = LedgerWriter::new(self.contract.clone(), account.clone());
        let record_id = id.clone();

        let clear_values = self
            .coordinator
            .verify_decryption(
                std::slice::from_ref(&handle),
                &recipient,
                move |encoded, proof| async move {
                    writer.submit_verification(&record_id, &encoded, &proof).await
                },
            )
            .await?;

        let value = clear_values.get(&handle).copied().ok_or_else(|| {
            QueryError::Oracle(OracleError::Decryption(
                "oracle omitted the requested handle".to_string(),
            ))
        })?;
        Ok((value, false))
    }

    /// Probe the ledger and post the outcome as a status notice.
    ///
    /// Probe failure is a status condition, never a data error.
    pub async fn check_availability(&self) {
        let window = self.config.status.check_window;
        record_counter("ledger.availability.checks", 1);

        match self.reader.is_available().await {
            Ok(true) => {
                self.post_status(StatusNotice::success("Availability check passed", window))
                    .await;
            }
            Ok(false) => {
                self.post_status(StatusNotice::error("Ledger unavailable", window))
                    .await;
            }
            Err(e) => {
                warn!(error = %e, "Availability check failed");
                self.post_status(StatusNotice::error("Ledger unavailable", window))
                    .await;
            }
        }
    }

    /// Change the result-list projection
    pub async fn set_filter(&self, filter: CategoryFilter) {
        self.state.write().await.active_filter = filter;
    }

    /// Records matching the active projection
    pub async fn filtered_records(&self) -> Vec<Record> {
        let st = self.state.read().await;
        st.records
            .iter()
            .filter(|r| st.active_filter.matches(r))
            .cloned()
            .collect()
    }

    /// The full current mirror
    pub async fn records(&self) -> Vec<Record> {
        self.state.read().await.records.clone()
    }

    /// Open the search form
    pub async fn open_search_modal(&self) {
        self.state.write().await.search_modal_open = true;
    }

    /// Close the search form
    pub async fn close_search_modal(&self) {
        self.state.write().await.search_modal_open = false;
    }

    /// Snapshot the lifecycle for presentation
    pub async fn view_state(&self) -> ViewState {
        let st = self.state.read().await;
        view::project(
            &st.records,
            st.search_phase,
            st.search_modal_open,
            &st.decrypting,
            &st.active_filter,
            &st.status,
        )
    }

    async fn require_account(&self, window: Duration) -> QueryResult<Address> {
        if self.wallet.is_connected() {
            if let Some(address) = self.wallet.address() {
                return Ok(address);
            }
        }
        self.post_status(StatusNotice::error("Connect wallet first", window))
            .await;
        Err(QueryError::Precondition("Connect wallet first".to_string()))
    }

    async fn contract_recipient(&self) -> QueryResult<Address> {
        if let Some(address) = self.state.read().await.contract_address.clone() {
            return Ok(address);
        }
        let address = self.reader.contract_address().await?;
        self.state.write().await.contract_address = Some(address.clone());
        Ok(address)
    }

    async fn set_phase(&self, phase: SearchPhase) {
        self.state.write().await.search_phase = phase;
    }

    async fn post_status(&self, notice: StatusNotice) {
        self.state.write().await.status = Some(notice);
    }
}
