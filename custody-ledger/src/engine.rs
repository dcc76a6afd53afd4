//! Custody transfer engine
//!
//! Orchestrates validation, authorization, fee charge, and the atomic
//! commit of history, status, and the global transfer-id counter.
//!
//! # Execution Model
//!
//! Every state-mutating operation runs as a single atomic unit under
//! one write lock around the shared tables: no operation observes
//! another's intermediate state, and any rejected check leaves zero
//! observable state change. Read-only queries take the read lock and
//! see a consistent snapshot. The fee charge is awaited to completion
//! while the write lock is held, before anything is persisted.
//!
//! # Check Order for `initiate_transfer`
//!
//! 1. Engine not paused
//! 2. Field validators (custody-core validation layer)
//! 3. Caller and receiver both carry an assigned role
//! 4. Status exists, item not disposed, caller is the current holder
//! 5. Transfer count strictly below the per-item cap
//! 6. Fee charged caller -> authority
//!
//! Each step fails with its own error kind; the first failure
//! short-circuits the operation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use custody_core::validation;
use custody_core::{
    ContentDigest, CustodyError, CustodyEvent, CustodyResult, CustodyStatus, ItemId, LedgerConfig,
    PartyId, Role, TransferRecord, TransferRequest,
};

use crate::clock::ChainClock;
use crate::fees::FeeCollector;

/// Shared mutable tables, guarded by one lock
#[derive(Debug)]
struct ChainState {
    /// Process-wide configuration and the transfer-id counter
    config: LedgerConfig,
    /// Role registry: at most one role per party
    roles: HashMap<PartyId, Role>,
    /// Per-item custody status
    statuses: HashMap<ItemId, CustodyStatus>,
    /// Per-item append-only transfer history
    histories: HashMap<ItemId, Vec<TransferRecord>>,
}

/// Result of a committed transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferOutcome {
    /// The record appended to the item's history
    pub record: TransferRecord,
    /// Notification for the boundary layer to dispatch
    pub event: CustodyEvent,
}

/// Aggregate counters over the ledger tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    /// Items with a status record
    pub registered_items: usize,
    /// Items in the terminal disposed state
    pub disposed_items: usize,
    /// Transfers committed across all items
    pub committed_transfers: u64,
    /// Parties with an assigned role
    pub assigned_roles: usize,
    /// Circuit-breaker state
    pub paused: bool,
}

/// The custody transfer engine
///
/// Generic over the two external seams: the fee collector (native
/// value-transfer primitive) and the chain clock (logical block
/// height).
pub struct CustodyLedger<F: FeeCollector, C: ChainClock> {
    state: RwLock<ChainState>,
    fees: Arc<F>,
    clock: Arc<C>,
}

impl<F: FeeCollector, C: ChainClock> CustodyLedger<F, C> {
    /// Ledger with protocol defaults for the given authority
    pub fn new(authority: PartyId, fees: Arc<F>, clock: Arc<C>) -> Self {
        Self::with_config(LedgerConfig::new(authority), fees, clock)
    }

    /// Ledger with an explicit initial configuration
    pub fn with_config(config: LedgerConfig, fees: Arc<F>, clock: Arc<C>) -> Self {
        Self {
            state: RwLock::new(ChainState {
                config,
                roles: HashMap::new(),
                statuses: HashMap::new(),
                histories: HashMap::new(),
            }),
            fees,
            clock,
        }
    }

    // ========================================================================
    // Registration seam
    // ========================================================================

    /// Install the initial status record for an item.
    ///
    /// Hook for the external registration collaborator, which must run
    /// before any transfer references the item. Never overwrites an
    /// existing record; returns whether the item was newly registered.
    pub async fn register_item(&self, item_id: ItemId, holder: PartyId) -> bool {
        let mut state = self.state.write().await;
        if state.statuses.contains_key(&item_id) {
            return false;
        }
        tracing::debug!(item_id = %item_id, holder = %holder, "item registered");
        state.statuses.insert(item_id, CustodyStatus::new(holder));
        state.histories.entry(item_id).or_default();
        true
    }

    // ========================================================================
    // Administrative operations (authority only)
    // ========================================================================

    /// Assign or overwrite a party's role
    pub async fn assign_role(
        &self,
        caller: &PartyId,
        target: PartyId,
        role: Role,
    ) -> CustodyResult<()> {
        let mut state = self.state.write().await;
        Self::require_authority(&state, caller)?;
        tracing::info!(target = %target, role = %role, "role assigned");
        state.roles.insert(target, role);
        Ok(())
    }

    /// Pause or resume transfer initiation.
    ///
    /// Pausing halts only `initiate_transfer`; disposal, administration,
    /// and queries stay available.
    pub async fn set_paused(&self, caller: &PartyId, paused: bool) -> CustodyResult<()> {
        let mut state = self.state.write().await;
        Self::require_authority(&state, caller)?;
        tracing::info!(paused, "pause state changed");
        state.config.paused = paused;
        Ok(())
    }

    /// Change the fee charged on every transfer
    pub async fn set_transfer_fee(&self, caller: &PartyId, fee: u64) -> CustodyResult<()> {
        let mut state = self.state.write().await;
        Self::require_authority(&state, caller)?;
        tracing::info!(fee, "transfer fee changed");
        state.config.transfer_fee = fee;
        Ok(())
    }

    fn require_authority(state: &ChainState, caller: &PartyId) -> CustodyResult<()> {
        if caller != &state.config.authority {
            return Err(CustodyError::not_authorized(
                "operation restricted to the authority",
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Transfer engine
    // ========================================================================

    /// Attempt a custody transfer from `caller` to the request's receiver.
    ///
    /// On success the new record carries the next global transfer id and
    /// the current block height, the item's history gains the record,
    /// and its status moves to the receiver with the transfer count
    /// bumped. The returned outcome carries the `transfer-initiated`
    /// event for the boundary layer to dispatch.
    pub async fn initiate_transfer(
        &self,
        caller: &PartyId,
        request: TransferRequest,
    ) -> CustodyResult<TransferOutcome> {
        let mut state = self.state.write().await;

        // 1. Circuit breaker
        if state.config.paused {
            return Err(CustodyError::Paused);
        }

        // 2. Field validation against the height at submission
        let height = self.clock.block_height();
        validation::validate_transfer_request(caller, &request, height)?;
        let content_hash = ContentDigest::from_bytes(&request.content_hash)?;

        // 3. Both parties need an assigned role
        if !state.roles.contains_key(caller) {
            return Err(CustodyError::not_authorized("caller has no assigned role"));
        }
        if !state.roles.contains_key(&request.receiver) {
            return Err(CustodyError::not_authorized(
                "receiver has no assigned role",
            ));
        }

        // 4. Status must exist; item undisposed and held by the caller
        let item_id = request.item_id;
        let status = state
            .statuses
            .get(&item_id)
            .ok_or(CustodyError::ItemNotFound { item_id })?;
        if status.disposed || !status.is_held_by(caller) {
            return Err(CustodyError::TransferNotAllowed { item_id });
        }

        // 5. Per-item cap
        let count = status.total_transfers;
        let max = state.config.max_transfers_per_item;
        if count >= max {
            return Err(CustodyError::MaxTransfersExceeded {
                item_id,
                count,
                max,
            });
        }

        // 6. Fee charge; nothing is persisted until it succeeds
        let fee = state.config.transfer_fee;
        let authority = state.config.authority.clone();
        self.fees
            .charge(caller, &authority, fee)
            .await
            .map_err(|_| CustodyError::InsufficientBalance { required: fee })?;

        // Commit: record, history, status, counter advance as one unit
        let transfer_id = state.config.next_transfer_id;
        let record = TransferRecord {
            transfer_id,
            sender: caller.clone(),
            receiver: request.receiver.clone(),
            timestamp: height,
            geo_lat: request.geo_lat,
            geo_long: request.geo_long,
            metadata: request.metadata,
            kind: request.kind,
            quantity: request.quantity,
            content_hash,
            status: true,
            expiry: request.expiry,
        };

        let status = state
            .statuses
            .get_mut(&item_id)
            .ok_or(CustodyError::ItemNotFound { item_id })?;
        status.current_holder = request.receiver.clone();
        status.total_transfers += 1;

        state.histories.entry(item_id).or_default().push(record.clone());
        state.config.next_transfer_id = transfer_id.next();

        tracing::info!(
            item_id = %item_id,
            transfer_id = %transfer_id,
            sender = %caller,
            receiver = %request.receiver,
            kind = %request.kind,
            "custody transfer committed"
        );

        Ok(TransferOutcome {
            record,
            event: CustodyEvent::TransferInitiated {
                item_id,
                transfer_id,
            },
        })
    }

    // ========================================================================
    // Disposal
    // ========================================================================

    /// Move an item to its terminal disposed state.
    ///
    /// Only the current holder may dispose, and only once. Available
    /// while the engine is paused.
    pub async fn mark_disposed(
        &self,
        caller: &PartyId,
        item_id: ItemId,
    ) -> CustodyResult<CustodyEvent> {
        let mut state = self.state.write().await;
        let status = state
            .statuses
            .get_mut(&item_id)
            .ok_or(CustodyError::ItemNotFound { item_id })?;
        if !status.is_held_by(caller) {
            return Err(CustodyError::TransferNotAllowed { item_id });
        }
        if status.disposed {
            return Err(CustodyError::AlreadyDisposed { item_id });
        }
        status.disposed = true;

        tracing::info!(item_id = %item_id, holder = %caller, "item disposed");
        Ok(CustodyEvent::WasteDisposed { item_id })
    }

    // ========================================================================
    // Queries (read-only, snapshot-consistent)
    // ========================================================================

    /// Custody status of an item, if registered
    pub async fn status(&self, item_id: ItemId) -> Option<CustodyStatus> {
        let state = self.state.read().await;
        state.statuses.get(&item_id).cloned()
    }

    /// Full transfer history of an item, if registered
    pub async fn history(&self, item_id: ItemId) -> Option<Vec<TransferRecord>> {
        let state = self.state.read().await;
        state.histories.get(&item_id).cloned()
    }

    /// Most recently committed transfer for an item
    pub async fn last_transfer(&self, item_id: ItemId) -> Option<TransferRecord> {
        let state = self.state.read().await;
        state.histories.get(&item_id).and_then(|h| h.last().cloned())
    }

    /// Role assigned to a party, if any
    pub async fn role(&self, party: &PartyId) -> Option<Role> {
        let state = self.state.read().await;
        state.roles.get(party).copied()
    }

    /// Fee currently charged per transfer
    pub async fn transfer_fee(&self) -> u64 {
        let state = self.state.read().await;
        state.config.transfer_fee
    }

    /// Whether transfer initiation is halted
    pub async fn is_paused(&self) -> bool {
        let state = self.state.read().await;
        state.config.paused
    }

    /// Aggregate counters over the ledger tables
    pub async fn stats(&self) -> LedgerStats {
        let state = self.state.read().await;
        LedgerStats {
            registered_items: state.statuses.len(),
            disposed_items: state.statuses.values().filter(|s| s.disposed).count(),
            committed_transfers: state.config.next_transfer_id.value(),
            assigned_roles: state.roles.len(),
            paused: state.config.paused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::fees::InMemoryFeeCollector;
    use custody_core::{BlockHeight, TransferKind};

    fn authority() -> PartyId {
        PartyId::new("env-agency")
    }

    async fn test_ledger() -> CustodyLedger<InMemoryFeeCollector, ManualClock> {
        let fees = Arc::new(InMemoryFeeCollector::new());
        let clock = Arc::new(ManualClock::new(10));
        CustodyLedger::new(authority(), fees, clock)
    }

    fn valid_request(item_id: u64, receiver: &str) -> TransferRequest {
        TransferRequest::new(
            ItemId::new(item_id),
            PartyId::new(receiver),
            TransferKind::Handover,
            100,
            ContentDigest::sha256(b"manifest").as_bytes().to_vec(),
            BlockHeight::new(1_000),
        )
    }

    #[tokio::test]
    async fn test_admin_requires_authority() {
        let ledger = test_ledger().await;
        let outsider = PartyId::new("acme-chemicals");

        assert!(matches!(
            ledger.set_paused(&outsider, true).await.unwrap_err(),
            CustodyError::NotAuthorized { .. }
        ));
        assert!(matches!(
            ledger.set_transfer_fee(&outsider, 5).await.unwrap_err(),
            CustodyError::NotAuthorized { .. }
        ));
        assert!(matches!(
            ledger
                .assign_role(&outsider, outsider.clone(), Role::Generator)
                .await
                .unwrap_err(),
            CustodyError::NotAuthorized { .. }
        ));

        ledger.set_paused(&authority(), true).await.unwrap();
        assert!(ledger.is_paused().await);
        ledger.set_transfer_fee(&authority(), 5).await.unwrap();
        assert_eq!(ledger.transfer_fee().await, 5);
    }

    #[tokio::test]
    async fn test_assign_role_overwrites() {
        let ledger = test_ledger().await;
        let party = PartyId::new("haulage-west");

        ledger
            .assign_role(&authority(), party.clone(), Role::Transporter)
            .await
            .unwrap();
        assert_eq!(ledger.role(&party).await, Some(Role::Transporter));

        ledger
            .assign_role(&authority(), party.clone(), Role::Disposer)
            .await
            .unwrap();
        assert_eq!(ledger.role(&party).await, Some(Role::Disposer));
    }

    #[tokio::test]
    async fn test_register_item_never_overwrites() {
        let ledger = test_ledger().await;
        let item = ItemId::new(1);

        assert!(ledger.register_item(item, PartyId::new("acme-chemicals")).await);
        assert!(!ledger.register_item(item, PartyId::new("haulage-west")).await);

        let status = ledger.status(item).await.unwrap();
        assert!(status.is_held_by(&PartyId::new("acme-chemicals")));
        assert_eq!(ledger.history(item).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_transfer_against_unknown_item_is_not_found() {
        let ledger = test_ledger().await;
        let sender = PartyId::new("acme-chemicals");
        ledger
            .assign_role(&authority(), sender.clone(), Role::Generator)
            .await
            .unwrap();
        ledger
            .assign_role(&authority(), PartyId::new("haulage-west"), Role::Transporter)
            .await
            .unwrap();

        let err = ledger
            .initiate_transfer(&sender, valid_request(42, "haulage-west"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CustodyError::ItemNotFound {
                item_id: ItemId::new(42)
            }
        );
    }

    #[tokio::test]
    async fn test_transfer_requires_roles_on_both_sides() {
        let ledger = test_ledger().await;
        let sender = PartyId::new("acme-chemicals");
        ledger.register_item(ItemId::new(1), sender.clone()).await;

        // Neither side has a role
        let err = ledger
            .initiate_transfer(&sender, valid_request(1, "haulage-west"))
            .await
            .unwrap_err();
        assert!(matches!(err, CustodyError::NotAuthorized { .. }));

        // Caller only
        ledger
            .assign_role(&authority(), sender.clone(), Role::Generator)
            .await
            .unwrap();
        let err = ledger
            .initiate_transfer(&sender, valid_request(1, "haulage-west"))
            .await
            .unwrap_err();
        assert!(matches!(err, CustodyError::NotAuthorized { .. }));
    }

    #[tokio::test]
    async fn test_queries_on_unknown_item_are_absent() {
        let ledger = test_ledger().await;
        assert!(ledger.status(ItemId::new(9)).await.is_none());
        assert!(ledger.history(ItemId::new(9)).await.is_none());
        assert!(ledger.last_transfer(ItemId::new(9)).await.is_none());
        assert!(ledger.role(&PartyId::new("nobody")).await.is_none());
    }

    #[tokio::test]
    async fn test_stats_reflect_tables() {
        let ledger = test_ledger().await;
        ledger
            .register_item(ItemId::new(1), PartyId::new("acme-chemicals"))
            .await;
        ledger
            .register_item(ItemId::new(2), PartyId::new("acme-chemicals"))
            .await;
        ledger
            .assign_role(&authority(), PartyId::new("acme-chemicals"), Role::Generator)
            .await
            .unwrap();

        let stats = ledger.stats().await;
        assert_eq!(stats.registered_items, 2);
        assert_eq!(stats.disposed_items, 0);
        assert_eq!(stats.committed_transfers, 0);
        assert_eq!(stats.assigned_roles, 1);
        assert!(!stats.paused);
    }
}
