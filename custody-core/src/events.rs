//! Event descriptors emitted by the custody ledger
//!
//! The ledger performs no notification I/O itself. Mutating operations
//! return the event describing what happened; the caller or boundary
//! layer dispatches it to downstream consumers (compliance checking,
//! notification hub, incentive issuance) as fire-and-forget.

use serde::{Deserialize, Serialize};

use crate::types::{ItemId, TransferId};

/// Notification event produced by a committed state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum CustodyEvent {
    /// A transfer was committed to an item's history
    TransferInitiated {
        item_id: ItemId,
        transfer_id: TransferId,
    },
    /// An item reached its terminal disposed state
    WasteDisposed { item_id: ItemId },
}
