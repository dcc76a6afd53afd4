//! Ledger configuration and protocol constants
//!
//! All magic numbers and default values for the custody chain live
//! here. The mutable parts of [`LedgerConfig`] (fee, pause flag) change
//! only through the authority-gated administrative operations; the
//! authority itself is fixed at initialization.

use serde::{Deserialize, Serialize};

use crate::types::{PartyId, TransferId};

// ============================================================================
// Defaults
// ============================================================================

/// Default fee charged on every transfer, in fee units
pub const DEFAULT_TRANSFER_FEE: u64 = 100;

/// Default per-item transfer cap
pub const DEFAULT_MAX_TRANSFERS_PER_ITEM: u32 = 50;

// ============================================================================
// Field limits
// ============================================================================

/// Maximum metadata length in bytes
pub const MAX_METADATA_BYTES: usize = 256;

/// Latitude bounds in degrees
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;

/// Longitude bounds in degrees
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Process-wide ledger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Privileged identity controlling pause state, fee, and role grants
    pub authority: PartyId,
    /// Fee charged caller -> authority on every transfer
    pub transfer_fee: u64,
    /// Per-item transfer cap, checked once by the engine
    pub max_transfers_per_item: u32,
    /// Circuit breaker halting `initiate_transfer` only
    pub paused: bool,
    /// Next transfer identifier to assign, advances on every commit
    pub next_transfer_id: TransferId,
}

impl LedgerConfig {
    /// Configuration with protocol defaults for the given authority
    pub fn new(authority: PartyId) -> Self {
        Self {
            authority,
            transfer_fee: DEFAULT_TRANSFER_FEE,
            max_transfers_per_item: DEFAULT_MAX_TRANSFERS_PER_ITEM,
            paused: false,
            next_transfer_id: TransferId::new(0),
        }
    }
}
