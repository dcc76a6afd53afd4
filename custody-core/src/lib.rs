//! Custody Core - Waste Custody Chain Domain Layer
//!
//! This crate provides the types, validation rules, and error taxonomy
//! for the waste custody chain: the accountability ledger that tracks
//! which party holds a regulated waste batch, who has held it before,
//! and whether it has reached its terminal disposed state.
//!
//! # Key Principles
//!
//! 1. **Append-only history**: committed transfers are never modified
//!    or removed; the append order is the canonical chronology
//! 2. **Terminal disposal**: once disposed, an item's status is frozen
//! 3. **All-or-nothing operations**: any rejected check leaves zero
//!    observable state change
//! 4. **Logical time**: timestamps and expiries are block heights
//!    supplied by the execution environment, never wall-clock time
//!
//! # Core Types
//!
//! - [`PartyId`] / [`Role`]: chain participants and their capabilities
//! - [`CustodyStatus`]: current holder, disposal flag, transfer count
//! - [`TransferRecord`] / [`TransferRequest`]: committed and proposed
//!   transfers
//! - [`LedgerConfig`]: authority, fee, cap, pause flag, id counter
//! - [`CustodyEvent`]: outcome descriptors for downstream dispatch
//! - [`CustodyError`]: one variant per rejection kind

pub mod config;
pub mod error;
pub mod events;
pub mod types;
pub mod validation;

pub use config::{
    LedgerConfig, DEFAULT_MAX_TRANSFERS_PER_ITEM, DEFAULT_TRANSFER_FEE, MAX_METADATA_BYTES,
};
pub use error::{CustodyError, CustodyResult};
pub use events::CustodyEvent;
pub use types::{
    BlockHeight, ContentDigest, CustodyStatus, ItemId, PartyId, Role, TransferId, TransferKind,
    TransferRecord, TransferRequest, DIGEST_LEN,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
