//! Error types for the custody ledger
//!
//! Every public operation returns [`CustodyResult`]. Each rejection kind
//! is a distinct enum variant so callers can match on the exact failure
//! without parsing messages.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{BlockHeight, ItemId, PartyId};

/// Custody ledger errors
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CustodyError {
    /// Caller lacks the authority or role required for the operation
    #[error("Not authorized: {reason}")]
    NotAuthorized { reason: String },

    /// Item identifier failed validation
    #[error("Invalid item identifier: {item_id}")]
    InvalidItemId { item_id: u64 },

    /// Receiver equals the sender
    #[error("Self-transfer rejected: {party} cannot receive its own item")]
    SelfTransfer { party: PartyId },

    /// Latitude or longitude outside the valid range
    #[error("Invalid geo data: lat={lat:?} long={long:?}")]
    InvalidGeoData {
        lat: Option<f64>,
        long: Option<f64>,
    },

    /// Caller does not hold the item, or the item is disposed
    #[error("Transfer not allowed for item {item_id}")]
    TransferNotAllowed { item_id: ItemId },

    /// No status record exists for the item
    #[error("Item not found: {item_id}")]
    ItemNotFound { item_id: ItemId },

    /// Item already reached its terminal disposed state
    #[error("Item {item_id} is already disposed")]
    AlreadyDisposed { item_id: ItemId },

    /// Metadata text exceeds the size limit
    #[error("Invalid metadata: {length} bytes exceeds maximum {max}")]
    InvalidMetadata { length: usize, max: usize },

    /// Item reached its per-item transfer cap
    #[error("Max transfers exceeded for item {item_id}: {count}/{max}")]
    MaxTransfersExceeded {
        item_id: ItemId,
        count: u32,
        max: u32,
    },

    /// Unrecognized transfer kind name
    #[error("Invalid transfer kind: {kind}")]
    InvalidTransferKind { kind: String },

    /// Quantity must be strictly positive
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: u64 },

    /// Content hash is not exactly 32 bytes
    #[error("Invalid content hash length: expected {expected} bytes, got {actual}")]
    InvalidContentHash { expected: usize, actual: usize },

    /// Unrecognized role name
    #[error("Invalid role: {role}")]
    InvalidRole { role: String },

    /// Engine is paused by the authority
    #[error("Transfers are paused")]
    Paused,

    /// Expiry height does not exceed the current block height
    #[error("Invalid expiry: {expiry} not beyond current height {current}")]
    InvalidExpiry {
        expiry: BlockHeight,
        current: BlockHeight,
    },

    /// Fee transfer from the caller to the authority failed
    #[error("Insufficient balance for transfer fee of {required}")]
    InsufficientBalance { required: u64 },
}

impl CustodyError {
    /// Convenience constructor for authorization failures
    pub fn not_authorized(reason: impl Into<String>) -> Self {
        Self::NotAuthorized {
            reason: reason.into(),
        }
    }
}

/// Result type alias for custody operations
pub type CustodyResult<T> = Result<T, CustodyError>;
