//! Custody status and transfer records
//!
//! A [`CustodyStatus`] tracks who currently holds an item, whether it
//! has reached its terminal disposed state, and how many transfers it
//! has been through. Each committed transfer becomes an immutable
//! [`TransferRecord`] appended to the item's history.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::common::{BlockHeight, ContentDigest, ItemId, TransferId};
use super::party::PartyId;
use crate::error::CustodyError;

/// Kind of custody transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    /// Direct handover between two custodians at the same site
    Handover,
    /// Movement of the item by a transporter
    Transport,
    /// Final handover to a disposer ahead of terminal disposal
    Disposal,
}

impl TransferKind {
    /// Canonical wire name for the transfer kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferKind::Handover => "handover",
            TransferKind::Transport => "transport",
            TransferKind::Disposal => "disposal",
        }
    }
}

impl FromStr for TransferKind {
    type Err = CustodyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "handover" => Ok(TransferKind::Handover),
            "transport" => Ok(TransferKind::Transport),
            "disposal" => Ok(TransferKind::Disposal),
            other => Err(CustodyError::InvalidTransferKind {
                kind: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-item custody status
///
/// Created by the registration collaborator before any transfer is
/// attempted. Once `disposed` is set, the record is frozen: no further
/// transfer or disposal may touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyStatus {
    /// Party currently in possession of the item
    pub current_holder: PartyId,
    /// Terminal disposal flag, false -> true only
    pub disposed: bool,
    /// Count of committed transfers, equals the history length
    pub total_transfers: u32,
}

impl CustodyStatus {
    /// Initial status for a freshly registered item
    pub fn new(holder: PartyId) -> Self {
        Self {
            current_holder: holder,
            disposed: false,
            total_transfers: 0,
        }
    }

    /// Check whether `party` currently holds the item
    pub fn is_held_by(&self, party: &PartyId) -> bool {
        &self.current_holder == party
    }
}

/// Immutable record of one committed custody transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Globally unique, strictly increasing identifier
    pub transfer_id: TransferId,
    /// Party the item left
    pub sender: PartyId,
    /// Party the item moved to
    pub receiver: PartyId,
    /// Block height at commit time, never caller-supplied
    pub timestamp: BlockHeight,
    /// Latitude in degrees, if reported
    pub geo_lat: Option<f64>,
    /// Longitude in degrees, if reported
    pub geo_long: Option<f64>,
    /// Free-form manifest text
    pub metadata: String,
    /// Kind of transfer
    pub kind: TransferKind,
    /// Transferred quantity, strictly positive
    pub quantity: u64,
    /// Digest of the accompanying documentation
    pub content_hash: ContentDigest,
    /// Set to true at creation; no operation clears it
    pub status: bool,
    /// Block height after which the transfer documentation lapses
    pub expiry: BlockHeight,
}

/// Caller-supplied input for a transfer attempt
///
/// Carries the pre-validation form of a transfer: the content hash is
/// still a raw byte string and every field is checked by the validation
/// layer before a [`TransferRecord`] is built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Item being transferred
    pub item_id: ItemId,
    /// Proposed new holder
    pub receiver: PartyId,
    /// Latitude in degrees, if reported
    pub geo_lat: Option<f64>,
    /// Longitude in degrees, if reported
    pub geo_long: Option<f64>,
    /// Free-form manifest text
    pub metadata: String,
    /// Kind of transfer
    pub kind: TransferKind,
    /// Transferred quantity
    pub quantity: u64,
    /// Raw content hash, must be exactly 32 bytes
    pub content_hash: Vec<u8>,
    /// Expiry height, must exceed the height at submission
    pub expiry: BlockHeight,
}

impl TransferRequest {
    /// Create a request with no geo coordinates and empty metadata
    pub fn new(
        item_id: ItemId,
        receiver: PartyId,
        kind: TransferKind,
        quantity: u64,
        content_hash: Vec<u8>,
        expiry: BlockHeight,
    ) -> Self {
        Self {
            item_id,
            receiver,
            geo_lat: None,
            geo_long: None,
            metadata: String::new(),
            kind,
            quantity,
            content_hash,
            expiry,
        }
    }

    /// Attach a geo coordinate pair
    pub fn with_geo(mut self, lat: f64, long: f64) -> Self {
        self.geo_lat = Some(lat);
        self.geo_long = Some(long);
        self
    }

    /// Attach manifest text
    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = metadata.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_kind_round_trip() {
        for kind in [
            TransferKind::Handover,
            TransferKind::Transport,
            TransferKind::Disposal,
        ] {
            assert_eq!(kind.as_str().parse::<TransferKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_transfer_kind_rejects_unknown_name() {
        let err = "teleport".parse::<TransferKind>().unwrap_err();
        assert_eq!(
            err,
            CustodyError::InvalidTransferKind {
                kind: "teleport".to_string()
            }
        );
    }

    #[test]
    fn test_new_status_is_undisposed() {
        let status = CustodyStatus::new(PartyId::new("acme-chemicals"));
        assert!(!status.disposed);
        assert_eq!(status.total_transfers, 0);
        assert!(status.is_held_by(&PartyId::new("acme-chemicals")));
    }

    #[test]
    fn test_request_builders() {
        let request = TransferRequest::new(
            ItemId::new(7),
            PartyId::new("haulage-west"),
            TransferKind::Transport,
            250,
            vec![0u8; 32],
            BlockHeight::new(500),
        )
        .with_geo(40.0, -74.0)
        .with_metadata("manifest #7");

        assert_eq!(request.geo_lat, Some(40.0));
        assert_eq!(request.geo_long, Some(-74.0));
        assert_eq!(request.metadata, "manifest #7");
    }
}
