//! Field validation rules for transfer requests
//!
//! Stateless predicate functions, one per field. Each checks its field
//! in isolation against input and configuration only; none touches
//! ledger state. [`validate_transfer_request`] runs them in the fixed
//! order the engine uses, short-circuiting on the first failure.
//!
//! # Rules
//!
//! 1. Item identifier must be a positive integer
//! 2. Receiver must differ from the sender (no self-transfer)
//! 3. A present latitude must lie in [-90, 90], a present longitude in
//!    [-180, 180]; either coordinate may be absent
//! 4. Metadata must not exceed 256 bytes
//! 5. Quantity must be strictly positive
//! 6. Content hash must be exactly 32 bytes
//! 7. Expiry must be strictly beyond the current block height

use crate::config::{
    MAX_LATITUDE, MAX_LONGITUDE, MAX_METADATA_BYTES, MIN_LATITUDE, MIN_LONGITUDE,
};
use crate::error::{CustodyError, CustodyResult};
use crate::types::{BlockHeight, ItemId, PartyId, TransferRequest, DIGEST_LEN};

/// Validates that the item identifier is positive.
pub fn validate_item_id(item_id: ItemId) -> CustodyResult<()> {
    if item_id.value() == 0 {
        return Err(CustodyError::InvalidItemId {
            item_id: item_id.value(),
        });
    }
    Ok(())
}

/// Validates that the receiver differs from the sender.
///
/// The enforced invariant is "no self-transfer": an item cannot be
/// handed over to the party that already holds it.
pub fn validate_receiver(sender: &PartyId, receiver: &PartyId) -> CustodyResult<()> {
    if sender == receiver {
        return Err(CustodyError::SelfTransfer {
            party: sender.clone(),
        });
    }
    Ok(())
}

/// Validates geo coordinates.
///
/// Each coordinate is optional independently; a present latitude must
/// lie in [-90, 90] and a present longitude in [-180, 180].
pub fn validate_geo(lat: Option<f64>, long: Option<f64>) -> CustodyResult<()> {
    if let Some(lat_value) = lat {
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&lat_value) {
            return Err(CustodyError::InvalidGeoData { lat, long });
        }
    }
    if let Some(long_value) = long {
        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&long_value) {
            return Err(CustodyError::InvalidGeoData { lat, long });
        }
    }
    Ok(())
}

/// Validates the metadata length.
pub fn validate_metadata(metadata: &str) -> CustodyResult<()> {
    if metadata.len() > MAX_METADATA_BYTES {
        return Err(CustodyError::InvalidMetadata {
            length: metadata.len(),
            max: MAX_METADATA_BYTES,
        });
    }
    Ok(())
}

/// Validates that the quantity is strictly positive.
pub fn validate_quantity(quantity: u64) -> CustodyResult<()> {
    if quantity == 0 {
        return Err(CustodyError::InvalidQuantity { quantity });
    }
    Ok(())
}

/// Validates that the content hash is exactly 32 bytes.
pub fn validate_content_hash(hash: &[u8]) -> CustodyResult<()> {
    if hash.len() != DIGEST_LEN {
        return Err(CustodyError::InvalidContentHash {
            expected: DIGEST_LEN,
            actual: hash.len(),
        });
    }
    Ok(())
}

/// Validates that the expiry lies strictly beyond the current height.
pub fn validate_expiry(expiry: BlockHeight, current: BlockHeight) -> CustodyResult<()> {
    if expiry <= current {
        return Err(CustodyError::InvalidExpiry { expiry, current });
    }
    Ok(())
}

/// Runs every field validator in the engine's fixed order.
///
/// The first failure short-circuits; a request that passes here is
/// structurally sound and ready for the authorization checks.
pub fn validate_transfer_request(
    sender: &PartyId,
    request: &TransferRequest,
    current: BlockHeight,
) -> CustodyResult<()> {
    validate_item_id(request.item_id)?;
    validate_receiver(sender, &request.receiver)?;
    validate_geo(request.geo_lat, request.geo_long)?;
    validate_metadata(&request.metadata)?;
    validate_quantity(request.quantity)?;
    validate_content_hash(&request.content_hash)?;
    validate_expiry(request.expiry, current)?;
    Ok(())
}
