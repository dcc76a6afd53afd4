//! Common identifier and digest types
//!
//! The custody chain runs against a logical clock ("block height")
//! supplied by the execution environment, and addresses items and
//! transfers by monotonic numeric identifiers. Content hashes are fixed
//! 32-byte digests.

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::fmt;

use crate::error::{CustodyError, CustodyResult};

/// Number of bytes in a content digest
pub const DIGEST_LEN: usize = 32;

/// Item identifier - addresses one tracked custody item
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ItemId(pub u64);

impl ItemId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transfer identifier - globally unique, strictly increasing
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TransferId(pub u64);

impl TransferId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The identifier following this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logical clock value supplied by the execution environment
///
/// The ledger never advances this itself; it only reads it for
/// timestamps and expiry comparisons. The value may stay constant
/// across calls within the same commit batch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct BlockHeight(pub u64);

impl BlockHeight {
    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 32-byte content digest attached to every transfer record
///
/// Wraps a fixed-size array; variable-length input goes through the
/// fallible [`ContentDigest::from_bytes`] so an undersized or oversized
/// hash is rejected before it reaches a record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest(pub [u8; DIGEST_LEN]);

impl ContentDigest {
    /// Create a digest from a fixed-size array
    pub fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Create a digest from a byte slice, rejecting wrong lengths
    pub fn from_bytes(bytes: &[u8]) -> CustodyResult<Self> {
        if bytes.len() != DIGEST_LEN {
            return Err(CustodyError::InvalidContentHash {
                expected: DIGEST_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; DIGEST_LEN];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Create a digest from a hex string
    pub fn from_hex(s: &str) -> CustodyResult<Self> {
        let bytes = hex::decode(s).map_err(|_| CustodyError::InvalidContentHash {
            expected: DIGEST_LEN,
            actual: s.len() / 2,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Convert to a hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// SHA-256 digest of arbitrary data
    pub fn sha256(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// All-zero digest (null marker)
    pub fn zero() -> Self {
        Self([0u8; DIGEST_LEN])
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({})", self.to_hex())
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_hex_round_trip() {
        let digest = ContentDigest::sha256(b"manifest-0001");
        let restored = ContentDigest::from_hex(&digest.to_hex()).unwrap();
        assert_eq!(digest, restored);
    }

    #[test]
    fn test_digest_rejects_wrong_length() {
        let err = ContentDigest::from_bytes(&[0u8; 16]).unwrap_err();
        assert_eq!(
            err,
            CustodyError::InvalidContentHash {
                expected: 32,
                actual: 16
            }
        );
    }

    #[test]
    fn test_transfer_id_next() {
        assert_eq!(TransferId::new(0).next(), TransferId::new(1));
    }

    #[test]
    fn test_block_height_ordering() {
        assert!(BlockHeight::new(10) < BlockHeight::new(11));
        assert_eq!(BlockHeight::default(), BlockHeight::new(0));
    }
}
