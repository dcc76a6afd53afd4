//! Domain types for the custody ledger

mod common;
mod custody;
mod party;

pub use common::{BlockHeight, ContentDigest, ItemId, TransferId, DIGEST_LEN};
pub use custody::{CustodyStatus, TransferKind, TransferRecord, TransferRequest};
pub use party::{PartyId, Role};
