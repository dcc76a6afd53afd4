//! Custody Ledger - Stateful Custody Transfer Engine
//!
//! This crate holds the shared tables (role registry, item status,
//! per-item history, configuration) and the engine that mutates them:
//! transfer initiation, terminal disposal, and the authority-gated
//! administrative operations.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    CustodyLedger<F, C>                    │
//! │                                                          │
//! │   RwLock<ChainState>          external seams             │
//! │   ├─ LedgerConfig             ├─ F: FeeCollector         │
//! │   ├─ role registry            │    (value transfer)      │
//! │   ├─ status table             └─ C: ChainClock           │
//! │   └─ history table                 (block height)        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! One lock guards all tables: every mutating operation commits
//! atomically or fails with no observable change, and reads see a
//! consistent snapshot. Events are returned to the caller for
//! dispatch; the engine performs no notification I/O.

pub mod clock;
pub mod engine;
pub mod fees;


pub use clock::{ChainClock, ManualClock};
pub use engine::{CustodyLedger, LedgerStats, TransferOutcome};
pub use fees::{FeeCollector, FeeError, FeeTransfer, InMemoryFeeCollector};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
