//! Value-transfer seam for the transfer fee
//!
//! Every committed transfer charges the configured fee from the caller
//! to the authority through [`FeeCollector`]. The charge is awaited to
//! completion before any ledger state is touched; a failed charge
//! aborts the whole transfer with no state change.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::Mutex;

use custody_core::PartyId;

/// Failure of the value-transfer primitive
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("insufficient balance for {payer}: required {required}, available {available}")]
pub struct FeeError {
    /// Party whose balance was debited
    pub payer: PartyId,
    /// Amount that was requested
    pub required: u64,
    /// Balance the payer actually had
    pub available: u64,
}

/// Debit-payer, credit-payee value transfer
#[async_trait]
pub trait FeeCollector: Send + Sync {
    /// Move `amount` fee units from `payer` to `payee`
    async fn charge(&self, payer: &PartyId, payee: &PartyId, amount: u64) -> Result<(), FeeError>;
}

/// One completed fee movement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeTransfer {
    pub from: PartyId,
    pub to: PartyId,
    pub amount: u64,
}

/// In-memory fee collector with seedable balances
///
/// Ships for embedding and tests; production deployments implement
/// [`FeeCollector`] against the environment's native value-transfer
/// primitive. Keeps a log of every completed charge.
#[derive(Debug, Default)]
pub struct InMemoryFeeCollector {
    balances: Mutex<HashMap<PartyId, u64>>,
    transfers: Mutex<Vec<FeeTransfer>>,
}

impl InMemoryFeeCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a party's balance
    pub async fn credit(&self, party: PartyId, amount: u64) {
        let mut balances = self.balances.lock().await;
        *balances.entry(party).or_insert(0) += amount;
    }

    /// Current balance of a party
    pub async fn balance(&self, party: &PartyId) -> u64 {
        let balances = self.balances.lock().await;
        balances.get(party).copied().unwrap_or(0)
    }

    /// Every charge completed so far, in commit order
    pub async fn transfers(&self) -> Vec<FeeTransfer> {
        self.transfers.lock().await.clone()
    }
}

#[async_trait]
impl FeeCollector for InMemoryFeeCollector {
    async fn charge(&self, payer: &PartyId, payee: &PartyId, amount: u64) -> Result<(), FeeError> {
        let mut balances = self.balances.lock().await;
        let available = balances.get(payer).copied().unwrap_or(0);
        if available < amount {
            return Err(FeeError {
                payer: payer.clone(),
                required: amount,
                available,
            });
        }
        *balances.entry(payer.clone()).or_insert(0) -= amount;
        *balances.entry(payee.clone()).or_insert(0) += amount;
        drop(balances);

        let mut transfers = self.transfers.lock().await;
        transfers.push(FeeTransfer {
            from: payer.clone(),
            to: payee.clone(),
            amount,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_charge_moves_balance() {
        let bank = InMemoryFeeCollector::new();
        let payer = PartyId::new("acme-chemicals");
        let payee = PartyId::new("env-agency");
        bank.credit(payer.clone(), 500).await;

        bank.charge(&payer, &payee, 100).await.unwrap();

        assert_eq!(bank.balance(&payer).await, 400);
        assert_eq!(bank.balance(&payee).await, 100);
        assert_eq!(bank.transfers().await.len(), 1);
    }

    #[tokio::test]
    async fn test_charge_rejects_insufficient_balance() {
        let bank = InMemoryFeeCollector::new();
        let payer = PartyId::new("acme-chemicals");
        let payee = PartyId::new("env-agency");
        bank.credit(payer.clone(), 50).await;

        let err = bank.charge(&payer, &payee, 100).await.unwrap_err();
        assert_eq!(err.required, 100);
        assert_eq!(err.available, 50);

        // Nothing moved, nothing logged
        assert_eq!(bank.balance(&payer).await, 50);
        assert_eq!(bank.balance(&payee).await, 0);
        assert!(bank.transfers().await.is_empty());
    }
}
