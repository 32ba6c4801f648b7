//! Funding account used to pay the oracle fee
//!
//! Balances are integers in the fee token's smallest unit. A request only
//! proceeds when the account covers the whole fee.

use crate::error::RevealError;
use serde::{Deserialize, Serialize};

/// Account that pays for randomness requests
///
/// # Example
/// ```
/// use booster_traits_core_rs::FundingAccount;
///
/// let mut account = FundingAccount::new(1_000);
/// account.debit(400).unwrap();
/// assert_eq!(account.balance(), 600);
/// assert!(account.debit(601).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingAccount {
    balance: u128,
}

impl FundingAccount {
    pub fn new(balance: u128) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u128 {
        self.balance
    }

    pub fn can_pay(&self, amount: u128) -> bool {
        self.balance >= amount
    }

    /// Fails with `InsufficientFunds` without touching the balance
    pub fn ensure_covers(&self, amount: u128) -> Result<(), RevealError> {
        if self.can_pay(amount) {
            Ok(())
        } else {
            Err(RevealError::InsufficientFunds {
                required: amount,
                available: self.balance,
            })
        }
    }

    pub fn debit(&mut self, amount: u128) -> Result<(), RevealError> {
        self.ensure_covers(amount)?;
        self.balance -= amount;
        Ok(())
    }

    pub fn credit(&mut self, amount: u128) {
        self.balance = self.balance.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_exact_balance() {
        let mut account = FundingAccount::new(100);
        account.debit(100).unwrap();
        assert_eq!(account.balance(), 0);
    }

    #[test]
    fn test_failed_debit_leaves_balance() {
        let mut account = FundingAccount::new(10);
        let err = account.debit(11).unwrap_err();
        assert_eq!(
            err,
            RevealError::InsufficientFunds {
                required: 11,
                available: 10
            }
        );
        assert_eq!(account.balance(), 10);
    }

    #[test]
    fn test_credit() {
        let mut account = FundingAccount::default();
        account.credit(7);
        assert!(account.can_pay(7));
        assert!(!account.can_pay(8));
    }
}
