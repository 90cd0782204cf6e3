//! Ledger abstraction over the execution environment.
//!
//! The raffle core never holds funds itself: balances live in an
//! external ledger that commits one call at a time. [`Ledger`] is the
//! seam the core depends on; [`InMemoryLedger`] is the concrete
//! environment the gateway runs against.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use chrono::Utc;
use thiserror::Error;

use super::Identity;

/// Block-style metadata the ledger exposes after every committed call.
///
/// Deterministic and public — this is the seed material for winner
/// selection, which is exactly why the randomness is only
/// pseudo-random.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerMeta {
    /// Number of mutations committed so far.
    pub height: u64,
    /// Wall-clock timestamp of the last committed mutation, in
    /// milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

/// Failures raised by the ledger itself.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// The destination account refuses incoming transfers.
    #[error("account {0} cannot accept funds")]
    CannotAccept(Identity),

    /// The source account does not hold the requested amount.
    #[error("account {account} holds {available} wei, {requested} requested")]
    InsufficientFunds {
        /// Account the transfer was drawn from.
        account: Identity,
        /// Amount requested, in wei.
        requested: u128,
        /// Amount actually available, in wei.
        available: u128,
    },
}

/// Value store and transfer engine provided by the environment.
///
/// Implementations must make each method an atomic unit: a failed
/// [`Ledger::transfer`] leaves both accounts unchanged.
pub trait Ledger: Send + Sync + std::fmt::Debug {
    /// Returns the balance of `account` in wei (zero if unknown).
    fn balance_of(&self, account: &Identity) -> u128;

    /// Retains value attached to a call: credits `amount` to `account`.
    fn credit(&self, account: &Identity, amount: u128);

    /// Moves `amount` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientFunds`] if `from` holds less
    /// than `amount`, or [`LedgerError::CannotAccept`] if `to` refuses
    /// incoming transfers. Neither account is modified on error.
    fn transfer(&self, from: &Identity, to: &Identity, amount: u128) -> Result<(), LedgerError>;

    /// Returns the metadata of the last committed mutation.
    fn metadata(&self) -> LedgerMeta;
}

/// In-process ledger backed by a `HashMap` of balances.
///
/// Accounts can be flagged as non-accepting via
/// [`InMemoryLedger::set_accepting`] to exercise payout-failure paths.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    inner: RwLock<LedgerState>,
}

#[derive(Debug, Default)]
struct LedgerState {
    balances: HashMap<Identity, u128>,
    refusing: HashSet<Identity>,
    meta: LedgerMeta,
}

impl Default for LedgerMeta {
    fn default() -> Self {
        Self {
            height: 0,
            timestamp_ms: Utc::now().timestamp_millis(),
        }
    }
}

impl InMemoryLedger {
    /// Creates an empty ledger at height zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks whether `account` accepts incoming transfers.
    pub fn set_accepting(&self, account: Identity, accepting: bool) {
        let mut state = self.write_state();
        if accepting {
            state.refusing.remove(&account);
        } else {
            state.refusing.insert(account);
        }
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, LedgerState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, LedgerState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LedgerState {
    fn advance(&mut self) {
        self.meta = LedgerMeta {
            height: self.meta.height.saturating_add(1),
            timestamp_ms: Utc::now().timestamp_millis(),
        };
    }
}

impl Ledger for InMemoryLedger {
    fn balance_of(&self, account: &Identity) -> u128 {
        self.read_state().balances.get(account).copied().unwrap_or(0)
    }

    fn credit(&self, account: &Identity, amount: u128) {
        let mut state = self.write_state();
        let entry = state.balances.entry(*account).or_insert(0);
        *entry = entry.saturating_add(amount);
        state.advance();
    }

    fn transfer(&self, from: &Identity, to: &Identity, amount: u128) -> Result<(), LedgerError> {
        let mut state = self.write_state();

        if state.refusing.contains(to) {
            return Err(LedgerError::CannotAccept(*to));
        }

        let available = state.balances.get(from).copied().unwrap_or(0);
        if available < amount {
            return Err(LedgerError::InsufficientFunds {
                account: *from,
                requested: amount,
                available,
            });
        }

        state.balances.insert(*from, available - amount);
        let dest = state.balances.entry(*to).or_insert(0);
        *dest = dest.saturating_add(amount);
        state.advance();
        Ok(())
    }

    fn metadata(&self) -> LedgerMeta {
        self.read_state().meta
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn credit_accumulates_balance() {
        let ledger = InMemoryLedger::new();
        let account = Identity::new();

        ledger.credit(&account, 100);
        ledger.credit(&account, 250);

        assert_eq!(ledger.balance_of(&account), 350);
    }

    #[test]
    fn unknown_account_has_zero_balance() {
        let ledger = InMemoryLedger::new();
        assert_eq!(ledger.balance_of(&Identity::new()), 0);
    }

    #[test]
    fn transfer_moves_full_amount() {
        let ledger = InMemoryLedger::new();
        let from = Identity::new();
        let to = Identity::new();
        ledger.credit(&from, 1_000);

        let result = ledger.transfer(&from, &to, 1_000);
        assert!(result.is_ok());
        assert_eq!(ledger.balance_of(&from), 0);
        assert_eq!(ledger.balance_of(&to), 1_000);
    }

    #[test]
    fn transfer_rejects_overdraft() {
        let ledger = InMemoryLedger::new();
        let from = Identity::new();
        let to = Identity::new();
        ledger.credit(&from, 10);

        let result = ledger.transfer(&from, &to, 11);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientFunds { requested: 11, available: 10, .. })
        ));
        // Nothing moved
        assert_eq!(ledger.balance_of(&from), 10);
        assert_eq!(ledger.balance_of(&to), 0);
    }

    #[test]
    fn transfer_rejects_refusing_destination() {
        let ledger = InMemoryLedger::new();
        let from = Identity::new();
        let to = Identity::new();
        ledger.credit(&from, 500);
        ledger.set_accepting(to, false);

        let result = ledger.transfer(&from, &to, 500);
        assert!(matches!(result, Err(LedgerError::CannotAccept(id)) if id == to));
        assert_eq!(ledger.balance_of(&from), 500);
        assert_eq!(ledger.balance_of(&to), 0);
    }

    #[test]
    fn destination_accepts_again_after_reset() {
        let ledger = InMemoryLedger::new();
        let from = Identity::new();
        let to = Identity::new();
        ledger.credit(&from, 500);
        ledger.set_accepting(to, false);
        ledger.set_accepting(to, true);

        assert!(ledger.transfer(&from, &to, 500).is_ok());
        assert_eq!(ledger.balance_of(&to), 500);
    }

    #[test]
    fn metadata_advances_on_mutation() {
        let ledger = InMemoryLedger::new();
        let account = Identity::new();
        let before = ledger.metadata();

        ledger.credit(&account, 1);
        let after = ledger.metadata();
        assert_eq!(after.height, before.height + 1);

        // A failed transfer commits nothing and does not advance
        let result = ledger.transfer(&account, &Identity::new(), 999);
        assert!(result.is_err());
        assert_eq!(ledger.metadata().height, after.height);
    }
}
