//! The raffle pool state machine.
//!
//! [`Pool`] owns the manager identity and the ordered entrant list; the
//! pooled balance lives on the [`Ledger`] under the pool's own account.
//! Two mutations (`enter`, `draw_winner`) and one read (`entrants`)
//! make up the entire machine. Invariants:
//!
//! - the entrant list is empty exactly when the pool balance is zero;
//! - every entrant deposited more than the minimum stake when appended;
//! - only the manager may trigger a draw;
//! - a successful draw pays the entire balance to exactly one entrant
//!   and clears the list in the same atomic step.

use super::Identity;
use super::ledger::Ledger;
use super::randomness::RandomnessSource;
use crate::error::RaffleError;

/// Default minimum stake: 0.01 ether in wei.
pub const DEFAULT_MIN_STAKE: u128 = 10_000_000_000_000_000;

/// Outcome of a successful draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawOutcome {
    /// The entrant the pot was paid to.
    pub winner: Identity,
    /// Amount transferred, in wei. The entire pool balance.
    pub payout: u128,
    /// Number of entrants the winner was drawn from.
    pub entrant_count: usize,
}

/// The raffle pool: manager, entrant list, and stake policy.
///
/// Created once at startup and reused for unlimited rounds. All
/// fallible checks run before any mutation, so every operation either
/// fully commits or leaves no trace.
#[derive(Debug)]
pub struct Pool {
    /// The pool's own ledger account. Holds the pot.
    account: Identity,
    /// Set to the creator at construction, immutable afterwards.
    manager: Identity,
    /// Insertion-ordered entrants; duplicates allowed.
    entrants: Vec<Identity>,
    /// Threshold an entry must strictly exceed, in wei.
    min_stake: u128,
}

impl Pool {
    /// Creates a pool managed by `manager`, holding funds under
    /// `account`, with the given minimum stake.
    #[must_use]
    pub fn new(account: Identity, manager: Identity, min_stake: u128) -> Self {
        Self {
            account,
            manager,
            entrants: Vec::new(),
            min_stake,
        }
    }

    /// The pool's ledger account.
    #[must_use]
    pub const fn account(&self) -> Identity {
        self.account
    }

    /// The manager identity fixed at construction.
    #[must_use]
    pub const fn manager(&self) -> Identity {
        self.manager
    }

    /// The minimum stake threshold in wei.
    #[must_use]
    pub const fn min_stake(&self) -> u128 {
        self.min_stake
    }

    /// Current entrants in insertion order, duplicates included.
    #[must_use]
    pub fn entrants(&self) -> &[Identity] {
        &self.entrants
    }

    /// Joins the raffle with `value` wei attached.
    ///
    /// The value must STRICTLY exceed the minimum stake; a deposit of
    /// exactly the minimum is rejected. On success the value is
    /// retained on the pool account and the caller is appended to the
    /// entrant list — one element per call, no deduplication.
    ///
    /// # Errors
    ///
    /// Returns [`RaffleError::InsufficientStake`] when
    /// `value <= min_stake`; nothing is retained and the list is
    /// unchanged.
    pub fn enter(&mut self, caller: Identity, value: u128, ledger: &dyn Ledger) -> Result<(), RaffleError> {
        if value <= self.min_stake {
            return Err(RaffleError::InsufficientStake {
                attached: value,
                minimum: self.min_stake,
            });
        }

        ledger.credit(&self.account, value);
        self.entrants.push(caller);
        Ok(())
    }

    /// Draws a winner, pays out the entire pot, and resets the pool.
    ///
    /// Only the manager may call this. The winning index comes from
    /// the injected [`RandomnessSource`] evaluated against the
    /// ledger's current metadata. Payout and list-clear are atomic: if
    /// the transfer fails the draw rolls back whole, leaving entrants
    /// and balance untouched.
    ///
    /// # Errors
    ///
    /// - [`RaffleError::Unauthorized`] when `caller` is not the manager.
    /// - [`RaffleError::NoEntrants`] when the pool is empty.
    /// - [`RaffleError::TransferFailure`] when the winner cannot accept
    ///   the payout; state unchanged, the caller may retry later.
    pub fn draw_winner(
        &mut self,
        caller: Identity,
        randomness: &dyn RandomnessSource,
        ledger: &dyn Ledger,
    ) -> Result<DrawOutcome, RaffleError> {
        if caller != self.manager {
            return Err(RaffleError::Unauthorized(caller));
        }
        if self.entrants.is_empty() {
            return Err(RaffleError::NoEntrants);
        }

        let bound = self.entrants.len() as u64;
        let index = randomness.draw_index(&ledger.metadata(), bound);
        let winner = self
            .entrants
            .get(index as usize)
            .copied()
            .ok_or_else(|| {
                RaffleError::Internal(format!("draw index {index} out of range {bound}"))
            })?;

        let payout = ledger.balance_of(&self.account);
        ledger.transfer(&self.account, &winner, payout)?;

        let entrant_count = self.entrants.len();
        self.entrants.clear();

        Ok(DrawOutcome {
            winner,
            payout,
            entrant_count,
        })
    }
}
