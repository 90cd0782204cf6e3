//! Raffle service: orchestrates pool operations and emits events.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::pool::DrawOutcome;
use crate::domain::{EventBus, Identity, Ledger, PoolEntry, RaffleEvent, RandomnessSource};
use crate::error::RaffleError;

/// Pool state and metadata as returned by the detail endpoint.
#[derive(Debug, Clone)]
pub struct PoolDetails {
    /// The pool's ledger account.
    pub account: Identity,
    /// The manager identity.
    pub manager: Identity,
    /// Minimum stake threshold in wei.
    pub min_stake: u128,
    /// Current pool balance in wei.
    pub pot: u128,
    /// Current entrant count.
    pub entrant_count: usize,
    /// Completed draws across all rounds.
    pub draw_count: u64,
    /// Cumulative value ever entered, in wei.
    pub total_entered: u128,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of last state mutation.
    pub last_modified_at: DateTime<Utc>,
}

/// Result of a successful entry, for the response body.
#[derive(Debug, Clone, Copy)]
pub struct EnterOutcome {
    /// The identity that entered.
    pub entrant: Identity,
    /// Value retained by the pool, in wei.
    pub value: u128,
    /// Entrant list length after the entry.
    pub entrant_count: usize,
    /// Pool balance after the entry, in wei.
    pub pot: u128,
}

/// Orchestration layer for all raffle operations.
///
/// Owns the pool entry behind a single `RwLock`, the injected
/// [`Ledger`] and [`RandomnessSource`], and the [`EventBus`]. Every
/// mutation follows the pattern: acquire write lock → run the pool
/// state machine → update metadata → emit events → return. The single
/// lock gives the strict one-call-at-a-time serialization the state
/// machine assumes.
#[derive(Debug, Clone)]
pub struct RaffleService {
    entry: Arc<RwLock<PoolEntry>>,
    ledger: Arc<dyn Ledger>,
    randomness: Arc<dyn RandomnessSource>,
    event_bus: EventBus,
}

impl RaffleService {
    /// Creates a new `RaffleService` around a freshly constructed pool.
    #[must_use]
    pub fn new(
        entry: PoolEntry,
        ledger: Arc<dyn Ledger>,
        randomness: Arc<dyn RandomnessSource>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            entry: Arc::new(RwLock::new(entry)),
            ledger,
            randomness,
            event_bus,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the injected [`Ledger`].
    #[must_use]
    pub fn ledger(&self) -> &Arc<dyn Ledger> {
        &self.ledger
    }

    /// Enters the raffle on behalf of `caller` with `value` wei attached.
    ///
    /// # Errors
    ///
    /// Returns [`RaffleError::InsufficientStake`] when the value does
    /// not strictly exceed the minimum stake; no state changes.
    pub async fn enter(&self, caller: Identity, value: u128) -> Result<EnterOutcome, RaffleError> {
        let mut entry = self.entry.write().await;

        entry.pool.enter(caller, value, self.ledger.as_ref())?;

        entry.total_entered = entry.total_entered.saturating_add(value);
        entry.last_modified_at = Utc::now();

        let entrant_count = entry.pool.entrants().len();
        let pot = self.ledger.balance_of(&entry.pool.account());
        drop(entry);

        let _ = self.event_bus.publish(RaffleEvent::EntrantJoined {
            entrant: caller,
            value: value.to_string(),
            entrant_count,
            pot: pot.to_string(),
            timestamp: Utc::now(),
        });

        tracing::info!(entrant = %caller, value, entrant_count, "entrant joined");
        Ok(EnterOutcome {
            entrant: caller,
            value,
            entrant_count,
            pot,
        })
    }

    /// Draws a winner, pays out the pot, and resets the pool.
    ///
    /// # Errors
    ///
    /// Returns [`RaffleError::Unauthorized`] for non-manager callers,
    /// [`RaffleError::NoEntrants`] on an empty pool, or
    /// [`RaffleError::TransferFailure`] when the payout fails; in
    /// every case the pool state is unchanged.
    pub async fn draw_winner(&self, caller: Identity) -> Result<DrawOutcome, RaffleError> {
        let mut entry = self.entry.write().await;

        let outcome =
            entry
                .pool
                .draw_winner(caller, self.randomness.as_ref(), self.ledger.as_ref())?;

        entry.draw_count = entry.draw_count.saturating_add(1);
        entry.last_modified_at = Utc::now();
        drop(entry);

        let _ = self.event_bus.publish(RaffleEvent::WinnerDrawn {
            winner: outcome.winner,
            payout: outcome.payout.to_string(),
            entrant_count: outcome.entrant_count,
            timestamp: Utc::now(),
        });

        tracing::info!(
            winner = %outcome.winner,
            payout = outcome.payout,
            entrant_count = outcome.entrant_count,
            "winner drawn"
        );
        Ok(outcome)
    }

    /// Returns the current entrants in insertion order, duplicates
    /// included. Read-only; any caller may invoke it.
    pub async fn list_entrants(&self) -> Vec<Identity> {
        self.entry.read().await.pool.entrants().to_vec()
    }

    /// Returns the pool's state and operational metadata.
    pub async fn pool_details(&self) -> PoolDetails {
        let entry = self.entry.read().await;
        PoolDetails {
            account: entry.pool.account(),
            manager: entry.pool.manager(),
            min_stake: entry.pool.min_stake(),
            pot: self.ledger.balance_of(&entry.pool.account()),
            entrant_count: entry.pool.entrants().len(),
            draw_count: entry.draw_count,
            total_entered: entry.total_entered,
            created_at: entry.created_at,
            last_modified_at: entry.last_modified_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::pool::{DEFAULT_MIN_STAKE, Pool};
    use crate::domain::randomness::FixedRandomness;
    use crate::domain::{InMemoryLedger, LedgerSeededRandomness};

    const MIN: u128 = DEFAULT_MIN_STAKE;

    fn make_service() -> (RaffleService, Identity, Arc<InMemoryLedger>) {
        let ledger = Arc::new(InMemoryLedger::new());
        let manager = Identity::new();
        let pool = Pool::new(Identity::new(), manager, MIN);
        let service = RaffleService::new(
            PoolEntry::new(pool),
            Arc::clone(&ledger) as Arc<dyn Ledger>,
            Arc::new(LedgerSeededRandomness::new()),
            EventBus::new(1000),
        );
        (service, manager, ledger)
    }

    #[tokio::test]
    async fn enter_emits_event_and_updates_metadata() {
        let (service, _, _) = make_service();
        let mut rx = service.event_bus().subscribe();
        let alice = Identity::new();

        let result = service.enter(alice, MIN * 2).await;
        let Ok(outcome) = result else {
            panic!("enter failed");
        };
        assert_eq!(outcome.entrant_count, 1);
        assert_eq!(outcome.pot, MIN * 2);

        let event = rx.recv().await;
        let Ok(event) = event else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "entrant_joined");

        let details = service.pool_details().await;
        assert_eq!(details.total_entered, MIN * 2);
        assert_eq!(details.entrant_count, 1);
    }

    #[tokio::test]
    async fn rejected_entry_leaves_no_trace() {
        let (service, _, _) = make_service();
        let mut rx = service.event_bus().subscribe();

        let result = service.enter(Identity::new(), MIN).await;
        assert!(matches!(result, Err(RaffleError::InsufficientStake { .. })));

        assert!(service.list_entrants().await.is_empty());
        let details = service.pool_details().await;
        assert_eq!(details.pot, 0);
        assert_eq!(details.total_entered, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn list_entrants_preserves_order_and_duplicates() {
        let (service, _, _) = make_service();
        let a1 = Identity::new();
        let a2 = Identity::new();

        for caller in [a1, a2, a1] {
            let result = service.enter(caller, MIN * 2).await;
            assert!(result.is_ok());
        }

        assert_eq!(service.list_entrants().await, vec![a1, a2, a1]);
    }

    #[tokio::test]
    async fn draw_requires_the_manager() {
        let (service, _, _) = make_service();
        let result = service.enter(Identity::new(), MIN * 2).await;
        assert!(result.is_ok());

        let outsider = Identity::new();
        let draw = service.draw_winner(outsider).await;
        assert!(matches!(draw, Err(RaffleError::Unauthorized(_))));
        assert_eq!(service.list_entrants().await.len(), 1);
    }

    #[tokio::test]
    async fn draw_resets_pool_and_emits_event() {
        let (service, manager, ledger) = make_service();
        for _ in 0..3 {
            let result = service.enter(Identity::new(), MIN * 2).await;
            assert!(result.is_ok());
        }
        let mut rx = service.event_bus().subscribe();

        let draw = service.draw_winner(manager).await;
        let Ok(outcome) = draw else {
            panic!("draw failed");
        };
        assert_eq!(outcome.payout, MIN * 6);
        assert_eq!(ledger.balance_of(&outcome.winner), MIN * 6);

        assert!(service.list_entrants().await.is_empty());
        let details = service.pool_details().await;
        assert_eq!(details.pot, 0);
        assert_eq!(details.draw_count, 1);

        let event = rx.recv().await;
        let Ok(event) = event else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "winner_drawn");
    }

    #[tokio::test]
    async fn draw_on_empty_pool_fails_without_event() {
        let (service, manager, _) = make_service();
        let mut rx = service.event_bus().subscribe();

        let draw = service.draw_winner(manager).await;
        assert!(matches!(draw, Err(RaffleError::NoEntrants)));
        assert!(rx.try_recv().is_err());
        assert_eq!(service.pool_details().await.draw_count, 0);
    }

    #[tokio::test]
    async fn failed_payout_leaves_pool_intact() {
        let (service, manager, ledger) = make_service();
        let entrant = Identity::new();
        let result = service.enter(entrant, MIN * 2).await;
        assert!(result.is_ok());
        ledger.set_accepting(entrant, false);

        let draw = service.draw_winner(manager).await;
        assert!(matches!(draw, Err(RaffleError::TransferFailure(_))));
        assert_eq!(service.list_entrants().await, vec![entrant]);
        let details = service.pool_details().await;
        assert_eq!(details.pot, MIN * 2);
        assert_eq!(details.draw_count, 0);
    }

    #[tokio::test]
    async fn deterministic_randomness_picks_expected_entrant() {
        let ledger = Arc::new(InMemoryLedger::new());
        let manager = Identity::new();
        let pool = Pool::new(Identity::new(), manager, MIN);
        let service = RaffleService::new(
            PoolEntry::new(pool),
            Arc::clone(&ledger) as Arc<dyn Ledger>,
            Arc::new(FixedRandomness(2)),
            EventBus::new(1000),
        );

        let entrants: Vec<Identity> = (0..4).map(|_| Identity::new()).collect();
        for e in &entrants {
            let result = service.enter(*e, MIN * 2).await;
            assert!(result.is_ok());
        }

        let draw = service.draw_winner(manager).await;
        let Ok(outcome) = draw else {
            panic!("draw failed");
        };
        assert_eq!(Some(outcome.winner), entrants.get(2).copied());
    }

    #[tokio::test]
    async fn pool_reusable_for_multiple_rounds() {
        let (service, manager, _) = make_service();

        for round in 1..=3u64 {
            let result = service.enter(Identity::new(), MIN * 2).await;
            assert!(result.is_ok());
            let draw = service.draw_winner(manager).await;
            assert!(draw.is_ok());
            let details = service.pool_details().await;
            assert_eq!(details.draw_count, round);
            assert_eq!(details.pot, 0);
            assert_eq!(details.entrant_count, 0);
        }
    }
}
