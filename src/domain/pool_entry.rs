//! Pool entry combining the raffle state machine with server-side metadata.

use chrono::{DateTime, Utc};

use super::pool::Pool;

/// Aggregate wrapping the [`Pool`] state machine with gateway metadata.
///
/// The `pool` field holds the live raffle state (manager, entrants)
/// while the remaining fields track operational metadata exposed on
/// the detail endpoint.
#[derive(Debug)]
pub struct PoolEntry {
    /// The raffle pool state machine. Updated on enter / draw operations.
    pub pool: Pool,

    /// ISO-8601 creation timestamp (immutable after creation).
    pub created_at: DateTime<Utc>,

    /// ISO-8601 timestamp of last state mutation.
    pub last_modified_at: DateTime<Utc>,

    /// Number of completed draws across all rounds.
    pub draw_count: u64,

    /// Cumulative value ever entered, in wei, across all rounds.
    pub total_entered: u128,
}

impl PoolEntry {
    /// Creates a new `PoolEntry` around a freshly constructed pool.
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        let now = Utc::now();
        Self {
            pool,
            created_at: now,
            last_modified_at: now,
            draw_count: 0,
            total_entered: 0,
        }
    }
}
