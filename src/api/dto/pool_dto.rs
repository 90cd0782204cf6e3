//! Raffle DTOs for the enter, draw, and query operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Identity;

/// Request body for `POST /pool/enter`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EnterRequest {
    /// Identity of the caller entering the raffle.
    pub caller: Identity,
    /// Value attached to the call (string-encoded u128 wei). Must
    /// strictly exceed the pool's minimum stake.
    pub value: String,
}

/// Response body for `POST /pool/enter`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EnterResponse {
    /// The identity that entered.
    pub entrant: Identity,
    /// Value retained by the pool (string-encoded u128 wei).
    pub value: String,
    /// Entrant list length after the entry.
    pub entrant_count: usize,
    /// Pool balance after the entry (string-encoded u128 wei).
    pub pot: String,
    /// Entry timestamp.
    pub entered_at: DateTime<Utc>,
}

/// Request body for `POST /pool/draw`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DrawRequest {
    /// Identity of the caller. Must equal the pool manager.
    pub caller: Identity,
}

/// Response body for `POST /pool/draw`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DrawResponse {
    /// The entrant the pot was paid to.
    pub winner: Identity,
    /// Amount transferred (string-encoded u128 wei).
    pub payout: String,
    /// Number of entrants the winner was drawn from.
    pub entrant_count: usize,
    /// Draw timestamp.
    pub drawn_at: DateTime<Utc>,
}

/// Response body for `GET /pool/entrants`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EntrantListResponse {
    /// Entrants in insertion order, duplicates included.
    pub entrants: Vec<Identity>,
    /// Convenience count, equal to `entrants.len()`.
    pub count: usize,
}

/// Response body for `GET /pool`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolDetailResponse {
    /// The pool's ledger account.
    pub account: Identity,
    /// The manager identity fixed at construction.
    pub manager: Identity,
    /// Minimum stake threshold (string-encoded u128 wei).
    pub min_stake: String,
    /// Current pool balance (string-encoded u128 wei).
    pub pot: String,
    /// Current entrant count.
    pub entrant_count: usize,
    /// Completed draws across all rounds.
    pub draw_count: u64,
    /// Cumulative value ever entered (string-encoded u128 wei).
    pub total_entered: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last state mutation timestamp.
    pub updated_at: DateTime<Utc>,
}
