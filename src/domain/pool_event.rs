//! Domain events reflecting raffle state mutations.
//!
//! Every state change emits a [`RaffleEvent`] through the
//! [`super::EventBus`]. Events are broadcast to WebSocket subscribers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Identity;

/// Domain event emitted after every state mutation.
///
/// All wei amounts are stored as `String` to preserve u128 precision
/// when serialized to JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum RaffleEvent {
    /// Emitted when an entrant joins the pool.
    EntrantJoined {
        /// The identity that entered.
        entrant: Identity,
        /// Value attached to the entry (string-encoded u128 wei).
        value: String,
        /// Entrant list length after the entry.
        entrant_count: usize,
        /// Pool balance after the entry (string-encoded u128 wei).
        pot: String,
        /// Entry timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a successful draw.
    WinnerDrawn {
        /// The entrant the pot was paid to.
        winner: Identity,
        /// Amount transferred (string-encoded u128 wei).
        payout: String,
        /// Number of entrants the winner was drawn from.
        entrant_count: usize,
        /// Draw timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl RaffleEvent {
    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::EntrantJoined { .. } => "entrant_joined",
            Self::WinnerDrawn { .. } => "winner_drawn",
        }
    }
}
