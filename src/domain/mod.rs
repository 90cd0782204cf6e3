//! Domain layer: the raffle state machine, its environment seams, and
//! the event system.
//!
//! This module contains the core model: account identity, the pool
//! state machine with its entry metadata, the ledger and randomness
//! abstractions over the execution environment, and the event bus for
//! broadcasting state changes.

pub mod event_bus;
pub mod identity;
pub mod ledger;
pub mod pool;
pub mod pool_entry;
pub mod pool_event;
pub mod randomness;

pub use event_bus::EventBus;
pub use identity::Identity;
pub use ledger::{InMemoryLedger, Ledger};
pub use pool::Pool;
pub use pool_entry::PoolEntry;
pub use pool_event::RaffleEvent;
pub use randomness::{LedgerSeededRandomness, RandomnessSource};
