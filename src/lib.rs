//! # raffle-gateway
//!
//! REST API and WebSocket gateway for a manager-drawn raffle pool.
//!
//! This crate provides an HTTP and WebSocket interface around a single
//! raffle pool: anyone staking more than the minimum joins the entrant
//! list, and the designated manager triggers draws that pay the entire
//! pot to one pseudo-randomly selected entrant and reset the pool. The
//! execution environment (balance ledger, randomness seed material) is
//! injected behind traits — this service is a coordination layer around
//! the pool state machine.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── RaffleService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── Pool state machine (domain/)
//!     └── Ledger + RandomnessSource (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
