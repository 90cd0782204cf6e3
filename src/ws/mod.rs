//! WebSocket layer: connection handling and message routing.

pub mod connection;
pub mod handler;
pub mod messages;
