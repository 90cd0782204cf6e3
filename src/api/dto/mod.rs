//! Data Transfer Objects for REST request/response serialization.
//!
//! All wei amounts are serialized as JSON strings to prevent
//! precision loss on u128 values.

pub mod pool_dto;

pub use pool_dto::*;
