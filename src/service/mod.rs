//! Service layer: business logic orchestration.

pub mod raffle_service;

pub use raffle_service::RaffleService;
