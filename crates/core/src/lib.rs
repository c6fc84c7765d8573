//! Pennywise Core - Domain entities, services, and traits.
//!
//! This crate contains the ledger, exchange rate and balance logic for Pennywise.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod balance;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod ledger;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
