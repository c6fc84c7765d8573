//! Pennywise Market Data Crate
//!
//! Fetches and parses the Czech National Bank (CNB) daily exchange rate fixing.
//!
//! # Overview
//!
//! CNB publishes one plain-text file per business day listing how many CZK
//! a given quantity of each foreign currency costs:
//!
//! ```text
//! 16.10.2026 #200
//! země|měna|množství|kód|kurz
//! Japonsko|jen|100|JPY|15,487
//! Velká Británie|libra|1|GBP|28,146
//! ```
//!
//! # Core Types
//!
//! - [`CnbProvider`] - HTTP client for the daily file
//! - [`CnbDailyRates`] - One parsed publication
//! - [`CnbRate`] - One currency row
//! - [`MarketDataError`] - Errors with a retry classification

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{MarketDataError, RetryClass};
pub use models::{CnbDailyRates, CnbRate};
pub use provider::cnb::{parse_daily_rates, CnbProvider};
