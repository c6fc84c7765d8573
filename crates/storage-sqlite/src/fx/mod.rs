//! SQLite storage implementation for the current exchange rate.

mod model;
mod repository;

pub use model::ExchangeRateDB;
pub use repository::FxRepository;
