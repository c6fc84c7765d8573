//! FX (Foreign Exchange) module - the current CZK→GBP rate, its sources and persistence.

mod cnb_source;
mod fx_errors;
mod fx_model;
mod fx_service;
mod fx_traits;

#[cfg(test)]
mod fx_service_tests;

pub use cnb_source::CnbRateSource;
pub use fx_errors::FxError;
pub use fx_model::{Currency, DataSource, Rate};
pub use fx_service::FxService;
pub use fx_traits::{FxRepositoryTrait, FxServiceTrait, RateSourceTrait};
