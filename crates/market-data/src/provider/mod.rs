//! Rate providers.

pub mod cnb;
