use std::sync::Arc;

use crate::config::Config;
use pennywise_core::{
    balance::{BalanceService, BalanceServiceTrait},
    fx::{CnbRateSource, FxService, FxServiceTrait},
    ledger::{LedgerService, LedgerServiceTrait},
};
use pennywise_market_data::CnbProvider;
use pennywise_storage_sqlite::{db, fx::FxRepository, ledger::LedgerRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub ledger_service: Arc<dyn LedgerServiceTrait>,
    pub balance_service: Arc<dyn BalanceServiceTrait>,
    pub fx_service: Arc<dyn FxServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("PW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let fx_repo = Arc::new(FxRepository::new(pool.clone(), writer.clone()));
    let rate_source = Arc::new(CnbRateSource::new(CnbProvider::with_base_url(
        config.cnb_base_url.clone(),
    )));
    let fx_service = Arc::new(FxService::new(fx_repo, rate_source));
    fx_service.initialize()?;

    let ledger_repo = Arc::new(LedgerRepository::new(pool.clone(), writer));
    let ledger_service = Arc::new(LedgerService::new(ledger_repo.clone()));
    let balance_service = Arc::new(BalanceService::new(ledger_repo, fx_service.clone()));

    Ok(Arc::new(AppState {
        ledger_service,
        balance_service,
        fx_service,
    }))
}
