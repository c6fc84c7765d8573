use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use pennywise_core::balance::BalanceSummary;

/// Balance and projected balance in the base currency.
async fn get_balance(State(state): State<Arc<AppState>>) -> ApiResult<Json<BalanceSummary>> {
    let summary = state.balance_service.get_balance()?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/balance", get(get_balance))
}
