use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::ManualRateRequest,
};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use pennywise_core::fx::Rate;

async fn get_rate(State(state): State<Arc<AppState>>) -> ApiResult<Json<Rate>> {
    state
        .fx_service
        .get_current()?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn set_manual_rate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ManualRateRequest>,
) -> ApiResult<Json<Rate>> {
    let rate = state.fx_service.set_manual(payload.value()?).await?;
    tracing::info!("Manual rate set to {}", rate.value);
    Ok(Json(rate))
}

/// Fetches today's fixing. On failure the previous rate stays in effect.
async fn refresh_rate(State(state): State<Arc<AppState>>) -> ApiResult<Json<Rate>> {
    let rate = state.fx_service.refresh().await?;
    Ok(Json(rate))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rate", get(get_rate).put(set_manual_rate))
        .route("/rate/refresh", post(refresh_rate))
}
