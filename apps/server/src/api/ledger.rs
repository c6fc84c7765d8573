use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{CutRequestBody, ListQuery, NewTransactionRequest, TransactionUpdateRequest},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use pennywise_core::ledger::{CutRequest, NewTransaction, Transaction};

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state.ledger_service.list_transactions(query.kind()?)?;
    Ok(Json(transactions))
}

async fn get_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Transaction>> {
    Ok(Json(state.ledger_service.get_transaction(&id)?))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewTransactionRequest>,
) -> ApiResult<Json<Transaction>> {
    let new = NewTransaction::try_from(payload)?;
    let created = state.ledger_service.create_transaction(new).await?;
    Ok(Json(created))
}

async fn update_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TransactionUpdateRequest>,
) -> ApiResult<Json<Transaction>> {
    let update = payload.into_update(id)?;
    let updated = state.ledger_service.update_transaction(update).await?;
    Ok(Json(updated))
}

async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.ledger_service.delete_transaction(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn cut_expected(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CutRequestBody>,
) -> ApiResult<Json<Transaction>> {
    let cut = CutRequest::try_from(payload)?;
    let cost = state.ledger_service.cut_expected(&id, cut).await?;
    Ok(Json(cost))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
        .route("/transactions/{id}/cut", post(cut_expected))
}
