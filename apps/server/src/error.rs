use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pennywise_core::errors::{DatabaseError, Error as CoreError};
use pennywise_core::fx::FxError;
use pennywise_core::ledger::LedgerError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Not Found")]
    NotFound,
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(err: &CoreError) -> StatusCode {
    if err.is_not_found() {
        return StatusCode::NOT_FOUND;
    }
    match err {
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::Ledger(LedgerError::InvalidLink(_)) => StatusCode::BAD_REQUEST,
        CoreError::Ledger(_) => StatusCode::CONFLICT,
        CoreError::Fx(FxError::RateUnavailable { .. }) => StatusCode::CONFLICT,
        CoreError::Fx(FxError::RateFetch(_)) => StatusCode::BAD_GATEWAY,
        CoreError::Fx(FxError::InvalidRate(_)) => StatusCode::BAD_REQUEST,
        CoreError::Database(
            DatabaseError::UniqueViolation(_) | DatabaseError::ForeignKeyViolation(_),
        ) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => (core_status(e), e.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
        };
        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, msg);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pennywise_core::errors::ValidationError;
    use pennywise_core::fx::Currency;
    use pennywise_core::ledger::TransactionKind;
    use rust_decimal::Decimal;

    #[test]
    fn maps_domain_errors_to_statuses() {
        let cases = [
            (
                CoreError::from(ValidationError::InvalidInput("bad".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::from(LedgerError::NotFound("x".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                CoreError::from(LedgerError::CutExceedsRemaining {
                    requested: Decimal::TEN,
                    remaining: Decimal::ONE,
                }),
                StatusCode::CONFLICT,
            ),
            (
                CoreError::from(LedgerError::InvalidLink(TransactionKind::Income)),
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::from(FxError::RateUnavailable {
                    from: Currency::Foreign,
                    to: Currency::Base,
                }),
                StatusCode::CONFLICT,
            ),
            (
                CoreError::from(FxError::RateFetch("down".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                CoreError::Unexpected("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
