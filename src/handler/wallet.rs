// handler/wallet.rs
use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;
use validator::Validate;

use crate::{
    dtos::{
        gigdtos::ApiResponse,
        walletdtos::{BalanceResponseDto, DepositDto},
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    service::error::ServiceError,
    AppState,
};

pub fn wallet_handler() -> Router {
    Router::new()
        .route("/balance", get(get_balance))
        .route("/deposit", post(deposit))
        .route("/transactions", get(get_transactions))
}

pub async fn get_balance(
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(BalanceResponseDto {
        status: "success".to_string(),
        balance: auth.user.wallet_balance.to_f64().unwrap_or(0.0),
    }))
}

// Dev-mode top-up; there is no payment gateway behind this
pub async fn deposit(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<DepositDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let amount = BigDecimal::try_from(body.amount)
        .map_err(|_| ServiceError::InvalidAmount)?;

    let entry = app_state.wallet_service.deposit(auth.user.id, amount).await?;

    Ok(Json(ApiResponse::success("Deposited successfully", entry)))
}

pub async fn get_transactions(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let entries = app_state
        .wallet_service
        .get_transactions(auth.user.id)
        .await?;

    Ok(Json(ApiResponse::success("Transactions retrieved", entries)))
}
