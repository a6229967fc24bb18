// handler/admin.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    db::{gigdb::GigExt, userdb::UserExt, walletdb::WalletExt},
    dtos::{
        gigdtos::ApiResponse,
        userdtos::{AdjudicateKycDto, FilterProfileDto, ProfileListResponseDto},
    },
    error::{ErrorMessage, HttpError},
    middleware::JWTAuthMiddeware,
    models::usermodel::{KycStatus, UserRole},
    AppState,
};

pub fn admin_handler() -> Router {
    Router::new()
        .route("/users", get(get_all_users))
        .route("/gigs", get(get_all_gigs))
        .route("/transactions", get(get_all_transactions))
        .route("/kyc/pending", get(get_pending_kyc))
        .route("/kyc/:profile_id/adjudicate", post(adjudicate_kyc))
}

fn require_admin(auth: &JWTAuthMiddeware) -> Result<(), HttpError> {
    match auth.user.role {
        UserRole::Admin => Ok(()),
        UserRole::User | UserRole::Worker | UserRole::Employer => Err(HttpError::new(
            ErrorMessage::PermissionDenied.to_string(),
            StatusCode::FORBIDDEN,
        )),
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQueryDto {
    pub page: Option<u32>,
    pub limit: Option<usize>,
}

pub async fn get_all_users(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    require_admin(&auth)?;

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(50);

    let profiles = app_state
        .db_client
        .get_profiles(page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let filtered = FilterProfileDto::filter_profiles(&profiles);
    let results = filtered.len();

    Ok(Json(ProfileListResponseDto {
        status: "success".to_string(),
        profiles: filtered,
        results,
    }))
}

pub async fn get_all_gigs(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    require_admin(&auth)?;

    let gigs = app_state
        .db_client
        .get_all_gigs()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Gigs retrieved", gigs)))
}

pub async fn get_all_transactions(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    require_admin(&auth)?;

    let entries = app_state
        .db_client
        .get_all_wallet_transactions()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Transactions retrieved", entries)))
}

pub async fn get_pending_kyc(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    require_admin(&auth)?;

    let profiles = app_state
        .db_client
        .get_pending_kyc_profiles()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let filtered = FilterProfileDto::filter_profiles(&profiles);
    let results = filtered.len();

    Ok(Json(ProfileListResponseDto {
        status: "success".to_string(),
        profiles: filtered,
        results,
    }))
}

pub async fn adjudicate_kyc(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(profile_id): Path<Uuid>,
    Json(body): Json<AdjudicateKycDto>,
) -> Result<impl IntoResponse, HttpError> {
    require_admin(&auth)?;

    match body.status {
        KycStatus::Approved | KycStatus::Rejected => {}
        KycStatus::NotStarted | KycStatus::Pending => {
            return Err(HttpError::bad_request(
                "Status must be approved or rejected".to_string(),
            ));
        }
    }

    if let Some(reason) = &body.rejection_reason {
        tracing::info!("KYC for {} adjudicated with reason: {}", profile_id, reason);
    }

    let profile = app_state
        .db_client
        .adjudicate_kyc(profile_id, body.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "KYC adjudicated",
        FilterProfileDto::filter_profile(&profile),
    )))
}
