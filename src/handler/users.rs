// handler/users.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::{
        FilterProfileDto, KycSubmissionDto, ProfileData, ProfileResponseDto, RoleUpdateDto,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::usermodel::UserRole,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/me", get(get_me))
        .route("/kyc", post(submit_kyc))
        .route("/role", put(update_role))
        .route("/:profile_id", get(get_profile))
}

pub async fn get_me(
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(ProfileResponseDto {
        status: "success".to_string(),
        data: ProfileData {
            profile: FilterProfileDto::filter_profile(&auth.user),
        },
    }))
}

pub async fn get_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(profile_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let profile = app_state
        .db_client
        .get_profile(profile_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Profile not found".to_string()))?;

    Ok(Json(ProfileResponseDto {
        status: "success".to_string(),
        data: ProfileData {
            profile: FilterProfileDto::filter_profile(&profile),
        },
    }))
}

pub async fn submit_kyc(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<KycSubmissionDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let profile = app_state
        .db_client
        .submit_kyc(auth.user.id, &body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ProfileResponseDto {
        status: "success".to_string(),
        data: ProfileData {
            profile: FilterProfileDto::filter_profile(&profile),
        },
    }))
}

pub async fn update_role(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<RoleUpdateDto>,
) -> Result<impl IntoResponse, HttpError> {
    // Admin is granted out of band, never self-assigned
    match body.role {
        UserRole::Worker | UserRole::Employer => {}
        UserRole::User | UserRole::Admin => {
            return Err(HttpError::bad_request(
                "Role must be worker or employer".to_string(),
            ));
        }
    }

    let profile = app_state
        .db_client
        .update_profile_role(auth.user.id, body.role)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ProfileResponseDto {
        status: "success".to_string(),
        data: ProfileData {
            profile: FilterProfileDto::filter_profile(&profile),
        },
    }))
}
