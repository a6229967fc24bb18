// handler/gigs.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::gigdb::GigExt,
    dtos::gigdtos::{ApiResponse, ApplyGigDto, CreateGigDto, NearbyGigsQueryDto, UploadProofDto},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn gigs_handler() -> Router {
    Router::new()
        .route("/", post(create_gig))
        .route("/feed", get(get_nearby_gigs))
        .route("/open", get(get_open_gigs))
        .route("/my-gigs", get(get_my_gigs))
        .route("/assigned", get(get_assigned_gigs))
        .route("/:gig_id", get(get_gig))
        .route("/:gig_id/apply", post(apply_for_gig))
        .route("/:gig_id/applications", get(get_gig_applications))
        .route("/:gig_id/my-application", get(get_my_application))
        .route("/:gig_id/assign/:worker_id", post(assign_worker))
        .route("/:gig_id/start", post(start_gig))
        .route("/:gig_id/proof", post(upload_proof))
        .route("/:gig_id/complete", post(complete_gig))
        .route("/:gig_id/cancel", post(cancel_gig))
        .route("/:gig_id/review", post(crate::handler::reviews::submit_review))
}

pub async fn create_gig(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateGigDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let gig = app_state.gig_service.create_gig(auth.user.id, body).await?;

    Ok(Json(ApiResponse::success("Gig created successfully", gig)))
}

pub async fn get_nearby_gigs(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<NearbyGigsQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let radius = query.radius.unwrap_or(10.0);

    let gigs = app_state
        .db_client
        .get_nearby_open_gigs(query.lat, query.lng, radius)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Nearby gigs retrieved", gigs)))
}

pub async fn get_open_gigs(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let gigs = app_state
        .db_client
        .get_open_gigs()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Open gigs retrieved", gigs)))
}

pub async fn get_my_gigs(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let gigs = app_state
        .db_client
        .get_gigs_by_employer(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Your gigs retrieved", gigs)))
}

pub async fn get_assigned_gigs(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let gigs = app_state
        .db_client
        .get_gigs_by_worker(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Assigned gigs retrieved", gigs)))
}

pub async fn get_gig(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(gig_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let gig = app_state
        .db_client
        .get_gig_by_id(gig_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Gig not found".to_string()))?;

    Ok(Json(ApiResponse::success("Gig retrieved", gig)))
}

pub async fn apply_for_gig(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(gig_id): Path<Uuid>,
    Json(body): Json<ApplyGigDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let application = app_state
        .gig_service
        .apply_for_gig(auth.user.id, gig_id, body)
        .await?;

    Ok(Json(ApiResponse::success(
        "Application submitted successfully",
        application,
    )))
}

pub async fn get_gig_applications(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(gig_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let applications = app_state
        .gig_service
        .get_applications_for_gig(auth.user.id, gig_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Applications retrieved",
        applications,
    )))
}

pub async fn get_my_application(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(gig_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let application = app_state
        .db_client
        .get_gig_application(gig_id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Application retrieved",
        application,
    )))
}

pub async fn assign_worker(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path((gig_id, worker_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    let gig = app_state
        .gig_service
        .assign_worker(auth.user.id, gig_id, worker_id)
        .await?;

    Ok(Json(ApiResponse::success("Worker assigned successfully", gig)))
}

pub async fn start_gig(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(gig_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let gig = app_state.gig_service.start_gig(auth.user.id, gig_id).await?;

    Ok(Json(ApiResponse::success("Gig started", gig)))
}

pub async fn upload_proof(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(gig_id): Path<Uuid>,
    Json(body): Json<UploadProofDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let gig = app_state
        .gig_service
        .upload_proof(auth.user.id, gig_id, &body.photo_url)
        .await?;

    Ok(Json(ApiResponse::success("Proof uploaded", gig)))
}

pub async fn complete_gig(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(gig_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let gig = app_state
        .gig_service
        .complete_gig(auth.user.id, gig_id)
        .await?;

    Ok(Json(ApiResponse::success("Gig completed", gig)))
}

pub async fn cancel_gig(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(gig_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let gig = app_state
        .gig_service
        .cancel_gig(auth.user.id, gig_id)
        .await?;

    Ok(Json(ApiResponse::success("Gig cancelled", gig)))
}
