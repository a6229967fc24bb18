// handler/reviews.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{gigdb::GigExt, reviewdb::ReviewExt},
    dtos::gigdtos::{ApiResponse, SubmitReviewDto},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::gigmodel::GigStatus,
    AppState,
};

pub fn reviews_handler() -> Router {
    Router::new().route("/user/:user_id", get(get_reviews_for_user))
}

/// Mounted under the gig router as POST /gigs/:gig_id/review. Either
/// participant of a completed gig reviews the other; the counterparty is
/// derived here, never taken from the request.
pub async fn submit_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(gig_id): Path<Uuid>,
    Json(body): Json<SubmitReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let gig = app_state
        .db_client
        .get_gig_by_id(gig_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Gig not found".to_string()))?;

    if gig.status != GigStatus::Completed {
        return Err(HttpError::bad_request(
            "Can only review completed gigs".to_string(),
        ));
    }

    let reviewer_id = auth.user.id;
    let reviewee_id = if gig.assigned_to == Some(reviewer_id) {
        gig.created_by
    } else if gig.created_by == reviewer_id {
        gig.assigned_to
            .ok_or_else(|| HttpError::bad_request("Gig has no assigned worker".to_string()))?
    } else {
        return Err(HttpError::forbidden(
            "Not a participant in this gig".to_string(),
        ));
    };

    let review = app_state
        .db_client
        .create_review(
            gig_id,
            reviewer_id,
            reviewee_id,
            body.rating,
            body.comment.as_deref(),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Review submitted", review)))
}

pub async fn get_reviews_for_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .db_client
        .get_reviews_for_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Reviews retrieved", reviews)))
}
