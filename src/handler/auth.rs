// handler/auth.rs
use std::sync::Arc;

use axum::{
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use validator::Validate;

use crate::{
    dtos::userdtos::{AuthResponseDto, FilterProfileDto, OtpSendDto, OtpVerifyDto, Response},
    error::HttpError,
    utils::token,
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/send-otp", post(send_otp))
        .route("/verify-otp", post(verify_otp))
}

pub async fn send_otp(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<OtpSendDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state.auth_service.send_otp(&body.mobile).await?;

    Ok(Json(Response {
        status: "success",
        message: "OTP sent successfully".to_string(),
    }))
}

pub async fn verify_otp(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<OtpVerifyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let profile = app_state
        .auth_service
        .verify_otp(&body.mobile, &body.otp)
        .await?;

    let token = token::create_token(
        &profile.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie_duration = time::Duration::minutes(app_state.env.jwt_maxage * 60);
    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error("Failed to build cookie".to_string()))?,
    );

    let response = Json(AuthResponseDto {
        status: "success".to_string(),
        access_token: token,
        profile: FilterProfileDto::filter_profile(&profile),
    });

    let mut response = response.into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}
