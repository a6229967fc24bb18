use crate::{error::HttpError, models::gigmodel::GigStatus};
use axum::http::StatusCode;
use bigdecimal::BigDecimal;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Profile {0} not found")]
    UserNotFound(Uuid),

    #[error("Gig {0} not found")]
    GigNotFound(Uuid),

    #[error("No escrow record found for gig {0}")]
    EscrowNotFound(Uuid),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Gig {0} is not in the required status (currently {current})", current = .1.to_str())]
    InvalidGigStatus(Uuid, GigStatus),

    #[error("Insufficient wallet balance: required {required}, available {available}")]
    InsufficientBalance {
        required: BigDecimal,
        available: BigDecimal,
    },

    #[error("Already applied for this gig")]
    AlreadyApplied,

    #[error("Gig {0} has no assigned worker")]
    NoWorkerAssigned(Uuid),

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Invalid or expired OTP")]
    InvalidOtp,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::UserNotFound(_)
            | ServiceError::GigNotFound(_)
            | ServiceError::EscrowNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::InvalidGigStatus(_, _)
            | ServiceError::NoWorkerAssigned(_)
            | ServiceError::InvalidAmount
            | ServiceError::InvalidOtp
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::NotAuthorized(_) => StatusCode::FORBIDDEN,

            ServiceError::AlreadyApplied => StatusCode::CONFLICT,

            ServiceError::InsufficientBalance { .. } => StatusCode::PAYMENT_REQUIRED,

            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        let status = error.status_code();
        HttpError::new(error.to_string(), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_error_kinds() {
        let gig_id = Uuid::new_v4();

        assert_eq!(
            ServiceError::UserNotFound(gig_id).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::NotAuthorized("nope".to_string()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServiceError::InvalidGigStatus(gig_id, GigStatus::Completed).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::AlreadyApplied.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::InsufficientBalance {
                required: BigDecimal::from(300),
                available: BigDecimal::from(100),
            }
            .status_code(),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            ServiceError::InvalidAmount.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn converts_into_http_error_with_same_status() {
        let err: HttpError = ServiceError::AlreadyApplied.into();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.message, "Already applied for this gig");
    }
}
