use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
        }
    }
}

//Gig DTOs
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateGigDto {
    #[validate(length(min = 1, max = 120, message = "Title must be between 1 and 120 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "Location name is required"))]
    pub location_name: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub geo_lat: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub geo_lng: f64,

    #[validate(range(min = 0.01, message = "Payout must be positive"))]
    pub payout: f64,

    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,

    #[validate(range(min = 0.0, max = 720.0, message = "Estimated hours out of range"))]
    pub estimated_hours: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NearbyGigsQueryDto {
    pub lat: f64,
    pub lng: f64,
    pub radius: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct ApplyGigDto {
    #[validate(range(min = 0.01, message = "Bid amount must be positive"))]
    pub bid_amount: Option<f64>,

    #[validate(length(max = 1000, message = "Pitch must be at most 1000 characters"))]
    pub pitch_message: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UploadProofDto {
    #[validate(url(message = "Invalid photo URL"))]
    pub photo_url: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SubmitReviewDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub comment: Option<String>,
}
