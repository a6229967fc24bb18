use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermodel::{KycStatus, Profile, UserRole};

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct OtpSendDto {
    #[validate(length(min = 10, max = 15, message = "Mobile number must be 10 to 15 digits"))]
    pub mobile: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct OtpVerifyDto {
    #[validate(length(min = 10, max = 15, message = "Mobile number must be 10 to 15 digits"))]
    pub mobile: String,

    #[validate(length(equal = 6, message = "OTP must be 6 digits"))]
    pub otp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponseDto {
    pub status: String,
    pub access_token: String,
    pub profile: FilterProfileDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterProfileDto {
    pub id: String,
    pub mobile: String,
    pub role: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub wallet_balance: f64,
    pub trust_score: i32,
    pub kyc_status: String,
    pub profile_photo_url: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl FilterProfileDto {
    pub fn filter_profile(profile: &Profile) -> Self {
        use num_traits::ToPrimitive;

        FilterProfileDto {
            id: profile.id.to_string(),
            mobile: profile.mobile.to_owned(),
            role: profile.role.to_str().to_string(),
            full_name: profile.full_name.clone(),
            email: profile.email.clone(),
            wallet_balance: profile.wallet_balance.to_f64().unwrap_or(0.0),
            trust_score: profile.trust_score,
            kyc_status: profile.kyc_status.to_str().to_string(),
            profile_photo_url: profile.profile_photo_url.clone(),
            city: profile.city.clone(),
            state: profile.state.clone(),
            created_at: profile.created_at,
        }
    }

    pub fn filter_profiles(profiles: &[Profile]) -> Vec<Self> {
        profiles.iter().map(Self::filter_profile).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileData {
    pub profile: FilterProfileDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponseDto {
    pub status: String,
    pub data: ProfileData,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RoleUpdateDto {
    pub role: UserRole,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct KycSubmissionDto {
    // Step 1: basics
    #[validate(length(min = 1, max = 120, message = "Full name must be 1 to 120 characters"))]
    pub full_name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,

    // Step 2: identity
    pub id_type: Option<String>,
    pub id_card_number: Option<String>,
    #[validate(url(message = "Invalid ID card front URL"))]
    pub id_card_front_url: Option<String>,
    #[validate(url(message = "Invalid ID card back URL"))]
    pub id_card_back_url: Option<String>,
    #[validate(url(message = "Invalid selfie URL"))]
    pub selfie_url: Option<String>,

    // Step 3: payout details (worker)
    pub bank_account_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_ifsc: Option<String>,
    pub upi_id: Option<String>,

    // Step 4: work preferences (worker)
    pub gig_types: Option<Vec<String>>,
    pub work_radius: Option<f64>,
    pub available_time_slots: Option<String>,
    pub willing_to_travel: Option<bool>,

    // Employer details
    pub employer_type: Option<String>,
    pub business_name: Option<String>,
    pub nature_of_work: Option<String>,
    pub business_address: Option<String>,
    pub billing_name: Option<String>,
    pub gst_number: Option<String>,
    pub payment_method: Option<String>,
    pub invoice_address: Option<String>,
    pub is_agreed_to_terms: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdjudicateKycDto {
    pub status: KycStatus,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileListResponseDto {
    pub status: String,
    pub profiles: Vec<FilterProfileDto>,
    pub results: usize,
}
