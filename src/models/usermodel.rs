use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Worker,
    Employer,
    Admin,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::User => "user",
            UserRole::Worker => "worker",
            UserRole::Employer => "employer",
            UserRole::Admin => "admin",
        }
    }

    /// Only employers and admins may post gigs.
    pub fn can_post_gigs(&self) -> bool {
        match self {
            UserRole::Employer | UserRole::Admin => true,
            UserRole::User | UserRole::Worker => false,
        }
    }

    pub fn can_apply_for_gigs(&self) -> bool {
        match self {
            UserRole::Worker => true,
            UserRole::User | UserRole::Employer | UserRole::Admin => false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "kyc_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    NotStarted,
    Pending,
    Approved,
    Rejected,
}

impl KycStatus {
    pub fn to_str(&self) -> &str {
        match self {
            KycStatus::NotStarted => "not_started",
            KycStatus::Pending => "pending",
            KycStatus::Approved => "approved",
            KycStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Profile {
    pub id: Uuid,
    pub mobile: String,
    pub role: UserRole,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub wallet_balance: BigDecimal,
    pub trust_score: i32,
    pub kyc_status: KycStatus,

    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub profile_photo_url: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,

    // Identity documents
    pub id_type: Option<String>,
    pub id_card_number: Option<String>,
    pub id_card_front_url: Option<String>,
    pub id_card_back_url: Option<String>,
    pub selfie_url: Option<String>,

    // Worker payout details and preferences
    pub bank_account_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_ifsc: Option<String>,
    pub upi_id: Option<String>,
    pub gig_types: Option<String>,
    pub work_radius: Option<f64>,
    pub available_time_slots: Option<String>,
    pub willing_to_travel: Option<bool>,

    // Employer billing details
    pub employer_type: Option<String>,
    pub business_name: Option<String>,
    pub nature_of_work: Option<String>,
    pub business_address: Option<String>,
    pub billing_name: Option<String>,
    pub gst_number: Option<String>,
    pub payment_method: Option<String>,
    pub invoice_address: Option<String>,
    pub is_agreed_to_terms: Option<bool>,

    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_employers_and_admins_post_gigs() {
        assert!(UserRole::Employer.can_post_gigs());
        assert!(UserRole::Admin.can_post_gigs());
        assert!(!UserRole::Worker.can_post_gigs());
        assert!(!UserRole::User.can_post_gigs());
    }

    #[test]
    fn only_workers_apply_for_gigs() {
        assert!(UserRole::Worker.can_apply_for_gigs());
        assert!(!UserRole::Employer.can_apply_for_gigs());
        assert!(!UserRole::Admin.can_apply_for_gigs());
        assert!(!UserRole::User.can_apply_for_gigs());
    }
}
