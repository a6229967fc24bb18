// db/userdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::dtos::userdtos::KycSubmissionDto;
use crate::models::usermodel::{KycStatus, Profile, UserRole};

#[async_trait]
pub trait UserExt {
    async fn get_profile(&self, profile_id: Uuid) -> Result<Option<Profile>, sqlx::Error>;

    async fn get_profile_by_mobile(&self, mobile: &str) -> Result<Option<Profile>, sqlx::Error>;

    /// Register a fresh profile for a mobile number that passed OTP
    /// verification. Role starts as `user` until the client picks one.
    async fn create_profile(&self, mobile: &str) -> Result<Profile, sqlx::Error>;

    async fn update_profile_role(
        &self,
        profile_id: Uuid,
        role: UserRole,
    ) -> Result<Profile, sqlx::Error>;

    async fn submit_kyc(
        &self,
        profile_id: Uuid,
        kyc: &KycSubmissionDto,
    ) -> Result<Profile, sqlx::Error>;

    async fn adjudicate_kyc(
        &self,
        profile_id: Uuid,
        status: KycStatus,
    ) -> Result<Profile, sqlx::Error>;

    async fn get_pending_kyc_profiles(&self) -> Result<Vec<Profile>, sqlx::Error>;

    async fn get_profiles(&self, page: u32, limit: usize) -> Result<Vec<Profile>, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_profile(&self, profile_id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(profile_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_profile_by_mobile(&self, mobile: &str) -> Result<Option<Profile>, sqlx::Error> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE mobile = $1")
            .bind(mobile)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_profile(&self, mobile: &str) -> Result<Profile, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (mobile, role, kyc_status, wallet_balance, trust_score)
            VALUES ($1, 'user', 'not_started', 0, 100)
            RETURNING *
            "#,
        )
        .bind(mobile)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_profile_role(
        &self,
        profile_id: Uuid,
        role: UserRole,
    ) -> Result<Profile, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET role = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(profile_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }

    async fn submit_kyc(
        &self,
        profile_id: Uuid,
        kyc: &KycSubmissionDto,
    ) -> Result<Profile, sqlx::Error> {
        // Optional fields keep their current value when the request omits them
        sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles SET
                full_name = COALESCE($2, full_name),
                dob = COALESCE($3, dob),
                gender = COALESCE($4, gender),
                address = COALESCE($5, address),
                city = COALESCE($6, city),
                state = COALESCE($7, state),
                pincode = COALESCE($8, pincode),
                id_type = COALESCE($9, id_type),
                id_card_number = COALESCE($10, id_card_number),
                id_card_front_url = COALESCE($11, id_card_front_url),
                id_card_back_url = COALESCE($12, id_card_back_url),
                selfie_url = COALESCE($13, selfie_url),
                bank_account_name = COALESCE($14, bank_account_name),
                bank_account_number = COALESCE($15, bank_account_number),
                bank_ifsc = COALESCE($16, bank_ifsc),
                upi_id = COALESCE($17, upi_id),
                gig_types = COALESCE($18, gig_types),
                work_radius = COALESCE($19, work_radius),
                available_time_slots = COALESCE($20, available_time_slots),
                willing_to_travel = COALESCE($21, willing_to_travel),
                employer_type = COALESCE($22, employer_type),
                business_name = COALESCE($23, business_name),
                nature_of_work = COALESCE($24, nature_of_work),
                business_address = COALESCE($25, business_address),
                billing_name = COALESCE($26, billing_name),
                gst_number = COALESCE($27, gst_number),
                payment_method = COALESCE($28, payment_method),
                invoice_address = COALESCE($29, invoice_address),
                is_agreed_to_terms = COALESCE($30, is_agreed_to_terms),
                kyc_status = 'pending',
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(profile_id)
        .bind(&kyc.full_name)
        .bind(kyc.dob)
        .bind(&kyc.gender)
        .bind(&kyc.address)
        .bind(&kyc.city)
        .bind(&kyc.state)
        .bind(&kyc.pincode)
        .bind(&kyc.id_type)
        .bind(&kyc.id_card_number)
        .bind(&kyc.id_card_front_url)
        .bind(&kyc.id_card_back_url)
        .bind(&kyc.selfie_url)
        .bind(&kyc.bank_account_name)
        .bind(&kyc.bank_account_number)
        .bind(&kyc.bank_ifsc)
        .bind(&kyc.upi_id)
        .bind(kyc.gig_types.as_ref().map(|v| v.join(",")))
        .bind(kyc.work_radius)
        .bind(&kyc.available_time_slots)
        .bind(kyc.willing_to_travel)
        .bind(&kyc.employer_type)
        .bind(&kyc.business_name)
        .bind(&kyc.nature_of_work)
        .bind(&kyc.business_address)
        .bind(&kyc.billing_name)
        .bind(&kyc.gst_number)
        .bind(&kyc.payment_method)
        .bind(&kyc.invoice_address)
        .bind(kyc.is_agreed_to_terms)
        .fetch_one(&self.pool)
        .await
    }

    async fn adjudicate_kyc(
        &self,
        profile_id: Uuid,
        status: KycStatus,
    ) -> Result<Profile, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET kyc_status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(profile_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_pending_kyc_profiles(&self) -> Result<Vec<Profile>, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            "SELECT * FROM profiles WHERE kyc_status = 'pending' ORDER BY updated_at ASC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_profiles(&self, page: u32, limit: usize) -> Result<Vec<Profile>, sqlx::Error> {
        let offset = (page.saturating_sub(1) as i64) * limit as i64;

        sqlx::query_as::<_, Profile>(
            "SELECT * FROM profiles ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }
}
