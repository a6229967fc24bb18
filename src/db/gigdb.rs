// db/gigdb.rs
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::gigmodel::{Gig, GigApplication};

#[async_trait]
pub trait GigExt {
    /// Insert a new gig in `open` state. Runs inside the caller's
    /// transaction so that creation and the escrow lock commit together.
    async fn create_gig_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employer_id: Uuid,
        title: &str,
        description: Option<&str>,
        location_name: &str,
        geo_lat: f64,
        geo_lng: f64,
        payout: &BigDecimal,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
        estimated_hours: Option<BigDecimal>,
    ) -> Result<Gig, sqlx::Error>;

    async fn get_gig_by_id(&self, gig_id: Uuid) -> Result<Option<Gig>, sqlx::Error>;

    /// Row-locked read; concurrent transitions on the same gig serialize on
    /// this lock.
    async fn get_gig_for_update_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gig_id: Uuid,
    ) -> Result<Option<Gig>, sqlx::Error>;

    async fn assign_gig_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gig_id: Uuid,
        worker_id: Uuid,
    ) -> Result<Gig, sqlx::Error>;

    async fn start_gig_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gig_id: Uuid,
    ) -> Result<Gig, sqlx::Error>;

    async fn complete_gig_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gig_id: Uuid,
    ) -> Result<Gig, sqlx::Error>;

    async fn cancel_gig_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gig_id: Uuid,
    ) -> Result<Gig, sqlx::Error>;

    async fn update_gig_proof(&self, gig_id: Uuid, photo_url: &str) -> Result<Gig, sqlx::Error>;

    async fn get_open_gigs(&self) -> Result<Vec<Gig>, sqlx::Error>;

    async fn get_nearby_open_gigs(
        &self,
        lat: f64,
        lng: f64,
        radius_km: f64,
    ) -> Result<Vec<Gig>, sqlx::Error>;

    async fn get_gigs_by_employer(&self, employer_id: Uuid) -> Result<Vec<Gig>, sqlx::Error>;

    async fn get_gigs_by_worker(&self, worker_id: Uuid) -> Result<Vec<Gig>, sqlx::Error>;

    async fn get_all_gigs(&self) -> Result<Vec<Gig>, sqlx::Error>;

    async fn create_gig_application(
        &self,
        gig_id: Uuid,
        worker_id: Uuid,
        bid_amount: Option<BigDecimal>,
        pitch_message: Option<&str>,
    ) -> Result<GigApplication, sqlx::Error>;

    async fn get_gig_application(
        &self,
        gig_id: Uuid,
        worker_id: Uuid,
    ) -> Result<Option<GigApplication>, sqlx::Error>;

    async fn get_applications_for_gig(
        &self,
        gig_id: Uuid,
    ) -> Result<Vec<GigApplication>, sqlx::Error>;
}

#[async_trait]
impl GigExt for DBClient {
    async fn create_gig_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employer_id: Uuid,
        title: &str,
        description: Option<&str>,
        location_name: &str,
        geo_lat: f64,
        geo_lng: f64,
        payout: &BigDecimal,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
        estimated_hours: Option<BigDecimal>,
    ) -> Result<Gig, sqlx::Error> {
        sqlx::query_as::<_, Gig>(
            r#"
            INSERT INTO gigs
            (title, description, location_name, geo_lat, geo_lng, payout,
             start_time, end_time, estimated_hours, created_by, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'open')
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(location_name)
        .bind(geo_lat)
        .bind(geo_lng)
        .bind(payout)
        .bind(start_time)
        .bind(end_time)
        .bind(estimated_hours)
        .bind(employer_id)
        .fetch_one(&mut **tx)
        .await
    }

    async fn get_gig_by_id(&self, gig_id: Uuid) -> Result<Option<Gig>, sqlx::Error> {
        sqlx::query_as::<_, Gig>("SELECT * FROM gigs WHERE id = $1")
            .bind(gig_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_gig_for_update_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gig_id: Uuid,
    ) -> Result<Option<Gig>, sqlx::Error> {
        sqlx::query_as::<_, Gig>("SELECT * FROM gigs WHERE id = $1 FOR UPDATE")
            .bind(gig_id)
            .fetch_optional(&mut **tx)
            .await
    }

    async fn assign_gig_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gig_id: Uuid,
        worker_id: Uuid,
    ) -> Result<Gig, sqlx::Error> {
        sqlx::query_as::<_, Gig>(
            r#"
            UPDATE gigs
            SET assigned_to = $2, status = 'assigned'
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(gig_id)
        .bind(worker_id)
        .fetch_one(&mut **tx)
        .await
    }

    async fn start_gig_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gig_id: Uuid,
    ) -> Result<Gig, sqlx::Error> {
        // actual_start_time is only stamped on the first start
        sqlx::query_as::<_, Gig>(
            r#"
            UPDATE gigs
            SET status = 'in_progress',
                actual_start_time = COALESCE(actual_start_time, NOW())
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(gig_id)
        .fetch_one(&mut **tx)
        .await
    }

    async fn complete_gig_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gig_id: Uuid,
    ) -> Result<Gig, sqlx::Error> {
        sqlx::query_as::<_, Gig>(
            r#"
            UPDATE gigs
            SET status = 'completed', actual_end_time = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(gig_id)
        .fetch_one(&mut **tx)
        .await
    }

    async fn cancel_gig_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gig_id: Uuid,
    ) -> Result<Gig, sqlx::Error> {
        sqlx::query_as::<_, Gig>(
            r#"
            UPDATE gigs
            SET status = 'cancelled'
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(gig_id)
        .fetch_one(&mut **tx)
        .await
    }

    async fn update_gig_proof(&self, gig_id: Uuid, photo_url: &str) -> Result<Gig, sqlx::Error> {
        sqlx::query_as::<_, Gig>(
            r#"
            UPDATE gigs
            SET proof_photo_url = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(gig_id)
        .bind(photo_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_open_gigs(&self) -> Result<Vec<Gig>, sqlx::Error> {
        sqlx::query_as::<_, Gig>(
            "SELECT * FROM gigs WHERE status = 'open' ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_nearby_open_gigs(
        &self,
        lat: f64,
        lng: f64,
        radius_km: f64,
    ) -> Result<Vec<Gig>, sqlx::Error> {
        // Haversine over open gigs, radius in kilometres
        sqlx::query_as::<_, Gig>(
            r#"
            SELECT * FROM gigs
            WHERE status = 'open'
              AND (6371 * acos(
                    cos(radians($1)) * cos(radians(geo_lat)) *
                    cos(radians(geo_lng) - radians($2)) +
                    sin(radians($1)) * sin(radians(geo_lat))
                  )) < $3
            ORDER BY created_at DESC
            "#,
        )
        .bind(lat)
        .bind(lng)
        .bind(radius_km)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_gigs_by_employer(&self, employer_id: Uuid) -> Result<Vec<Gig>, sqlx::Error> {
        sqlx::query_as::<_, Gig>(
            "SELECT * FROM gigs WHERE created_by = $1 ORDER BY created_at DESC",
        )
        .bind(employer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_gigs_by_worker(&self, worker_id: Uuid) -> Result<Vec<Gig>, sqlx::Error> {
        sqlx::query_as::<_, Gig>(
            "SELECT * FROM gigs WHERE assigned_to = $1 ORDER BY created_at DESC",
        )
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_all_gigs(&self) -> Result<Vec<Gig>, sqlx::Error> {
        sqlx::query_as::<_, Gig>("SELECT * FROM gigs ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    async fn create_gig_application(
        &self,
        gig_id: Uuid,
        worker_id: Uuid,
        bid_amount: Option<BigDecimal>,
        pitch_message: Option<&str>,
    ) -> Result<GigApplication, sqlx::Error> {
        sqlx::query_as::<_, GigApplication>(
            r#"
            INSERT INTO gig_applications (gig_id, worker_id, bid_amount, pitch_message, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING *
            "#,
        )
        .bind(gig_id)
        .bind(worker_id)
        .bind(bid_amount)
        .bind(pitch_message)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_gig_application(
        &self,
        gig_id: Uuid,
        worker_id: Uuid,
    ) -> Result<Option<GigApplication>, sqlx::Error> {
        sqlx::query_as::<_, GigApplication>(
            "SELECT * FROM gig_applications WHERE gig_id = $1 AND worker_id = $2",
        )
        .bind(gig_id)
        .bind(worker_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_applications_for_gig(
        &self,
        gig_id: Uuid,
    ) -> Result<Vec<GigApplication>, sqlx::Error> {
        sqlx::query_as::<_, GigApplication>(
            "SELECT * FROM gig_applications WHERE gig_id = $1 ORDER BY created_at ASC",
        )
        .bind(gig_id)
        .fetch_all(&self.pool)
        .await
    }
}
