// service/gig_service.rs
use bigdecimal::BigDecimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, gigdb::GigExt, userdb::UserExt},
    dtos::gigdtos::{ApplyGigDto, CreateGigDto},
    models::gigmodel::{Gig, GigApplication, GigStatus},
    service::{
        error::ServiceError, notification_service::NotificationService,
        wallet_service::WalletService,
    },
};

/// Owns the gig state machine and triggers wallet movements at the settling
/// transitions. Status writes and fund movements share one database
/// transaction, so a crash between them cannot leave a completed gig with
/// unpaid escrow.
#[derive(Debug, Clone)]
pub struct GigService {
    db_client: Arc<DBClient>,
    wallet_service: Arc<WalletService>,
    notification_service: Arc<NotificationService>,
}

impl GigService {
    pub fn new(
        db_client: Arc<DBClient>,
        wallet_service: Arc<WalletService>,
        notification_service: Arc<NotificationService>,
    ) -> Self {
        Self {
            db_client,
            wallet_service,
            notification_service,
        }
    }

    pub async fn create_gig(
        &self,
        employer_id: Uuid,
        body: CreateGigDto,
    ) -> Result<Gig, ServiceError> {
        let employer = self
            .db_client
            .get_profile(employer_id)
            .await?
            .ok_or(ServiceError::UserNotFound(employer_id))?;

        if !employer.role.can_post_gigs() {
            return Err(ServiceError::NotAuthorized(
                "Only employers can post gigs".to_string(),
            ));
        }

        let payout = BigDecimal::try_from(body.payout)
            .map_err(|_| ServiceError::Validation("Invalid payout amount".to_string()))?;
        if payout <= BigDecimal::from(0) {
            return Err(ServiceError::InvalidAmount);
        }

        let estimated_hours = body.estimated_hours.and_then(|h| BigDecimal::try_from(h).ok());

        let mut tx = self.db_client.pool.begin().await?;

        let gig = self
            .db_client
            .create_gig_tx(
                &mut tx,
                employer_id,
                &body.title,
                body.description.as_deref(),
                &body.location_name,
                body.geo_lat,
                body.geo_lng,
                &payout,
                body.start_time,
                body.end_time,
                estimated_hours,
            )
            .await?;

        // Locking rolls the insert back on failure; a gig never exists
        // without backing escrow.
        self.wallet_service
            .lock_funds_for_gig_tx(&mut tx, employer_id, &gig)
            .await?;

        tx.commit().await?;

        tracing::info!("Gig {} created by employer {}", gig.id, employer_id);
        Ok(gig)
    }

    pub async fn apply_for_gig(
        &self,
        worker_id: Uuid,
        gig_id: Uuid,
        body: ApplyGigDto,
    ) -> Result<GigApplication, ServiceError> {
        let worker = self
            .db_client
            .get_profile(worker_id)
            .await?
            .ok_or(ServiceError::UserNotFound(worker_id))?;

        if !worker.role.can_apply_for_gigs() {
            return Err(ServiceError::NotAuthorized(
                "Only workers can apply for gigs".to_string(),
            ));
        }

        let gig = self
            .db_client
            .get_gig_by_id(gig_id)
            .await?
            .ok_or(ServiceError::GigNotFound(gig_id))?;

        if gig.status != GigStatus::Open {
            return Err(ServiceError::InvalidGigStatus(gig_id, gig.status));
        }

        if self
            .db_client
            .get_gig_application(gig_id, worker_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::AlreadyApplied);
        }

        let bid_amount = body.bid_amount.and_then(|b| BigDecimal::try_from(b).ok());

        // The unique constraint on (gig_id, worker_id) backs the check above
        // against a concurrent duplicate.
        match self
            .db_client
            .create_gig_application(gig_id, worker_id, bid_amount, body.pitch_message.as_deref())
            .await
        {
            Ok(application) => Ok(application),
            Err(e) => {
                if e.as_database_error()
                    .map(|d| d.is_unique_violation())
                    .unwrap_or(false)
                {
                    Err(ServiceError::AlreadyApplied)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    pub async fn assign_worker(
        &self,
        employer_id: Uuid,
        gig_id: Uuid,
        worker_id: Uuid,
    ) -> Result<Gig, ServiceError> {
        let worker = self
            .db_client
            .get_profile(worker_id)
            .await?
            .ok_or(ServiceError::UserNotFound(worker_id))?;

        let mut tx = self.db_client.pool.begin().await?;

        let gig = self
            .db_client
            .get_gig_for_update_tx(&mut tx, gig_id)
            .await?
            .ok_or(ServiceError::GigNotFound(gig_id))?;

        if gig.created_by != employer_id {
            return Err(ServiceError::NotAuthorized(
                "Only the gig creator can assign a worker".to_string(),
            ));
        }

        if gig.status != GigStatus::Open {
            return Err(ServiceError::InvalidGigStatus(gig_id, gig.status));
        }

        let assigned = self.db_client.assign_gig_tx(&mut tx, gig_id, worker_id).await?;

        tx.commit().await?;

        // Notifications are side effects; a failure must not undo the
        // assignment.
        if let Err(e) = self
            .notification_service
            .notify_worker_hired(worker_id, &assigned)
            .await
        {
            tracing::warn!("Failed to notify hired worker {}: {}", worker_id, e);
        }
        if let Err(e) = self
            .notification_service
            .notify_employer_assigned(employer_id, &assigned, &worker)
            .await
        {
            tracing::warn!("Failed to notify employer {}: {}", employer_id, e);
        }

        Ok(assigned)
    }

    pub async fn start_gig(&self, worker_id: Uuid, gig_id: Uuid) -> Result<Gig, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let gig = self
            .db_client
            .get_gig_for_update_tx(&mut tx, gig_id)
            .await?
            .ok_or(ServiceError::GigNotFound(gig_id))?;

        if gig.assigned_to != Some(worker_id) {
            return Err(ServiceError::NotAuthorized(
                "You are not assigned to this gig".to_string(),
            ));
        }

        if !gig.status.can_transition(GigStatus::InProgress) {
            return Err(ServiceError::InvalidGigStatus(gig_id, gig.status));
        }

        let started = self.db_client.start_gig_tx(&mut tx, gig_id).await?;
        tx.commit().await?;

        Ok(started)
    }

    pub async fn upload_proof(
        &self,
        worker_id: Uuid,
        gig_id: Uuid,
        photo_url: &str,
    ) -> Result<Gig, ServiceError> {
        let gig = self
            .db_client
            .get_gig_by_id(gig_id)
            .await?
            .ok_or(ServiceError::GigNotFound(gig_id))?;

        if gig.assigned_to != Some(worker_id) {
            return Err(ServiceError::NotAuthorized(
                "You are not assigned to this gig".to_string(),
            ));
        }

        let updated = self.db_client.update_gig_proof(gig_id, photo_url).await?;
        Ok(updated)
    }

    pub async fn complete_gig(&self, worker_id: Uuid, gig_id: Uuid) -> Result<Gig, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let gig = self
            .db_client
            .get_gig_for_update_tx(&mut tx, gig_id)
            .await?
            .ok_or(ServiceError::GigNotFound(gig_id))?;

        if gig.assigned_to != Some(worker_id) {
            return Err(ServiceError::NotAuthorized(
                "You are not assigned to this gig".to_string(),
            ));
        }

        if !gig.status.can_transition(GigStatus::Completed) {
            return Err(ServiceError::InvalidGigStatus(gig_id, gig.status));
        }

        let completed = self.db_client.complete_gig_tx(&mut tx, gig_id).await?;

        // Same transaction as the status write; completion and payout are
        // one unit.
        self.wallet_service
            .release_funds_to_worker_tx(&mut tx, &completed)
            .await?;

        tx.commit().await?;

        tracing::info!("Gig {} completed by worker {}", gig_id, worker_id);
        Ok(completed)
    }

    pub async fn cancel_gig(&self, employer_id: Uuid, gig_id: Uuid) -> Result<Gig, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let gig = self
            .db_client
            .get_gig_for_update_tx(&mut tx, gig_id)
            .await?
            .ok_or(ServiceError::GigNotFound(gig_id))?;

        if gig.created_by != employer_id {
            return Err(ServiceError::NotAuthorized(
                "Only the gig creator can cancel it".to_string(),
            ));
        }

        if matches!(gig.status, GigStatus::Completed | GigStatus::InProgress) {
            return Err(ServiceError::InvalidGigStatus(gig_id, gig.status));
        }

        let cancelled = self.db_client.cancel_gig_tx(&mut tx, gig_id).await?;

        self.wallet_service
            .refund_to_employer_tx(&mut tx, &cancelled)
            .await?;

        tx.commit().await?;

        tracing::info!("Gig {} cancelled by employer {}", gig_id, employer_id);
        Ok(cancelled)
    }

    pub async fn get_applications_for_gig(
        &self,
        employer_id: Uuid,
        gig_id: Uuid,
    ) -> Result<Vec<GigApplication>, ServiceError> {
        let gig = self
            .db_client
            .get_gig_by_id(gig_id)
            .await?
            .ok_or(ServiceError::GigNotFound(gig_id))?;

        if gig.created_by != employer_id {
            return Err(ServiceError::NotAuthorized(
                "Only the gig creator can view applications".to_string(),
            ));
        }

        let applications = self.db_client.get_applications_for_gig(gig_id).await?;
        Ok(applications)
    }
}
