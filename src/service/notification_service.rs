// service/notification_service.rs
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, notificationdb::NotificationExt},
    models::{gigmodel::Gig, usermodel::Profile},
    service::error::ServiceError,
};

/// Persists notifications and logs them. Dispatch is fire-and-forget from
/// the caller's point of view; a failed insert must never abort the
/// operation that triggered it.
#[derive(Debug, Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn notify_worker_hired(
        &self,
        worker_id: Uuid,
        gig: &Gig,
    ) -> Result<(), ServiceError> {
        tracing::info!("Hire notification: worker {} for gig {}", worker_id, gig.id);

        self.db_client
            .create_notification(
                worker_id,
                "You're hired!",
                &format!(
                    "Congratulations! You have been hired for the gig: {}",
                    gig.title
                ),
            )
            .await?;

        Ok(())
    }

    pub async fn notify_employer_assigned(
        &self,
        employer_id: Uuid,
        gig: &Gig,
        worker: &Profile,
    ) -> Result<(), ServiceError> {
        let worker_name = worker.full_name.clone().unwrap_or_else(|| worker.mobile.clone());

        self.db_client
            .create_notification(
                employer_id,
                "Worker assigned successfully",
                &format!("You have assigned {} for {}.", worker_name, gig.title),
            )
            .await?;

        Ok(())
    }
}
