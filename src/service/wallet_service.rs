// service/wallet_service.rs
use bigdecimal::BigDecimal;
use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, walletdb::WalletExt},
    models::{
        gigmodel::Gig,
        walletmodels::{EscrowStatus, EscrowTransaction, WalletEntryType, WalletTransaction},
    },
    service::error::ServiceError,
};

/// Moves funds between profile balances, the append-only ledger and the
/// per-gig escrow records. The escrow amount is fixed when funds are locked
/// and never recomputed, so release and refund always move exactly what was
/// deducted.
#[derive(Debug, Clone)]
pub struct WalletService {
    db_client: Arc<DBClient>,
}

impl WalletService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn deposit(
        &self,
        user_id: Uuid,
        amount: BigDecimal,
    ) -> Result<WalletTransaction, ServiceError> {
        if amount <= BigDecimal::from(0) {
            return Err(ServiceError::InvalidAmount);
        }

        let mut tx = self.db_client.pool.begin().await?;

        let balance = self
            .db_client
            .get_balance_for_update_tx(&mut tx, user_id)
            .await?
            .ok_or(ServiceError::UserNotFound(user_id))?;

        let new_balance = &balance + &amount;
        self.db_client
            .update_balance_tx(&mut tx, user_id, &new_balance)
            .await?;

        let entry = self
            .db_client
            .insert_wallet_entry_tx(
                &mut tx,
                user_id,
                &amount,
                WalletEntryType::Credit,
                "Deposit funds",
                None,
            )
            .await?;

        tx.commit().await?;

        tracing::info!("Deposit of {} credited to profile {}", amount, user_id);
        Ok(entry)
    }

    /// Deduct the payout from the employer and hold it against the gig.
    /// Runs inside the caller's transaction: gig creation is never finalized
    /// without a lock, and a lock is never created for a gig that does not
    /// exist.
    pub async fn lock_funds_for_gig_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employer_id: Uuid,
        gig: &Gig,
    ) -> Result<EscrowTransaction, ServiceError> {
        let balance = self
            .db_client
            .get_balance_for_update_tx(tx, employer_id)
            .await?
            .ok_or(ServiceError::UserNotFound(employer_id))?;

        if balance < gig.payout {
            return Err(ServiceError::InsufficientBalance {
                required: gig.payout.clone(),
                available: balance,
            });
        }

        let new_balance = &balance - &gig.payout;
        self.db_client
            .update_balance_tx(tx, employer_id, &new_balance)
            .await?;

        self.db_client
            .insert_wallet_entry_tx(
                tx,
                employer_id,
                &gig.payout,
                WalletEntryType::Debit,
                &format!("Escrow lock for gig: {}", gig.title),
                Some(gig.id),
            )
            .await?;

        let escrow = self
            .db_client
            .insert_escrow_tx(tx, gig.id, employer_id, &gig.payout)
            .await?;

        tracing::info!(
            "Locked {} from employer {} for gig {}",
            escrow.amount,
            employer_id,
            gig.id
        );
        Ok(escrow)
    }

    /// Credit the assigned worker with the held amount. Returns Ok(None)
    /// when the escrow has already been settled; retries are expected and
    /// must not move funds twice.
    pub async fn release_funds_to_worker_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gig: &Gig,
    ) -> Result<Option<EscrowTransaction>, ServiceError> {
        let escrow = self
            .db_client
            .get_escrow_by_gig_for_update_tx(tx, gig.id)
            .await?
            .ok_or(ServiceError::EscrowNotFound(gig.id))?;

        if escrow.status.is_settled() {
            return Ok(None);
        }

        let worker_id = gig.assigned_to.ok_or(ServiceError::NoWorkerAssigned(gig.id))?;

        let balance = self
            .db_client
            .get_balance_for_update_tx(tx, worker_id)
            .await?
            .ok_or(ServiceError::UserNotFound(worker_id))?;

        let new_balance = &balance + &escrow.amount;
        self.db_client
            .update_balance_tx(tx, worker_id, &new_balance)
            .await?;

        self.db_client
            .insert_wallet_entry_tx(
                tx,
                worker_id,
                &escrow.amount,
                WalletEntryType::Credit,
                &format!("Payout for gig: {}", gig.title),
                Some(gig.id),
            )
            .await?;

        let settled = self
            .db_client
            .settle_escrow_tx(tx, escrow.id, EscrowStatus::Released, Some(worker_id))
            .await?;

        tracing::info!(
            "Released {} to worker {} for gig {}",
            settled.amount,
            worker_id,
            gig.id
        );
        Ok(Some(settled))
    }

    /// Return the held amount to the original payer. The payer comes from
    /// the escrow row, not from the gig, so the refund always reverses the
    /// exact lock.
    pub async fn refund_to_employer_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gig: &Gig,
    ) -> Result<Option<EscrowTransaction>, ServiceError> {
        let escrow = self
            .db_client
            .get_escrow_by_gig_for_update_tx(tx, gig.id)
            .await?
            .ok_or(ServiceError::EscrowNotFound(gig.id))?;

        if escrow.status.is_settled() {
            return Ok(None);
        }

        let payer_id = escrow.payer_id;

        let balance = self
            .db_client
            .get_balance_for_update_tx(tx, payer_id)
            .await?
            .ok_or(ServiceError::UserNotFound(payer_id))?;

        let new_balance = &balance + &escrow.amount;
        self.db_client
            .update_balance_tx(tx, payer_id, &new_balance)
            .await?;

        self.db_client
            .insert_wallet_entry_tx(
                tx,
                payer_id,
                &escrow.amount,
                WalletEntryType::Credit,
                &format!("Refund for gig: {}", gig.title),
                Some(gig.id),
            )
            .await?;

        let settled = self
            .db_client
            .settle_escrow_tx(tx, escrow.id, EscrowStatus::Refunded, None)
            .await?;

        tracing::info!(
            "Refunded {} to employer {} for gig {}",
            settled.amount,
            payer_id,
            gig.id
        );
        Ok(Some(settled))
    }

    /// Standalone settlement entry points for callers outside a gig
    /// transition (retries, admin tooling).
    pub async fn release_funds_to_worker(
        &self,
        gig: &Gig,
    ) -> Result<Option<EscrowTransaction>, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;
        let settled = self.release_funds_to_worker_tx(&mut tx, gig).await?;
        tx.commit().await?;
        Ok(settled)
    }

    pub async fn refund_to_employer(
        &self,
        gig: &Gig,
    ) -> Result<Option<EscrowTransaction>, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;
        let settled = self.refund_to_employer_tx(&mut tx, gig).await?;
        tx.commit().await?;
        Ok(settled)
    }

    pub async fn get_transactions(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<WalletTransaction>, ServiceError> {
        let entries = self.db_client.get_wallet_transactions(user_id).await?;
        Ok(entries)
    }
}
