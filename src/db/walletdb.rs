// db/walletdb.rs
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use sqlx::{Postgres, Row, Transaction};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::walletmodels::{
    EscrowStatus, EscrowTransaction, WalletEntryType, WalletTransaction,
};

/// Ledger and escrow primitives. Every mutation takes the caller's
/// transaction so a balance change, its ledger entry and the escrow/gig
/// writes around it commit or roll back as one unit.
#[async_trait]
pub trait WalletExt {
    /// Row-locked balance read; returns None when the profile does not exist.
    async fn get_balance_for_update_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile_id: Uuid,
    ) -> Result<Option<BigDecimal>, sqlx::Error>;

    async fn update_balance_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile_id: Uuid,
        new_balance: &BigDecimal,
    ) -> Result<(), sqlx::Error>;

    async fn insert_wallet_entry_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile_id: Uuid,
        amount: &BigDecimal,
        entry_type: WalletEntryType,
        description: &str,
        reference_id: Option<Uuid>,
    ) -> Result<WalletTransaction, sqlx::Error>;

    async fn insert_escrow_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gig_id: Uuid,
        payer_id: Uuid,
        amount: &BigDecimal,
    ) -> Result<EscrowTransaction, sqlx::Error>;

    /// Row-locked escrow read so two settlements of the same gig serialize.
    async fn get_escrow_by_gig_for_update_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gig_id: Uuid,
    ) -> Result<Option<EscrowTransaction>, sqlx::Error>;

    async fn settle_escrow_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        escrow_id: Uuid,
        status: EscrowStatus,
        payee_id: Option<Uuid>,
    ) -> Result<EscrowTransaction, sqlx::Error>;

    async fn get_escrow_by_gig_id(
        &self,
        gig_id: Uuid,
    ) -> Result<Option<EscrowTransaction>, sqlx::Error>;

    /// Ledger history, newest first.
    async fn get_wallet_transactions(
        &self,
        profile_id: Uuid,
    ) -> Result<Vec<WalletTransaction>, sqlx::Error>;

    async fn get_all_wallet_transactions(&self) -> Result<Vec<WalletTransaction>, sqlx::Error>;
}

#[async_trait]
impl WalletExt for DBClient {
    async fn get_balance_for_update_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile_id: Uuid,
    ) -> Result<Option<BigDecimal>, sqlx::Error> {
        let row = sqlx::query("SELECT wallet_balance FROM profiles WHERE id = $1 FOR UPDATE")
            .bind(profile_id)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(|r| r.get::<BigDecimal, _>("wallet_balance")))
    }

    async fn update_balance_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile_id: Uuid,
        new_balance: &BigDecimal,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE profiles
            SET wallet_balance = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(profile_id)
        .bind(new_balance)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn insert_wallet_entry_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile_id: Uuid,
        amount: &BigDecimal,
        entry_type: WalletEntryType,
        description: &str,
        reference_id: Option<Uuid>,
    ) -> Result<WalletTransaction, sqlx::Error> {
        sqlx::query_as::<_, WalletTransaction>(
            r#"
            INSERT INTO wallet_transactions
            (profile_id, amount, entry_type, description, reference_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(profile_id)
        .bind(amount)
        .bind(entry_type)
        .bind(description)
        .bind(reference_id)
        .fetch_one(&mut **tx)
        .await
    }

    async fn insert_escrow_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gig_id: Uuid,
        payer_id: Uuid,
        amount: &BigDecimal,
    ) -> Result<EscrowTransaction, sqlx::Error> {
        sqlx::query_as::<_, EscrowTransaction>(
            r#"
            INSERT INTO escrow_transactions (gig_id, amount, payer_id, status)
            VALUES ($1, $2, $3, 'held')
            RETURNING *
            "#,
        )
        .bind(gig_id)
        .bind(amount)
        .bind(payer_id)
        .fetch_one(&mut **tx)
        .await
    }

    async fn get_escrow_by_gig_for_update_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gig_id: Uuid,
    ) -> Result<Option<EscrowTransaction>, sqlx::Error> {
        sqlx::query_as::<_, EscrowTransaction>(
            "SELECT * FROM escrow_transactions WHERE gig_id = $1 FOR UPDATE",
        )
        .bind(gig_id)
        .fetch_optional(&mut **tx)
        .await
    }

    async fn settle_escrow_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        escrow_id: Uuid,
        status: EscrowStatus,
        payee_id: Option<Uuid>,
    ) -> Result<EscrowTransaction, sqlx::Error> {
        sqlx::query_as::<_, EscrowTransaction>(
            r#"
            UPDATE escrow_transactions
            SET status = $2, payee_id = COALESCE($3, payee_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(escrow_id)
        .bind(status)
        .bind(payee_id)
        .fetch_one(&mut **tx)
        .await
    }

    async fn get_escrow_by_gig_id(
        &self,
        gig_id: Uuid,
    ) -> Result<Option<EscrowTransaction>, sqlx::Error> {
        sqlx::query_as::<_, EscrowTransaction>(
            "SELECT * FROM escrow_transactions WHERE gig_id = $1",
        )
        .bind(gig_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_wallet_transactions(
        &self,
        profile_id: Uuid,
    ) -> Result<Vec<WalletTransaction>, sqlx::Error> {
        sqlx::query_as::<_, WalletTransaction>(
            r#"
            SELECT * FROM wallet_transactions
            WHERE profile_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_all_wallet_transactions(&self) -> Result<Vec<WalletTransaction>, sqlx::Error> {
        sqlx::query_as::<_, WalletTransaction>(
            "SELECT * FROM wallet_transactions ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }
}
