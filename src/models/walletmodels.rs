// models/walletmodels.rs
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "wallet_entry_type", rename_all = "snake_case")]
#[serde(rename_all = "UPPERCASE")]
pub enum WalletEntryType {
    Credit,
    Debit,
}

impl WalletEntryType {
    pub fn to_str(&self) -> &str {
        match self {
            WalletEntryType::Credit => "credit",
            WalletEntryType::Debit => "debit",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "escrow_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EscrowStatus {
    Held,
    Released,
    Refunded,
}

impl EscrowStatus {
    pub fn to_str(&self) -> &str {
        match self {
            EscrowStatus::Held => "held",
            EscrowStatus::Released => "released",
            EscrowStatus::Refunded => "refunded",
        }
    }

    /// Released and refunded are final. Settling an already settled escrow
    /// is a no-op, never an error.
    pub fn is_settled(&self) -> bool {
        match self {
            EscrowStatus::Held => false,
            EscrowStatus::Released | EscrowStatus::Refunded => true,
        }
    }
}

/// Immutable audit entry. The balance on the profile row is authoritative;
/// these rows exist for history and display only.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct WalletTransaction {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub amount: BigDecimal,
    pub entry_type: WalletEntryType,
    pub description: String,
    pub reference_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct EscrowTransaction {
    pub id: Uuid,
    pub gig_id: Uuid,
    pub amount: BigDecimal,
    pub payer_id: Uuid,
    pub payee_id: Option<Uuid>,
    pub status: EscrowStatus,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_escrow_states() {
        assert!(!EscrowStatus::Held.is_settled());
        assert!(EscrowStatus::Released.is_settled());
        assert!(EscrowStatus::Refunded.is_settled());
    }
}
