use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "gig_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GigStatus {
    Open,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl GigStatus {
    pub fn to_str(&self) -> &str {
        match self {
            GigStatus::Open => "open",
            GigStatus::Assigned => "assigned",
            GigStatus::InProgress => "in_progress",
            GigStatus::Completed => "completed",
            GigStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GigStatus::Completed | GigStatus::Cancelled)
    }

    /// The gig lifecycle:
    ///
    /// open -> assigned -> in_progress -> completed
    /// open | assigned -> cancelled
    ///
    /// in_progress -> in_progress covers an idempotent restart.
    pub fn can_transition(&self, to: GigStatus) -> bool {
        match (self, to) {
            (GigStatus::Open, GigStatus::Assigned) => true,
            (GigStatus::Open, GigStatus::Cancelled) => true,
            (GigStatus::Assigned, GigStatus::InProgress) => true,
            (GigStatus::Assigned, GigStatus::Cancelled) => true,
            (GigStatus::InProgress, GigStatus::InProgress) => true,
            (GigStatus::InProgress, GigStatus::Completed) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Gig {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location_name: String,
    pub geo_lat: f64,
    pub geo_lng: f64,
    pub payout: BigDecimal,
    pub currency: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub estimated_hours: Option<BigDecimal>,
    pub actual_start_time: Option<DateTime<Utc>>,
    pub actual_end_time: Option<DateTime<Utc>>,
    pub proof_photo_url: Option<String>,
    pub created_by: Uuid,
    pub assigned_to: Option<Uuid>,
    pub status: GigStatus,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GigApplication {
    pub id: Uuid,
    pub gig_id: Uuid,
    pub worker_id: Uuid,
    pub bid_amount: Option<BigDecimal>,
    pub pitch_message: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_are_allowed() {
        assert!(GigStatus::Open.can_transition(GigStatus::Assigned));
        assert!(GigStatus::Assigned.can_transition(GigStatus::InProgress));
        assert!(GigStatus::InProgress.can_transition(GigStatus::Completed));
    }

    #[test]
    fn cancel_is_only_allowed_before_work_starts() {
        assert!(GigStatus::Open.can_transition(GigStatus::Cancelled));
        assert!(GigStatus::Assigned.can_transition(GigStatus::Cancelled));
        assert!(!GigStatus::InProgress.can_transition(GigStatus::Cancelled));
        assert!(!GigStatus::Completed.can_transition(GigStatus::Cancelled));
    }

    #[test]
    fn restart_of_a_running_gig_is_idempotent() {
        assert!(GigStatus::InProgress.can_transition(GigStatus::InProgress));
        assert!(!GigStatus::Assigned.can_transition(GigStatus::Assigned));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        assert!(GigStatus::Completed.is_terminal());
        assert!(GigStatus::Cancelled.is_terminal());
        assert!(!GigStatus::Open.is_terminal());

        for to in [
            GigStatus::Open,
            GigStatus::Assigned,
            GigStatus::InProgress,
            GigStatus::Completed,
            GigStatus::Cancelled,
        ] {
            assert!(!GigStatus::Completed.can_transition(to));
            assert!(!GigStatus::Cancelled.can_transition(to));
        }
    }
}
