use serde::{Deserialize, Serialize};

use super::money::Money;

#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct Hire {
    pub id: String,
    pub employer_id: String,
    pub contractor_id: String,
    pub amount_in_cents: Money,
    pub processing_fee_in_cents: Money,
    pub status: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewHire {
    pub employer_id: String,
    pub contractor_id: String,
    pub amount_in_cents: Money,
}

#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct Application {
    pub id: String,
    pub job_id: String,
    pub contractor_id: String,
    pub status: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct Proposal {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub event_id: String,
    pub credits_spent: i64,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProposal {
    pub sender_id: String,
    pub recipient_id: String,
    pub event_id: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct ExternalInvite {
    pub id: String,
    pub inviter_id: String,
    pub email: String,
    pub fee_in_cents: Money,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewExternalInvite {
    pub inviter_id: String,
    pub email: String,
}
