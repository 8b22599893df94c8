use serde::{Deserialize, Serialize};

use super::money::Money;

#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct Booking {
    pub id: String,
    pub host_id: String,
    pub vendor_id: String,
    pub amount_in_cents: Money,
    pub booking_fee_in_cents: Money,
    pub processing_fee_in_cents: Money,
    pub status: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewBooking {
    pub host_id: String,
    pub vendor_id: String,
    pub amount_in_cents: Money,
}

#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct TableSale {
    pub id: String,
    pub event_id: String,
    pub seller_id: String,
    pub amount_in_cents: Money,
    pub fee_in_cents: Money,
    pub status: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTableSale {
    pub event_id: String,
    pub seller_id: String,
    pub amount_in_cents: Money,
}

#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct Payout {
    pub id: String,
    pub user_id: String,
    pub amount_in_cents: Money,
    pub status: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPayout {
    pub user_id: String,
    pub amount_in_cents: Money,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeConfirmation {
    pub id: String,
    pub status: String,
}
