use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct Referral {
    pub id: String,
    pub user_id: String,
    pub referral_code: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct ReferralAward {
    pub id: String,
    pub referrer_id: String,
    pub referred_user_id: String,
    pub credits: i64,
    pub created_at: chrono::NaiveDateTime,
}
