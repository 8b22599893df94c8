use crate::models::referrals;
use crate::utils;

use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct ReferralRepository {
    conn: PgPool,
}

impl ReferralRepository {
    pub fn new(conn: PgPool) -> Self {
        Self { conn }
    }

    pub async fn create_code(&self, user_id: &str) -> Result<referrals::Referral, anyhow::Error> {
        let id = Uuid::new_v4().hyphenated().to_string();
        let code = utils::referral_code(user_id);

        let referral = sqlx::query_as::<_, referrals::Referral>(
            r#"
            INSERT INTO referrals (id, user_id, referral_code)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(&code)
        .fetch_one(&self.conn)
        .await?;

        Ok(referral)
    }

    // Records the award and credits the referrer in one transaction so the
    // ledger and the balance cannot drift apart.
    pub async fn record_signup_award(
        &self,
        referrer_id: &str,
        referred_user_id: &str,
        credits: i64,
    ) -> Result<referrals::ReferralAward, anyhow::Error> {
        let id = Uuid::new_v4().hyphenated().to_string();
        let mut tx = self.conn.begin().await?;

        let award = sqlx::query_as::<_, referrals::ReferralAward>(
            r#"
            INSERT INTO referral_awards (id, referrer_id, referred_user_id, credits)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(referrer_id)
        .bind(referred_user_id)
        .bind(credits)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE users SET credits = credits + $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2",
        )
        .bind(credits)
        .bind(referrer_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(award)
    }

    pub async fn get_earnings(&self, user_id: &str) -> Result<i64, anyhow::Error> {
        let earnings: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(credits), 0)::BIGINT FROM referral_awards WHERE referrer_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.conn)
        .await?;

        Ok(earnings)
    }
}
