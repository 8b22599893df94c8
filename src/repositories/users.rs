use crate::models::users;

use anyhow::bail;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    conn: PgPool,
}

impl UserRepository {
    pub fn new(conn: PgPool) -> Self {
        Self { conn }
    }

    pub async fn insert_user(
        &self,
        role: &str,
        referral_code: Option<String>,
    ) -> Result<users::User, anyhow::Error> {
        let user_id = Uuid::new_v4().hyphenated().to_string();

        let referred_by: Option<String> = match referral_code {
            Some(code) => {
                sqlx::query_scalar::<_, String>(
                    "SELECT user_id FROM referrals WHERE referral_code = $1",
                )
                .bind(&code)
                .fetch_optional(&self.conn)
                .await?
            }
            None => None,
        };

        let user = sqlx::query_as::<_, users::User>(
            r#"
            INSERT INTO users (id, role, referred_by)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&user_id)
        .bind(role)
        .bind(&referred_by)
        .fetch_one(&self.conn)
        .await?;

        Ok(user)
    }

    pub async fn get_user_by_id(
        &self,
        user_id: &str,
    ) -> Result<Option<users::User>, anyhow::Error> {
        let user = sqlx::query_as::<_, users::User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.conn)
            .await?;

        Ok(user)
    }

    pub async fn mark_identity_verified(&self, user_id: &str) -> Result<(), anyhow::Error> {
        let updated = sqlx::query(
            "UPDATE users SET identity_verified = true, updated_at = CURRENT_TIMESTAMP WHERE id = $1",
        )
        .bind(user_id)
        .execute(&self.conn)
        .await?;

        if updated.rows_affected() == 0 {
            bail!("User not found")
        }

        Ok(())
    }

    pub async fn mark_tax_form_submitted(&self, user_id: &str) -> Result<(), anyhow::Error> {
        let updated = sqlx::query(
            "UPDATE users SET tax_form_submitted = true, updated_at = CURRENT_TIMESTAMP WHERE id = $1",
        )
        .bind(user_id)
        .execute(&self.conn)
        .await?;

        if updated.rows_affected() == 0 {
            bail!("User not found")
        }

        Ok(())
    }

    pub async fn spend_credits(&self, user_id: &str, credits: i64) -> Result<(), anyhow::Error> {
        let updated = sqlx::query(
            r#"
            UPDATE users SET credits = credits - $1, updated_at = CURRENT_TIMESTAMP
            WHERE id = $2 AND credits >= $1
            "#,
        )
        .bind(credits)
        .bind(user_id)
        .execute(&self.conn)
        .await?;

        if updated.rows_affected() == 0 {
            bail!("InsufficientCredits")
        }

        Ok(())
    }
}
