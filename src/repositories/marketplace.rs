use crate::models::marketplace;
use crate::models::money::Money;

use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct MarketplaceRepository {
    conn: PgPool,
}

impl MarketplaceRepository {
    pub fn new(conn: PgPool) -> Self {
        Self { conn }
    }

    pub async fn insert_hire(
        &self,
        employer_id: &str,
        contractor_id: &str,
        amount: Money,
        processing_fee: Money,
    ) -> Result<marketplace::Hire, anyhow::Error> {
        let hire_id = Uuid::new_v4().hyphenated().to_string();

        let hire = sqlx::query_as::<_, marketplace::Hire>(
            r#"
            INSERT INTO hires
            (id, employer_id, contractor_id, amount_in_cents, processing_fee_in_cents, status)
            VALUES ($1, $2, $3, $4, $5, 'pending')
            RETURNING *
            "#,
        )
        .bind(&hire_id)
        .bind(employer_id)
        .bind(contractor_id)
        .bind(amount)
        .bind(processing_fee)
        .fetch_one(&self.conn)
        .await?;

        Ok(hire)
    }

    pub async fn update_hire_status(
        &self,
        hire_id: &str,
        status: &str,
    ) -> Result<marketplace::Hire, anyhow::Error> {
        let hire = sqlx::query_as::<_, marketplace::Hire>(
            "UPDATE hires SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(hire_id)
        .fetch_one(&self.conn)
        .await?;

        Ok(hire)
    }

    pub async fn insert_application(
        &self,
        job_id: &str,
        contractor_id: &str,
    ) -> Result<marketplace::Application, anyhow::Error> {
        let application_id = Uuid::new_v4().hyphenated().to_string();

        let application = sqlx::query_as::<_, marketplace::Application>(
            r#"
            INSERT INTO applications (id, job_id, contractor_id, status)
            VALUES ($1, $2, $3, 'submitted')
            RETURNING *
            "#,
        )
        .bind(&application_id)
        .bind(job_id)
        .bind(contractor_id)
        .fetch_one(&self.conn)
        .await?;

        Ok(application)
    }

    pub async fn insert_proposal(
        &self,
        sender_id: &str,
        recipient_id: &str,
        event_id: &str,
        credits_spent: i64,
    ) -> Result<marketplace::Proposal, anyhow::Error> {
        let proposal_id = Uuid::new_v4().hyphenated().to_string();

        let proposal = sqlx::query_as::<_, marketplace::Proposal>(
            r#"
            INSERT INTO proposals (id, sender_id, recipient_id, event_id, credits_spent)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&proposal_id)
        .bind(sender_id)
        .bind(recipient_id)
        .bind(event_id)
        .bind(credits_spent)
        .fetch_one(&self.conn)
        .await?;

        Ok(proposal)
    }

    pub async fn insert_external_invite(
        &self,
        inviter_id: &str,
        email: &str,
        fee: Money,
    ) -> Result<marketplace::ExternalInvite, anyhow::Error> {
        let invite_id = Uuid::new_v4().hyphenated().to_string();

        let invite = sqlx::query_as::<_, marketplace::ExternalInvite>(
            r#"
            INSERT INTO external_invites (id, inviter_id, email, fee_in_cents)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&invite_id)
        .bind(inviter_id)
        .bind(email)
        .bind(fee)
        .fetch_one(&self.conn)
        .await?;

        Ok(invite)
    }
}
