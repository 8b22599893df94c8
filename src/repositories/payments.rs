use crate::models::money::Money;
use crate::models::payments;

use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct PaymentRepository {
    conn: PgPool,
}

impl PaymentRepository {
    pub fn new(conn: PgPool) -> Self {
        Self { conn }
    }

    pub async fn insert_booking(
        &self,
        host_id: &str,
        vendor_id: &str,
        amount: Money,
        booking_fee: Money,
        processing_fee: Money,
    ) -> Result<payments::Booking, anyhow::Error> {
        let booking_id = Uuid::new_v4().hyphenated().to_string();

        let booking = sqlx::query_as::<_, payments::Booking>(
            r#"
            INSERT INTO bookings
            (id, host_id, vendor_id, amount_in_cents, booking_fee_in_cents, processing_fee_in_cents, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING *
            "#,
        )
        .bind(&booking_id)
        .bind(host_id)
        .bind(vendor_id)
        .bind(amount)
        .bind(booking_fee)
        .bind(processing_fee)
        .fetch_one(&self.conn)
        .await?;

        Ok(booking)
    }

    pub async fn get_booking(
        &self,
        booking_id: &str,
    ) -> Result<Option<payments::Booking>, anyhow::Error> {
        let booking =
            sqlx::query_as::<_, payments::Booking>("SELECT * FROM bookings WHERE id = $1")
                .bind(booking_id)
                .fetch_optional(&self.conn)
                .await?;

        Ok(booking)
    }

    pub async fn update_booking_status(
        &self,
        booking_id: &str,
        status: &str,
    ) -> Result<payments::Booking, anyhow::Error> {
        let booking = sqlx::query_as::<_, payments::Booking>(
            "UPDATE bookings SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(booking_id)
        .fetch_one(&self.conn)
        .await?;

        Ok(booking)
    }

    pub async fn insert_table_sale(
        &self,
        event_id: &str,
        seller_id: &str,
        amount: Money,
        fee: Money,
    ) -> Result<payments::TableSale, anyhow::Error> {
        let sale_id = Uuid::new_v4().hyphenated().to_string();

        let sale = sqlx::query_as::<_, payments::TableSale>(
            r#"
            INSERT INTO table_sales (id, event_id, seller_id, amount_in_cents, fee_in_cents, status)
            VALUES ($1, $2, $3, $4, $5, 'pending')
            RETURNING *
            "#,
        )
        .bind(&sale_id)
        .bind(event_id)
        .bind(seller_id)
        .bind(amount)
        .bind(fee)
        .fetch_one(&self.conn)
        .await?;

        Ok(sale)
    }

    pub async fn update_table_sale_status(
        &self,
        sale_id: &str,
        status: &str,
    ) -> Result<payments::TableSale, anyhow::Error> {
        let sale = sqlx::query_as::<_, payments::TableSale>(
            "UPDATE table_sales SET status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(sale_id)
        .fetch_one(&self.conn)
        .await?;

        Ok(sale)
    }

    pub async fn insert_payout(
        &self,
        user_id: &str,
        amount: Money,
    ) -> Result<payments::Payout, anyhow::Error> {
        let payout_id = Uuid::new_v4().hyphenated().to_string();

        let payout = sqlx::query_as::<_, payments::Payout>(
            r#"
            INSERT INTO payouts (id, user_id, amount_in_cents, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING *
            "#,
        )
        .bind(&payout_id)
        .bind(user_id)
        .bind(amount)
        .fetch_one(&self.conn)
        .await?;

        Ok(payout)
    }

    pub async fn update_payout_status(
        &self,
        payout_id: &str,
        status: &str,
    ) -> Result<payments::Payout, anyhow::Error> {
        let payout = sqlx::query_as::<_, payments::Payout>(
            "UPDATE payouts SET status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(payout_id)
        .fetch_one(&self.conn)
        .await?;

        Ok(payout)
    }
}
