use async_trait::async_trait;
use futures_util::TryFutureExt;
use sqlx::PgPool;
use tokio::sync::{mpsc, oneshot};

use super::users::{self, UserRequest};
use super::{verification, RequestHandler, Service, ServiceError};
use crate::models::money::Money;
use crate::models::payments;
use crate::models::verification::VerificationAction;
use crate::pricing::{self, rates};
use crate::repositories::payments::PaymentRepository;
use crate::repositories::processor::ProcessorApi;

pub enum PaymentRequest {
    BookVendor {
        host_id: String,
        vendor_id: String,
        amount: Money,
        response: oneshot::Sender<Result<payments::Booking, ServiceError>>,
    },
    SellTable {
        event_id: String,
        seller_id: String,
        amount: Money,
        response: oneshot::Sender<Result<payments::TableSale, ServiceError>>,
    },
    AcceptPayment {
        user_id: String,
        booking_id: String,
        response: oneshot::Sender<Result<payments::Booking, ServiceError>>,
    },
    RequestPayout {
        user_id: String,
        amount: Money,
        response: oneshot::Sender<Result<payments::Payout, ServiceError>>,
    },
}

#[derive(Clone)]
pub struct PaymentRequestHandler {
    repository: PaymentRepository,
    processor: ProcessorApi,
    user_channel: mpsc::Sender<UserRequest>,
}

impl PaymentRequestHandler {
    pub fn new(
        sql_conn: PgPool,
        processor: ProcessorApi,
        user_channel: mpsc::Sender<UserRequest>,
    ) -> Self {
        let repository = PaymentRepository::new(sql_conn);

        PaymentRequestHandler {
            repository,
            processor,
            user_channel,
        }
    }

    async fn book_vendor(
        &self,
        host_id: String,
        vendor_id: String,
        amount: Money,
    ) -> Result<payments::Booking, ServiceError> {
        require_chargeable(amount)?;

        let booking_fee =
            pricing::host_booking_fee(amount).map_err(|e| ServiceError::Validation(e.to_string()))?;
        let processing_fee =
            pricing::processing_fee(amount).map_err(|e| ServiceError::Validation(e.to_string()))?;
        let fee_total = booking_fee
            .checked_add(processing_fee)
            .ok_or_else(|| ServiceError::Internal("Fee total overflow.".to_string()))?;

        let booking = self
            .repository
            .insert_booking(&host_id, &vendor_id, amount, booking_fee, processing_fee)
            .await
            .map_err(|e| ServiceError::Repository("Payments".to_string(), e.to_string()))?;

        self.processor
            .charge(amount, fee_total, "local vendor booking")
            .map_err(|e| {
                ServiceError::ExternalService(
                    "PaymentService".to_string(),
                    "Processor".to_string(),
                    e.to_string(),
                )
            })
            .await?;

        self.repository
            .update_booking_status(&booking.id, "charged")
            .await
            .map_err(|e| ServiceError::Repository("Payments".to_string(), e.to_string()))
    }

    async fn sell_table(
        &self,
        event_id: String,
        seller_id: String,
        amount: Money,
    ) -> Result<payments::TableSale, ServiceError> {
        require_chargeable(amount)?;

        let fee =
            pricing::table_sale_fee(amount).map_err(|e| ServiceError::Validation(e.to_string()))?;

        let sale = self
            .repository
            .insert_table_sale(&event_id, &seller_id, amount, fee)
            .await
            .map_err(|e| ServiceError::Repository("Payments".to_string(), e.to_string()))?;

        self.processor
            .charge(amount, fee, "event table sale")
            .map_err(|e| {
                ServiceError::ExternalService(
                    "PaymentService".to_string(),
                    "Processor".to_string(),
                    e.to_string(),
                )
            })
            .await?;

        self.repository
            .update_table_sale_status(&sale.id, "charged")
            .await
            .map_err(|e| ServiceError::Repository("Payments".to_string(), e.to_string()))
    }

    async fn accept_payment(
        &self,
        user_id: String,
        booking_id: String,
    ) -> Result<payments::Booking, ServiceError> {
        let user = users::fetch_user(&self.user_channel, "Payments", &user_id).await?;
        verification::check(&user, VerificationAction::AcceptPayment)?;

        let booking = self
            .repository
            .get_booking(&booking_id)
            .await
            .map_err(|e| ServiceError::Repository("Payments".to_string(), e.to_string()))?;

        match booking {
            None => Err(ServiceError::Validation("Booking not found.".to_string())),
            Some(_) => self
                .repository
                .update_booking_status(&booking_id, "accepted")
                .await
                .map_err(|e| ServiceError::Repository("Payments".to_string(), e.to_string())),
        }
    }

    async fn request_payout(
        &self,
        user_id: String,
        amount: Money,
    ) -> Result<payments::Payout, ServiceError> {
        if amount.is_negative() {
            return Err(ServiceError::Validation(
                "Payout amount must not be negative.".to_string(),
            ));
        }
        if amount < rates::MINIMUM_PAYOUT {
            return Err(ServiceError::Validation(format!(
                "Payout amount below the minimum of {}.",
                pricing::format_currency(rates::MINIMUM_PAYOUT)
            )));
        }

        let payout = self
            .repository
            .insert_payout(&user_id, amount)
            .await
            .map_err(|e| ServiceError::Repository("Payments".to_string(), e.to_string()))?;

        self.processor
            .payout(&user_id, amount)
            .map_err(|e| {
                ServiceError::ExternalService(
                    "PaymentService".to_string(),
                    "Processor".to_string(),
                    e.to_string(),
                )
            })
            .await?;

        self.repository
            .update_payout_status(&payout.id, "sent")
            .await
            .map_err(|e| ServiceError::Repository("Payments".to_string(), e.to_string()))
    }
}

fn require_chargeable(amount: Money) -> Result<(), ServiceError> {
    if amount.is_negative() {
        return Err(ServiceError::Validation(
            "Charge amount must not be negative.".to_string(),
        ));
    }
    if amount < rates::MINIMUM_CHARGE {
        return Err(ServiceError::Validation(format!(
            "Charge amount below the minimum of {}.",
            pricing::format_currency(rates::MINIMUM_CHARGE)
        )));
    }
    Ok(())
}

#[async_trait]
impl RequestHandler<PaymentRequest> for PaymentRequestHandler {
    async fn handle_request(&self, request: PaymentRequest) {
        match request {
            PaymentRequest::BookVendor {
                host_id,
                vendor_id,
                amount,
                response,
            } => {
                let booking = self.book_vendor(host_id, vendor_id, amount).await;
                let _ = response.send(booking);
            }
            PaymentRequest::SellTable {
                event_id,
                seller_id,
                amount,
                response,
            } => {
                let sale = self.sell_table(event_id, seller_id, amount).await;
                let _ = response.send(sale);
            }
            PaymentRequest::AcceptPayment {
                user_id,
                booking_id,
                response,
            } => {
                let booking = self.accept_payment(user_id, booking_id).await;
                let _ = response.send(booking);
            }
            PaymentRequest::RequestPayout {
                user_id,
                amount,
                response,
            } => {
                let payout = self.request_payout(user_id, amount).await;
                let _ = response.send(payout);
            }
        }
    }
}

pub struct PaymentService;

impl PaymentService {
    pub fn new() -> Self {
        PaymentService {}
    }
}

#[async_trait]
impl Service<PaymentRequest, PaymentRequestHandler> for PaymentService {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charges_below_the_floor_are_rejected() {
        let result = require_chargeable(Money::from_cents(49));
        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert!(require_chargeable(Money::from_cents(50)).is_ok());
    }

    #[test]
    fn negative_charges_are_rejected() {
        let result = require_chargeable(Money::from_cents(-1));
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }
}
