use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::oneshot;

use super::{error_response, service_unavailable};
use crate::models::payments::{NewBooking, NewPayout, NewTableSale};
use crate::services::payments::PaymentRequest;

pub async fn book_vendor(
    State(state): State<super::AppState>,
    Json(req): Json<NewBooking>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (booking_tx, booking_rx) = oneshot::channel();

    let sent = state
        .payment_channel
        .send(PaymentRequest::BookVendor {
            host_id: req.host_id,
            vendor_id: req.vendor_id,
            amount: req.amount_in_cents,
            response: booking_tx,
        })
        .await;
    if sent.is_err() {
        return service_unavailable();
    }

    match booking_rx.await {
        Ok(Ok(booking)) => (StatusCode::CREATED, Json(json!(booking))),
        Ok(Err(error)) => error_response(error),
        Err(_) => service_unavailable(),
    }
}

pub async fn sell_table(
    State(state): State<super::AppState>,
    Json(req): Json<NewTableSale>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (sale_tx, sale_rx) = oneshot::channel();

    let sent = state
        .payment_channel
        .send(PaymentRequest::SellTable {
            event_id: req.event_id,
            seller_id: req.seller_id,
            amount: req.amount_in_cents,
            response: sale_tx,
        })
        .await;
    if sent.is_err() {
        return service_unavailable();
    }

    match sale_rx.await {
        Ok(Ok(sale)) => (StatusCode::CREATED, Json(json!(sale))),
        Ok(Err(error)) => error_response(error),
        Err(_) => service_unavailable(),
    }
}

#[derive(Deserialize)]
pub struct AcceptPaymentRequest {
    pub user_id: String,
}

pub async fn accept_payment(
    State(state): State<super::AppState>,
    Path(booking_id): Path<String>,
    Json(req): Json<AcceptPaymentRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (accept_tx, accept_rx) = oneshot::channel();

    let sent = state
        .payment_channel
        .send(PaymentRequest::AcceptPayment {
            user_id: req.user_id,
            booking_id,
            response: accept_tx,
        })
        .await;
    if sent.is_err() {
        return service_unavailable();
    }

    match accept_rx.await {
        Ok(Ok(booking)) => (StatusCode::OK, Json(json!(booking))),
        Ok(Err(error)) => error_response(error),
        Err(_) => service_unavailable(),
    }
}

pub async fn request_payout(
    State(state): State<super::AppState>,
    Json(req): Json<NewPayout>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (payout_tx, payout_rx) = oneshot::channel();

    let sent = state
        .payment_channel
        .send(PaymentRequest::RequestPayout {
            user_id: req.user_id,
            amount: req.amount_in_cents,
            response: payout_tx,
        })
        .await;
    if sent.is_err() {
        return service_unavailable();
    }

    match payout_rx.await {
        Ok(Ok(payout)) => (StatusCode::CREATED, Json(json!(payout))),
        Ok(Err(error)) => error_response(error),
        Err(_) => service_unavailable(),
    }
}
