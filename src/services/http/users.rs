use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tokio::sync::oneshot;

use super::{error_response, service_unavailable};
use crate::models::users::NewUser;
use crate::services::referrals::ReferralRequest;
use crate::services::users::UserRequest;

pub async fn create_user(
    State(state): State<super::AppState>,
    Json(req): Json<NewUser>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (user_tx, user_rx) = oneshot::channel();

    let sent = state
        .user_channel
        .send(UserRequest::CreateUser {
            role: req.role,
            referral_code: req.referral_code,
            response: user_tx,
        })
        .await;
    if sent.is_err() {
        return service_unavailable();
    }

    match user_rx.await {
        Ok(Ok(user)) => (StatusCode::CREATED, Json(json!(user))),
        Ok(Err(error)) => error_response(error),
        Err(_) => service_unavailable(),
    }
}

pub async fn get_user(
    State(state): State<super::AppState>,
    Path(user_id): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (user_tx, user_rx) = oneshot::channel();

    let sent = state
        .user_channel
        .send(UserRequest::GetUser {
            id: user_id,
            response: user_tx,
        })
        .await;
    if sent.is_err() {
        return service_unavailable();
    }

    match user_rx.await {
        Ok(Ok(Some(user))) => (StatusCode::OK, Json(json!(user))),
        Ok(Ok(None)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "description": "User not found." })),
        ),
        Ok(Err(error)) => error_response(error),
        Err(_) => service_unavailable(),
    }
}

pub async fn verify_identity(
    State(state): State<super::AppState>,
    Path(user_id): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (verify_tx, verify_rx) = oneshot::channel();

    let sent = state
        .user_channel
        .send(UserRequest::VerifyIdentity {
            id: user_id,
            response: verify_tx,
        })
        .await;
    if sent.is_err() {
        return service_unavailable();
    }

    match verify_rx.await {
        Ok(Ok(())) => (StatusCode::OK, Json(json!({ "status": "verified" }))),
        Ok(Err(error)) => error_response(error),
        Err(_) => service_unavailable(),
    }
}

pub async fn submit_tax_form(
    State(state): State<super::AppState>,
    Path(user_id): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (tax_tx, tax_rx) = oneshot::channel();

    let sent = state
        .user_channel
        .send(UserRequest::SubmitTaxForm {
            id: user_id,
            response: tax_tx,
        })
        .await;
    if sent.is_err() {
        return service_unavailable();
    }

    match tax_rx.await {
        Ok(Ok(())) => (StatusCode::OK, Json(json!({ "status": "submitted" }))),
        Ok(Err(error)) => error_response(error),
        Err(_) => service_unavailable(),
    }
}

pub async fn create_referral_code(
    State(state): State<super::AppState>,
    Path(user_id): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (code_tx, code_rx) = oneshot::channel();

    let sent = state
        .referral_channel
        .send(ReferralRequest::CreateCode {
            user_id,
            response: code_tx,
        })
        .await;
    if sent.is_err() {
        return service_unavailable();
    }

    match code_rx.await {
        Ok(Ok(referral)) => (StatusCode::CREATED, Json(json!(referral))),
        Ok(Err(error)) => error_response(error),
        Err(_) => service_unavailable(),
    }
}

pub async fn referral_earnings(
    State(state): State<super::AppState>,
    Path(user_id): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (earnings_tx, earnings_rx) = oneshot::channel();

    let sent = state
        .referral_channel
        .send(ReferralRequest::GetEarnings {
            user_id,
            response: earnings_tx,
        })
        .await;
    if sent.is_err() {
        return service_unavailable();
    }

    match earnings_rx.await {
        Ok(Ok(earnings)) => (StatusCode::OK, Json(json!({ "credits": earnings }))),
        Ok(Err(error)) => error_response(error),
        Err(_) => service_unavailable(),
    }
}
