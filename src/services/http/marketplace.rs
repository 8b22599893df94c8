use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::oneshot;

use super::{error_response, service_unavailable};
use crate::models::marketplace::{NewExternalInvite, NewHire, NewProposal};
use crate::services::marketplace::MarketplaceRequest;

pub async fn hire_contractor(
    State(state): State<super::AppState>,
    Json(req): Json<NewHire>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (hire_tx, hire_rx) = oneshot::channel();

    let sent = state
        .marketplace_channel
        .send(MarketplaceRequest::HireContractor {
            employer_id: req.employer_id,
            contractor_id: req.contractor_id,
            amount: req.amount_in_cents,
            response: hire_tx,
        })
        .await;
    if sent.is_err() {
        return service_unavailable();
    }

    match hire_rx.await {
        Ok(Ok(hire)) => (StatusCode::CREATED, Json(json!(hire))),
        Ok(Err(error)) => error_response(error),
        Err(_) => service_unavailable(),
    }
}

pub async fn send_proposal(
    State(state): State<super::AppState>,
    Json(req): Json<NewProposal>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (proposal_tx, proposal_rx) = oneshot::channel();

    let sent = state
        .marketplace_channel
        .send(MarketplaceRequest::SendProposal {
            sender_id: req.sender_id,
            recipient_id: req.recipient_id,
            event_id: req.event_id,
            response: proposal_tx,
        })
        .await;
    if sent.is_err() {
        return service_unavailable();
    }

    match proposal_rx.await {
        Ok(Ok(proposal)) => (StatusCode::CREATED, Json(json!(proposal))),
        Ok(Err(error)) => error_response(error),
        Err(_) => service_unavailable(),
    }
}

#[derive(Deserialize)]
pub struct ApplyRequest {
    pub contractor_id: String,
}

pub async fn apply_to_job(
    State(state): State<super::AppState>,
    Path(job_id): Path<String>,
    Json(req): Json<ApplyRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (apply_tx, apply_rx) = oneshot::channel();

    let sent = state
        .marketplace_channel
        .send(MarketplaceRequest::ApplyToJob {
            contractor_id: req.contractor_id,
            job_id,
            response: apply_tx,
        })
        .await;
    if sent.is_err() {
        return service_unavailable();
    }

    match apply_rx.await {
        Ok(Ok(application)) => (StatusCode::CREATED, Json(json!(application))),
        Ok(Err(error)) => error_response(error),
        Err(_) => service_unavailable(),
    }
}

pub async fn invite_external_vendor(
    State(state): State<super::AppState>,
    Json(req): Json<NewExternalInvite>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (invite_tx, invite_rx) = oneshot::channel();

    let sent = state
        .marketplace_channel
        .send(MarketplaceRequest::InviteExternalVendor {
            inviter_id: req.inviter_id,
            email: req.email,
            response: invite_tx,
        })
        .await;
    if sent.is_err() {
        return service_unavailable();
    }

    match invite_rx.await {
        Ok(Ok(invite)) => (StatusCode::CREATED, Json(json!(invite))),
        Ok(Err(error)) => error_response(error),
        Err(_) => service_unavailable(),
    }
}
