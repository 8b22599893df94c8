use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::{mpsc, oneshot};
use tower_http::trace::TraceLayer;

use super::geocoding::GeocodingRequest;
use super::marketplace::MarketplaceRequest;
use super::payments::PaymentRequest;
use super::referrals::ReferralRequest;
use super::users::UserRequest;
use super::ServiceError;

mod marketplace;
mod payments;
mod users;

#[derive(Clone)]
pub struct AppState {
    user_channel: mpsc::Sender<UserRequest>,
    payment_channel: mpsc::Sender<PaymentRequest>,
    marketplace_channel: mpsc::Sender<MarketplaceRequest>,
    referral_channel: mpsc::Sender<ReferralRequest>,
    geocoding_channel: mpsc::Sender<GeocodingRequest>,
}

/// Maps a service failure to its HTTP status and response body.
///
/// Verification failures are the one error whose text is meant for the
/// user; everything unexpected is logged and flattened to a generic body
/// so internals never leak.
pub fn error_body(error: &ServiceError) -> (StatusCode, serde_json::Value) {
    match error {
        ServiceError::VerificationRequired {
            explanation,
            required_role,
        } => (
            StatusCode::FORBIDDEN,
            json!({
                "kind": "verification_required",
                "explanation": explanation,
                "required_role": required_role,
            }),
        ),
        ServiceError::Validation(description) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "kind": "validation", "description": description }),
        ),
        other => {
            log::error!("Request failed: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "description": "Internal server error." }),
            )
        }
    }
}

fn error_response(error: ServiceError) -> (StatusCode, Json<serde_json::Value>) {
    let (status, body) = error_body(&error);
    (status, Json(body))
}

fn service_unavailable() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "description": "Service unavailable." })),
    )
}

#[derive(Deserialize)]
struct GeocodeParams {
    address: String,
}

async fn geocode(
    State(state): State<AppState>,
    Query(params): Query<GeocodeParams>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (geo_tx, geo_rx) = oneshot::channel();

    let sent = state
        .geocoding_channel
        .send(GeocodingRequest::Geocode {
            address: params.address,
            response: geo_tx,
        })
        .await;
    if sent.is_err() {
        return service_unavailable();
    }

    match geo_rx.await {
        Ok(Ok(Some(point))) => (StatusCode::OK, Json(json!(point))),
        Ok(Ok(None)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "description": "Address not found." })),
        ),
        Ok(Err(error)) => error_response(error),
        Err(_) => service_unavailable(),
    }
}

pub async fn start_http_server(
    settings: &crate::settings::Http,
    user_channel: mpsc::Sender<UserRequest>,
    payment_channel: mpsc::Sender<PaymentRequest>,
    marketplace_channel: mpsc::Sender<MarketplaceRequest>,
    referral_channel: mpsc::Sender<ReferralRequest>,
    geocoding_channel: mpsc::Sender<GeocodingRequest>,
) -> Result<(), anyhow::Error> {
    let app_state = AppState {
        user_channel,
        payment_channel,
        marketplace_channel,
        referral_channel,
        geocoding_channel,
    };

    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/users", post(users::create_user))
        .route("/users/{id}", get(users::get_user))
        .route("/users/{id}/verify-identity", post(users::verify_identity))
        .route("/users/{id}/tax-form", post(users::submit_tax_form))
        .route("/users/{id}/referral-code", post(users::create_referral_code))
        .route("/users/{id}/referral-earnings", get(users::referral_earnings))
        .route("/bookings", post(payments::book_vendor))
        .route("/bookings/{id}/accept-payment", post(payments::accept_payment))
        .route("/table-sales", post(payments::sell_table))
        .route("/payouts", post(payments::request_payout))
        .route("/hires", post(marketplace::hire_contractor))
        .route("/proposals", post(marketplace::send_proposal))
        .route("/jobs/{id}/applications", post(marketplace::apply_to_job))
        .route("/invites", post(marketplace::invite_external_vendor))
        .route("/geocode", get(geocode))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http());

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.host, settings.port)).await?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
