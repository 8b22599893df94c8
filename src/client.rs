use serde_json::{json, Value};

pub mod session;
pub mod verification;

/// Failure of a remote call, as seen by the client SDK.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("api error ({status}): {body}")]
    Api { status: u16, body: Value },
}

/// Thin typed client for the marketplace HTTP API.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub async fn hire_contractor(
        &self,
        employer_id: &str,
        contractor_id: &str,
        amount_in_cents: i64,
    ) -> Result<Value, ApiError> {
        self.post(
            "/hires",
            json!({
                "employer_id": employer_id,
                "contractor_id": contractor_id,
                "amount_in_cents": amount_in_cents,
            }),
        )
        .await
    }

    pub async fn send_proposal(
        &self,
        sender_id: &str,
        recipient_id: &str,
        event_id: &str,
    ) -> Result<Value, ApiError> {
        self.post(
            "/proposals",
            json!({
                "sender_id": sender_id,
                "recipient_id": recipient_id,
                "event_id": event_id,
            }),
        )
        .await
    }

    pub async fn apply_to_job(&self, job_id: &str, contractor_id: &str) -> Result<Value, ApiError> {
        self.post(
            &format!("/jobs/{}/applications", job_id),
            json!({ "contractor_id": contractor_id }),
        )
        .await
    }

    pub async fn accept_payment(&self, booking_id: &str, user_id: &str) -> Result<Value, ApiError> {
        self.post(
            &format!("/bookings/{}/accept-payment", booking_id),
            json!({ "user_id": user_id }),
        )
        .await
    }

    pub async fn book_vendor(
        &self,
        host_id: &str,
        vendor_id: &str,
        amount_in_cents: i64,
    ) -> Result<Value, ApiError> {
        self.post(
            "/bookings",
            json!({
                "host_id": host_id,
                "vendor_id": vendor_id,
                "amount_in_cents": amount_in_cents,
            }),
        )
        .await
    }

    async fn post(&self, path: &str, payload: Value) -> Result<Value, ApiError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}
