use crate::models::money::Money;
use crate::models::payments;

use anyhow::bail;
use serde_json::json;
use uuid::Uuid;

/// Client for the hosted payment processor. The processor is opaque: it
/// accepts an amount plus fee metadata and returns a charge confirmation.
#[derive(Clone)]
pub struct ProcessorApi {
    auth_token: String,
    url: String,
    client: reqwest::Client,
}

impl ProcessorApi {
    pub fn new(auth_token: String, url: String) -> Self {
        Self {
            auth_token,
            url,
            client: reqwest::Client::new(),
        }
    }

    pub async fn charge(
        &self,
        amount: Money,
        fee: Money,
        description: &str,
    ) -> Result<payments::ChargeConfirmation, anyhow::Error> {
        let idempotency_key = Uuid::new_v4().hyphenated().to_string();
        let payload = json!({
            "amountInCents": amount.cents(),
            "feeInCents": fee.cents(),
            "description": description,
        });

        let response = self
            .client
            .post(format!("{}/v1/charges", self.url))
            .bearer_auth(&self.auth_token)
            .header("X-Idempotency-Key", idempotency_key)
            .json(&payload)
            .send()
            .await?
            .text()
            .await?;

        let response_json: serde_json::Value = serde_json::from_str(&response)?;
        match response_json.get("charge") {
            Some(charge) => {
                let confirmation: payments::ChargeConfirmation =
                    serde_json::from_value(charge.clone())?;
                Ok(confirmation)
            }
            None => bail!("Processor: Bad response format."),
        }
    }

    pub async fn payout(
        &self,
        user_id: &str,
        amount: Money,
    ) -> Result<payments::ChargeConfirmation, anyhow::Error> {
        let idempotency_key = Uuid::new_v4().hyphenated().to_string();
        let payload = json!({
            "destinationUserId": user_id,
            "amountInCents": amount.cents(),
        });

        let response = self
            .client
            .post(format!("{}/v1/payouts", self.url))
            .bearer_auth(&self.auth_token)
            .header("X-Idempotency-Key", idempotency_key)
            .json(&payload)
            .send()
            .await?
            .text()
            .await?;

        let response_json: serde_json::Value = serde_json::from_str(&response)?;
        match response_json.get("payout") {
            Some(payout) => {
                let confirmation: payments::ChargeConfirmation =
                    serde_json::from_value(payout.clone())?;
                Ok(confirmation)
            }
            None => bail!("Processor: Bad response format."),
        }
    }
}
