use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::oneshot;

use super::{RequestHandler, Service, ServiceError};
use crate::models::referrals;
use crate::pricing::rates;
use crate::repositories::referrals::ReferralRepository;

pub enum ReferralRequest {
    CreateCode {
        user_id: String,
        response: oneshot::Sender<Result<referrals::Referral, ServiceError>>,
    },
    // Sent by the user service on a referred signup; no response channel.
    AwardSignup {
        referrer_id: String,
        referred_user_id: String,
    },
    GetEarnings {
        user_id: String,
        response: oneshot::Sender<Result<i64, ServiceError>>,
    },
}

#[derive(Clone)]
pub struct ReferralRequestHandler {
    repository: ReferralRepository,
}

impl ReferralRequestHandler {
    pub fn new(sql_conn: PgPool) -> Self {
        let repository = ReferralRepository::new(sql_conn);

        ReferralRequestHandler { repository }
    }

    async fn create_code(&self, user_id: &str) -> Result<referrals::Referral, ServiceError> {
        self.repository
            .create_code(user_id)
            .await
            .map_err(|e| ServiceError::Database(e.to_string()))
    }

    async fn award_signup(&self, referrer_id: &str, referred_user_id: &str) {
        let result = self
            .repository
            .record_signup_award(
                referrer_id,
                referred_user_id,
                rates::REFERRAL_SIGNUP_REWARD,
            )
            .await;

        match result {
            Ok(award) => {
                log::info!(
                    "Awarded {} credits to {} for referring {}.",
                    award.credits,
                    award.referrer_id,
                    award.referred_user_id
                );
            }
            Err(e) => {
                log::error!("Could not award referral credits: {}", e);
            }
        }
    }

    async fn get_earnings(&self, user_id: &str) -> Result<i64, ServiceError> {
        self.repository
            .get_earnings(user_id)
            .await
            .map_err(|e| ServiceError::Database(e.to_string()))
    }
}

#[async_trait]
impl RequestHandler<ReferralRequest> for ReferralRequestHandler {
    async fn handle_request(&self, request: ReferralRequest) {
        match request {
            ReferralRequest::CreateCode { user_id, response } => {
                let referral = self.create_code(&user_id).await;
                let _ = response.send(referral);
            }
            ReferralRequest::AwardSignup {
                referrer_id,
                referred_user_id,
            } => {
                self.award_signup(&referrer_id, &referred_user_id).await;
            }
            ReferralRequest::GetEarnings { user_id, response } => {
                let earnings = self.get_earnings(&user_id).await;
                let _ = response.send(earnings);
            }
        }
    }
}

pub struct ReferralService;

impl ReferralService {
    pub fn new() -> Self {
        ReferralService {}
    }
}

#[async_trait]
impl Service<ReferralRequest, ReferralRequestHandler> for ReferralService {}
