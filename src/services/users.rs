use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::{mpsc, oneshot};

use super::referrals::ReferralRequest;
use super::{RequestHandler, Service, ServiceError};
use crate::models::users;
use crate::repositories::users::UserRepository;

pub enum UserRequest {
    CreateUser {
        role: String,
        referral_code: Option<String>,
        response: oneshot::Sender<Result<users::User, ServiceError>>,
    },
    GetUser {
        id: String,
        response: oneshot::Sender<Result<Option<users::User>, ServiceError>>,
    },
    VerifyIdentity {
        id: String,
        response: oneshot::Sender<Result<(), ServiceError>>,
    },
    SubmitTaxForm {
        id: String,
        response: oneshot::Sender<Result<(), ServiceError>>,
    },
    SpendCredits {
        id: String,
        credits: i64,
        response: oneshot::Sender<Result<(), ServiceError>>,
    },
}

#[derive(Clone)]
pub struct UserRequestHandler {
    repository: UserRepository,
    referral_channel: mpsc::Sender<ReferralRequest>,
}

impl UserRequestHandler {
    pub fn new(sql_conn: PgPool, referral_channel: mpsc::Sender<ReferralRequest>) -> Self {
        let repository = UserRepository::new(sql_conn);

        UserRequestHandler {
            repository,
            referral_channel,
        }
    }

    async fn create_user(
        &self,
        role: String,
        referral_code: Option<String>,
    ) -> Result<users::User, ServiceError> {
        let user = self
            .repository
            .insert_user(&role, referral_code)
            .await
            .map_err(|e| ServiceError::Database(e.to_string()))?;

        // The signup reward is fire-and-forget. A failed award is logged by
        // the referral service and never blocks account creation.
        if let Some(referrer_id) = user.referred_by.clone() {
            let referral_channel = self.referral_channel.clone();
            let referred_user_id = user.id.clone();

            tokio::spawn(async move {
                let _ = referral_channel
                    .send(ReferralRequest::AwardSignup {
                        referrer_id,
                        referred_user_id,
                    })
                    .await;
            });
        }

        Ok(user)
    }

    async fn get_user(&self, id: &str) -> Result<Option<users::User>, ServiceError> {
        self.repository
            .get_user_by_id(id)
            .await
            .map_err(|e| ServiceError::Database(e.to_string()))
    }

    async fn verify_identity(&self, id: &str) -> Result<(), ServiceError> {
        self.repository
            .mark_identity_verified(id)
            .await
            .map_err(|e| ServiceError::Database(e.to_string()))
    }

    async fn submit_tax_form(&self, id: &str) -> Result<(), ServiceError> {
        self.repository
            .mark_tax_form_submitted(id)
            .await
            .map_err(|e| ServiceError::Database(e.to_string()))
    }

    async fn spend_credits(&self, id: &str, credits: i64) -> Result<(), ServiceError> {
        self.repository
            .spend_credits(id, credits)
            .await
            .map_err(|e| {
                if e.to_string() == "InsufficientCredits" {
                    ServiceError::Validation("Insufficient credits.".to_string())
                } else {
                    ServiceError::Database(e.to_string())
                }
            })
    }
}

#[async_trait]
impl RequestHandler<UserRequest> for UserRequestHandler {
    async fn handle_request(&self, request: UserRequest) {
        match request {
            UserRequest::CreateUser {
                role,
                referral_code,
                response,
            } => {
                let user = self.create_user(role, referral_code).await;
                let _ = response.send(user);
            }
            UserRequest::GetUser { id, response } => {
                let user = self.get_user(&id).await;
                let _ = response.send(user);
            }
            UserRequest::VerifyIdentity { id, response } => {
                let result = self.verify_identity(&id).await;
                let _ = response.send(result);
            }
            UserRequest::SubmitTaxForm { id, response } => {
                let result = self.submit_tax_form(&id).await;
                let _ = response.send(result);
            }
            UserRequest::SpendCredits {
                id,
                credits,
                response,
            } => {
                let result = self.spend_credits(&id, credits).await;
                let _ = response.send(result);
            }
        }
    }
}

pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        UserService {}
    }
}

#[async_trait]
impl Service<UserRequest, UserRequestHandler> for UserService {}

// Round-trips a GetUser request for services that gate on account state.
pub(crate) async fn fetch_user(
    channel: &mpsc::Sender<UserRequest>,
    service: &str,
    user_id: &str,
) -> Result<users::User, ServiceError> {
    let (user_tx, user_rx) = oneshot::channel();

    channel
        .send(UserRequest::GetUser {
            id: user_id.to_string(),
            response: user_tx,
        })
        .await
        .map_err(|e| ServiceError::Communication(format!("{} => Users", service), e.to_string()))?;

    let user = user_rx
        .await
        .map_err(|e| ServiceError::Communication(format!("Users => {}", service), e.to_string()))??;

    user.ok_or_else(|| ServiceError::Validation("User not found.".to_string()))
}

pub(crate) async fn spend_credits(
    channel: &mpsc::Sender<UserRequest>,
    service: &str,
    user_id: &str,
    credits: i64,
) -> Result<(), ServiceError> {
    let (credits_tx, credits_rx) = oneshot::channel();

    channel
        .send(UserRequest::SpendCredits {
            id: user_id.to_string(),
            credits,
            response: credits_tx,
        })
        .await
        .map_err(|e| ServiceError::Communication(format!("{} => Users", service), e.to_string()))?;

    credits_rx
        .await
        .map_err(|e| ServiceError::Communication(format!("Users => {}", service), e.to_string()))?
}
