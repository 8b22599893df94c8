use async_trait::async_trait;
use futures_util::TryFutureExt;
use sqlx::PgPool;
use tokio::sync::{mpsc, oneshot};

use super::users::{self, UserRequest};
use super::{verification, RequestHandler, Service, ServiceError};
use crate::models::marketplace;
use crate::models::money::Money;
use crate::models::verification::VerificationAction;
use crate::pricing::{self, rates};
use crate::repositories::marketplace::MarketplaceRepository;
use crate::repositories::processor::ProcessorApi;

pub enum MarketplaceRequest {
    HireContractor {
        employer_id: String,
        contractor_id: String,
        amount: Money,
        response: oneshot::Sender<Result<marketplace::Hire, ServiceError>>,
    },
    SendProposal {
        sender_id: String,
        recipient_id: String,
        event_id: String,
        response: oneshot::Sender<Result<marketplace::Proposal, ServiceError>>,
    },
    ApplyToJob {
        contractor_id: String,
        job_id: String,
        response: oneshot::Sender<Result<marketplace::Application, ServiceError>>,
    },
    InviteExternalVendor {
        inviter_id: String,
        email: String,
        response: oneshot::Sender<Result<marketplace::ExternalInvite, ServiceError>>,
    },
}

#[derive(Clone)]
pub struct MarketplaceRequestHandler {
    repository: MarketplaceRepository,
    processor: ProcessorApi,
    user_channel: mpsc::Sender<UserRequest>,
}

impl MarketplaceRequestHandler {
    pub fn new(
        sql_conn: PgPool,
        processor: ProcessorApi,
        user_channel: mpsc::Sender<UserRequest>,
    ) -> Self {
        let repository = MarketplaceRepository::new(sql_conn);

        MarketplaceRequestHandler {
            repository,
            processor,
            user_channel,
        }
    }

    async fn hire_contractor(
        &self,
        employer_id: String,
        contractor_id: String,
        amount: Money,
    ) -> Result<marketplace::Hire, ServiceError> {
        let employer = users::fetch_user(&self.user_channel, "Marketplace", &employer_id).await?;
        verification::check(&employer, VerificationAction::HireContractor)?;

        if amount.is_negative() {
            return Err(ServiceError::Validation(
                "Hire amount must not be negative.".to_string(),
            ));
        }

        let processing_fee =
            pricing::processing_fee(amount).map_err(|e| ServiceError::Validation(e.to_string()))?;

        let hire = self
            .repository
            .insert_hire(&employer_id, &contractor_id, amount, processing_fee)
            .await
            .map_err(|e| ServiceError::Repository("Marketplace".to_string(), e.to_string()))?;

        self.processor
            .charge(amount, processing_fee, "contractor hire")
            .map_err(|e| {
                ServiceError::ExternalService(
                    "MarketplaceService".to_string(),
                    "Processor".to_string(),
                    e.to_string(),
                )
            })
            .await?;

        self.repository
            .update_hire_status(&hire.id, "charged")
            .await
            .map_err(|e| ServiceError::Repository("Marketplace".to_string(), e.to_string()))
    }

    async fn send_proposal(
        &self,
        sender_id: String,
        recipient_id: String,
        event_id: String,
    ) -> Result<marketplace::Proposal, ServiceError> {
        let sender = users::fetch_user(&self.user_channel, "Marketplace", &sender_id).await?;
        verification::check(&sender, VerificationAction::SendProposal)?;

        // Internal proposals are paid for in credits, not cash.
        users::spend_credits(
            &self.user_channel,
            "Marketplace",
            &sender_id,
            rates::PROPOSAL_CREDIT_COST,
        )
        .await?;

        self.repository
            .insert_proposal(
                &sender_id,
                &recipient_id,
                &event_id,
                rates::PROPOSAL_CREDIT_COST,
            )
            .await
            .map_err(|e| ServiceError::Repository("Marketplace".to_string(), e.to_string()))
    }

    async fn apply_to_job(
        &self,
        contractor_id: String,
        job_id: String,
    ) -> Result<marketplace::Application, ServiceError> {
        let contractor =
            users::fetch_user(&self.user_channel, "Marketplace", &contractor_id).await?;
        verification::check(&contractor, VerificationAction::ApplyToJob)?;

        self.repository
            .insert_application(&job_id, &contractor_id)
            .await
            .map_err(|e| ServiceError::Repository("Marketplace".to_string(), e.to_string()))
    }

    async fn invite_external_vendor(
        &self,
        inviter_id: String,
        email: String,
    ) -> Result<marketplace::ExternalInvite, ServiceError> {
        let fee = pricing::external_invite_fee();

        self.processor
            .charge(fee, Money::ZERO, "external vendor invite")
            .map_err(|e| {
                ServiceError::ExternalService(
                    "MarketplaceService".to_string(),
                    "Processor".to_string(),
                    e.to_string(),
                )
            })
            .await?;

        self.repository
            .insert_external_invite(&inviter_id, &email, fee)
            .await
            .map_err(|e| ServiceError::Repository("Marketplace".to_string(), e.to_string()))
    }
}

#[async_trait]
impl RequestHandler<MarketplaceRequest> for MarketplaceRequestHandler {
    async fn handle_request(&self, request: MarketplaceRequest) {
        match request {
            MarketplaceRequest::HireContractor {
                employer_id,
                contractor_id,
                amount,
                response,
            } => {
                let hire = self
                    .hire_contractor(employer_id, contractor_id, amount)
                    .await;
                let _ = response.send(hire);
            }
            MarketplaceRequest::SendProposal {
                sender_id,
                recipient_id,
                event_id,
                response,
            } => {
                let proposal = self.send_proposal(sender_id, recipient_id, event_id).await;
                let _ = response.send(proposal);
            }
            MarketplaceRequest::ApplyToJob {
                contractor_id,
                job_id,
                response,
            } => {
                let application = self.apply_to_job(contractor_id, job_id).await;
                let _ = response.send(application);
            }
            MarketplaceRequest::InviteExternalVendor {
                inviter_id,
                email,
                response,
            } => {
                let invite = self.invite_external_vendor(inviter_id, email).await;
                let _ = response.send(invite);
            }
        }
    }
}

pub struct MarketplaceService;

impl MarketplaceService {
    pub fn new() -> Self {
        MarketplaceService {}
    }
}

#[async_trait]
impl Service<MarketplaceRequest, MarketplaceRequestHandler> for MarketplaceService {}
