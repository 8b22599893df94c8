use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::mpsc;

use crate::models::verification::UserType;
use crate::repositories::processor::ProcessorApi;
use crate::settings::Settings;

pub mod geocoding;
pub mod http;
pub mod marketplace;
pub mod payments;
pub mod referrals;
pub mod users;
pub mod verification;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Repository error: {0} - {1}")]
    Repository(String, String),
    #[error("Communication error: {0} - {1}")]
    Communication(String, String),
    #[error("External service error: {0} -> {1} => {2}")]
    ExternalService(String, String, String),
    #[error("Validation error: {0}")]
    Validation(String),
    // The Display form keeps the legacy tag so log lines and string-only
    // channels stay recognisable; the HTTP layer sends structured fields.
    #[error("VERIFICATION_REQUIRED: {explanation}")]
    VerificationRequired {
        explanation: String,
        required_role: Option<UserType>,
    },
}

#[async_trait]
pub trait RequestHandler<T>: Send + Sync + 'static
where
    T: Send + 'static,
{
    async fn handle_request(&self, request: T);
}

#[async_trait]
pub trait Service<T, H>: Send + Sync + 'static
where
    T: Send + 'static,
    H: RequestHandler<T> + Clone + Send,
{
    async fn run(&mut self, handler: H, receiver: &mut mpsc::Receiver<T>) {
        while let Some(request) = receiver.recv().await {
            let handler = handler.clone();

            tokio::spawn(async move {
                handler.handle_request(request).await;
            });
        }
    }
}

pub async fn start_services(pool: PgPool, settings: Settings) -> Result<(), anyhow::Error> {
    let (user_tx, mut user_rx) = mpsc::channel(512);
    let (payment_tx, mut payment_rx) = mpsc::channel(512);
    let (marketplace_tx, mut marketplace_rx) = mpsc::channel(512);
    let (referral_tx, mut referral_rx) = mpsc::channel(512);
    let (geocoding_tx, mut geocoding_rx) = mpsc::channel(512);

    let mut user_service = users::UserService::new();
    let mut payment_service = payments::PaymentService::new();
    let mut marketplace_service = marketplace::MarketplaceService::new();
    let mut referral_service = referrals::ReferralService::new();
    let mut geocoding_service = geocoding::GeocodingService::new();

    let processor = ProcessorApi::new(settings.processor.auth_token, settings.processor.url);

    log::info!("Starting user service.");
    let user_pool = pool.clone();
    let user_referral_tx = referral_tx.clone();
    tokio::spawn(async move {
        user_service
            .run(
                users::UserRequestHandler::new(user_pool, user_referral_tx),
                &mut user_rx,
            )
            .await;
    });

    log::info!("Starting payment service.");
    let payment_pool = pool.clone();
    let payment_processor = processor.clone();
    let payment_user_tx = user_tx.clone();
    tokio::spawn(async move {
        payment_service
            .run(
                payments::PaymentRequestHandler::new(
                    payment_pool,
                    payment_processor,
                    payment_user_tx,
                ),
                &mut payment_rx,
            )
            .await;
    });

    log::info!("Starting marketplace service.");
    let marketplace_pool = pool.clone();
    let marketplace_user_tx = user_tx.clone();
    tokio::spawn(async move {
        marketplace_service
            .run(
                marketplace::MarketplaceRequestHandler::new(
                    marketplace_pool,
                    processor,
                    marketplace_user_tx,
                ),
                &mut marketplace_rx,
            )
            .await;
    });

    log::info!("Starting referral service.");
    let referral_pool = pool.clone();
    tokio::spawn(async move {
        referral_service
            .run(
                referrals::ReferralRequestHandler::new(referral_pool),
                &mut referral_rx,
            )
            .await;
    });

    log::info!("Starting geocoding service.");
    let geocoder_url = settings.geocoder.url;
    let geocoder_user_agent = settings.geocoder.user_agent;
    tokio::spawn(async move {
        geocoding_service
            .run(
                geocoding::GeocodingRequestHandler::new(geocoder_url, geocoder_user_agent),
                &mut geocoding_rx,
            )
            .await;
    });

    log::info!("Starting HTTP server.");
    // Runs in the foreground and keeps the process alive.
    http::start_http_server(
        &settings.http,
        user_tx,
        payment_tx,
        marketplace_tx,
        referral_tx,
        geocoding_tx,
    )
    .await?;

    Ok(())
}
