use async_trait::async_trait;
use tokio::sync::oneshot;

use super::{RequestHandler, Service, ServiceError};
use crate::models::geo::GeoPoint;
use crate::repositories::geocoding::GeocodingRepository;

pub enum GeocodingRequest {
    Geocode {
        address: String,
        response: oneshot::Sender<Result<Option<GeoPoint>, ServiceError>>,
    },
}

#[derive(Clone)]
pub struct GeocodingRequestHandler {
    repository: GeocodingRepository,
}

impl GeocodingRequestHandler {
    pub fn new(url: String, user_agent: String) -> Self {
        let repository = GeocodingRepository::new(url, user_agent);

        GeocodingRequestHandler { repository }
    }

    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, ServiceError> {
        self.repository
            .geocode(address)
            .await
            .map_err(|e| ServiceError::Repository("Geocoding".to_string(), e.to_string()))
    }
}

#[async_trait]
impl RequestHandler<GeocodingRequest> for GeocodingRequestHandler {
    async fn handle_request(&self, request: GeocodingRequest) {
        match request {
            GeocodingRequest::Geocode { address, response } => {
                let point = self.geocode(&address).await;
                let _ = response.send(point);
            }
        }
    }
}

pub struct GeocodingService;

impl GeocodingService {
    pub fn new() -> Self {
        GeocodingService {}
    }
}

#[async_trait]
impl Service<GeocodingRequest, GeocodingRequestHandler> for GeocodingService {}
