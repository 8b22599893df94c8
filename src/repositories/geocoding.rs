use std::sync::Arc;

use anyhow::bail;
use dashmap::DashMap;

use crate::models::geo::GeoPoint;

/// Forward-geocodes event addresses against a Nominatim-style endpoint.
/// Results are cached for the process lifetime; venue addresses do not move.
#[derive(Clone)]
pub struct GeocodingRepository {
    url: String,
    user_agent: String,
    client: reqwest::Client,
    cache: Arc<DashMap<String, GeoPoint>>,
}

impl GeocodingRepository {
    pub fn new(url: String, user_agent: String) -> Self {
        Self {
            url,
            user_agent,
            client: reqwest::Client::new(),
            cache: Arc::new(DashMap::new()),
        }
    }

    pub async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, anyhow::Error> {
        let key = normalize(address);
        if let Some(point) = self.cache.get(&key) {
            return Ok(Some(*point));
        }

        let results: Vec<serde_json::Value> = self
            .client
            .get(format!("{}/search", self.url))
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .send()
            .await?
            .json()
            .await?;

        let Some(first) = results.first() else {
            return Ok(None);
        };

        let lat = first["lat"].as_str().and_then(|v| v.parse::<f64>().ok());
        let lon = first["lon"].as_str().and_then(|v| v.parse::<f64>().ok());

        match (lat, lon) {
            (Some(lat), Some(lon)) => {
                let point = GeoPoint { lat, lon };
                self.cache.insert(key, point);
                Ok(Some(point))
            }
            _ => bail!("Geocoder: Bad response format."),
        }
    }
}

fn normalize(address: &str) -> String {
    address.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace_and_case() {
        assert_eq!(
            normalize("  123  Main St,\tAustin  "),
            "123 main st, austin"
        );
    }
}
