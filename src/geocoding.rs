//! Address lookup against a Nominatim-compatible search endpoint.

use std::time::Duration;

use tracing::{debug, warn};

use crate::data::{Coordinate, NominatimPlace, NOMINATIM_SEARCH_URL};
use crate::error::{Error, Result};

pub const DEFAULT_USER_AGENT: &str = "CommunityAtlas/0.1";
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: reqwest::Client,
    endpoint: String,
    user_agent: String,
    delay: Duration,
}

impl Default for Geocoder {
    fn default() -> Self {
        Self::new(NOMINATIM_SEARCH_URL, DEFAULT_USER_AGENT, DEFAULT_DELAY)
    }
}

impl Geocoder {
    pub fn new(
        endpoint: impl Into<String>,
        user_agent: impl Into<String>,
        delay: Duration,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
            delay,
        }
    }

    pub fn request_url(&self, city: Option<&str>, country: &str) -> String {
        match city.map(str::trim).filter(|c| !c.is_empty()) {
            Some(city) => format!(
                "{}?city={}&country={}&format=json&limit=1",
                self.endpoint,
                urlencoding::encode(city),
                urlencoding::encode(country.trim())
            ),
            None => format!(
                "{}?q={}&format=json&limit=1",
                self.endpoint,
                urlencoding::encode(country.trim())
            ),
        }
    }

    /// Resolves a city/country pair. Network errors, bad statuses, malformed
    /// bodies and empty result sets all come back as `None`. Never retries.
    pub async fn resolve(&self, city: Option<&str>, country: &str) -> Option<Coordinate> {
        match self.lookup(city, country).await {
            Ok(coordinate) => Some(coordinate),
            Err(Error::NotFound(query)) => {
                debug!("Geocoding found nothing for {}", query);
                None
            }
            Err(e) => {
                warn!("Geocoding error: {}", e);
                None
            }
        }
    }

    /// Same request as `resolve`, keeping the failure reason.
    pub async fn lookup(&self, city: Option<&str>, country: &str) -> Result<Coordinate> {
        // Rate-limit courtesy delay.
        tokio::time::sleep(self.delay).await;

        let url = self.request_url(city, country);
        debug!("Geocoding {}", url);

        let places: Vec<NominatimPlace> = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let query = match city {
            Some(city) => format!("{}, {}", city, country),
            None => country.to_string(),
        };
        let place = places.first().ok_or_else(|| Error::NotFound(query.clone()))?;
        place.coordinate().ok_or_else(|| {
            Error::InvalidCoordinates(format!("{} -> {}, {}", query, place.lat, place.lon))
        })
    }
}
