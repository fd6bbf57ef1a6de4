//! IP geolocation, resolved at most once per process.
//!
//! Any failure (transport, timeout, non-`success` status) yields the
//! configured fallback location. Callers never see an error.

use std::time::Duration;

use concierge_domain::UserLocation;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json";
pub const DEFAULT_GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    timezone: String,
}

pub struct LocationResolver {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
    fallback: UserLocation,
    cell: OnceCell<UserLocation>,
}

impl LocationResolver {
    pub fn new(client: reqwest::Client, fallback: UserLocation) -> Self {
        Self {
            client,
            url: DEFAULT_GEOLOCATION_URL.to_string(),
            timeout: DEFAULT_GEOLOCATION_TIMEOUT,
            fallback,
            cell: OnceCell::new(),
        }
    }

    /// A resolver that never touches the network.
    pub fn fixed(location: UserLocation) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: String::new(),
            timeout: DEFAULT_GEOLOCATION_TIMEOUT,
            fallback: location.clone(),
            cell: OnceCell::new_with(Some(location)),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn resolve(&self) -> &UserLocation {
        self.cell.get_or_init(|| self.lookup()).await
    }

    async fn lookup(&self) -> UserLocation {
        match self.fetch().await {
            Ok(location) => {
                debug!(city = %location.city, timezone = %location.timezone, "Location resolved");
                location
            }
            Err(reason) => {
                warn!(%reason, "Geolocation failed, using fallback location");
                self.fallback.clone()
            }
        }
    }

    async fn fetch(&self) -> Result<UserLocation, String> {
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let geo: GeoResponse = response.json().await.map_err(|e| e.to_string())?;

        if geo.status != "success" {
            return Err(format!("status {:?}", geo.status));
        }

        let pick = |value: String, fallback: &str| {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value
            }
        };
        Ok(UserLocation::new(
            pick(geo.city, &self.fallback.city),
            pick(geo.country, &self.fallback.country),
            pick(geo.timezone, &self.fallback.timezone),
        ))
    }
}
