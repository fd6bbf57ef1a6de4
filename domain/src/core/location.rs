//! User location value object

use serde::{Deserialize, Serialize};

/// Coarse location of the user, resolved once per process.
///
/// Only used to fill defaults when a tool call omits a location or timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLocation {
    pub city: String,
    pub country: String,
    pub timezone: String,
}

impl UserLocation {
    pub fn new(
        city: impl Into<String>,
        country: impl Into<String>,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
            timezone: timezone.into(),
        }
    }

    /// Location used when geolocation is unavailable.
    pub fn fallback() -> Self {
        Self::new("London", "UK", "Europe/London")
    }

    /// `"<city>, <country>"`, the form weather lookups expect.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

impl Default for UserLocation {
    fn default() -> Self {
        Self::fallback()
    }
}
