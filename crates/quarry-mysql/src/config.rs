//! Adapter configuration.

use quarry_core::DataError;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::timezone::ServerTimezone;

/// Errors from reading adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A timezone that is neither a zone name, `UTC`, `Z` nor `±hh[:mm]`.
    #[error("invalid timezone '{0}', expected a zone name such as Europe/Madrid, UTC or +hh:mm")]
    InvalidTimezone(String),
}

impl From<ConfigError> for DataError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Adapter settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Timezone the server stores naive datetimes in.
    ///
    /// Outgoing datetimes are converted to it and incoming ones are read in
    /// it. When unset, outgoing datetimes keep their own offset and incoming
    /// ones are read as UTC.
    #[serde(deserialize_with = "deserialize_timezone")]
    pub server_timezone: Option<ServerTimezone>,
}

impl AdapterConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            server_timezone: None,
        }
    }

    /// Sets the server timezone.
    #[must_use]
    pub fn server_timezone(mut self, timezone: impl Into<ServerTimezone>) -> Self {
        self.server_timezone = Some(timezone.into());
        self
    }

    /// Sets the server timezone from its text form.
    ///
    /// # Errors
    ///
    /// Returns an error if `timezone` is not a zone name or offset.
    pub fn server_timezone_str(self, timezone: &str) -> Result<Self, ConfigError> {
        Ok(self.server_timezone(timezone.parse::<ServerTimezone>()?))
    }
}

fn deserialize_timezone<'de, D>(deserializer: D) -> Result<Option<ServerTimezone>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|text| text.parse().map_err(serde::de::Error::custom))
        .transpose()
}
