use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name under which a single-endpoint config is exposed as a profile.
pub const DEFAULT_PROFILE: &str = "default";

/// Top-level configuration.
/// Either a single endpoint or several named profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GqlshConfig {
    /// Named endpoint profiles
    Profiles {
        profiles: BTreeMap<String, EndpointConfig>,
        /// Profile used when none is requested
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },
    /// A single endpoint
    Single(EndpointConfig),
}

impl GqlshConfig {
    /// All profiles by name. A single-endpoint config yields one profile
    /// named [`DEFAULT_PROFILE`].
    #[must_use]
    pub fn profiles(&self) -> Box<dyn Iterator<Item = (&str, &EndpointConfig)> + '_> {
        match self {
            Self::Single(endpoint) => Box::new(std::iter::once((DEFAULT_PROFILE, endpoint))),
            Self::Profiles { profiles, .. } => Box::new(
                profiles
                    .iter()
                    .map(|(name, endpoint)| (name.as_str(), endpoint)),
            ),
        }
    }

    #[must_use]
    pub fn profile_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Profiles { profiles, .. } => profiles.len(),
        }
    }

    #[must_use]
    pub const fn has_profiles(&self) -> bool {
        matches!(self, Self::Profiles { .. })
    }

    /// Selects the endpoint for `name`, or the default endpoint when `name` is `None`.
    ///
    /// Without a name, a profiles config uses its `default` key, then a
    /// profile literally named `default`, then its only profile.
    ///
    /// # Errors
    ///
    /// Fails when the named profile does not exist, or when no name was given
    /// and the default cannot be determined.
    pub fn endpoint(&self, name: Option<&str>) -> Result<&EndpointConfig> {
        match (self, name) {
            (Self::Single(endpoint), None) => Ok(endpoint),
            (Self::Single(endpoint), Some(name)) if name == DEFAULT_PROFILE => Ok(endpoint),
            (Self::Profiles { profiles, .. }, Some(name)) => {
                profiles.get(name).ok_or_else(|| self.not_found(name))
            }
            (Self::Profiles { profiles, default }, None) => {
                if let Some(default) = default {
                    return profiles.get(default).ok_or_else(|| self.not_found(default));
                }
                if let Some(endpoint) = profiles.get(DEFAULT_PROFILE) {
                    return Ok(endpoint);
                }
                match profiles.values().next() {
                    Some(endpoint) if profiles.len() == 1 => Ok(endpoint),
                    _ => Err(ConfigError::NoDefaultProfile {
                        available: self.available(),
                    }),
                }
            }
            (Self::Single(_), Some(name)) => Err(self.not_found(name)),
        }
    }

    fn available(&self) -> String {
        self.profiles()
            .map(|(name, _)| name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn not_found(&self, name: &str) -> ConfigError {
        ConfigError::ProfileNotFound {
            name: name.to_string(),
            available: self.available(),
        }
    }
}

/// Connection settings for one GraphQL endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfig {
    /// The GraphQL endpoint URL
    pub url: String,

    /// HTTP headers sent with every request (e.g., for authentication)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// Request timeout in seconds (default: 30)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl EndpointConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            timeout: None,
        }
    }
}
