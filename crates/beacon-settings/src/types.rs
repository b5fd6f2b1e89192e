//! Analytics settings types.
//!
//! All structs use `#[serde(rename_all = "camelCase", default)]` so a
//! partial settings file deserializes cleanly over the compiled defaults.

use serde::{Deserialize, Serialize};

/// Platform label attached to page views when the caller gives none.
pub const DEFAULT_PLATFORM: &str = "Deriv App";

/// Deployment environment that selects which write key is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployEnvironment {
    /// Release build talking to the production workspace.
    Production,
    /// Local and staging builds.
    #[default]
    Staging,
}

/// Settings consumed by the tracker at initialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsSettings {
    /// Write key for the production workspace.
    pub production_key: Option<String>,
    /// Write key for the staging workspace.
    pub staging_key: Option<String>,
    /// Collector (data plane) URL shared by both environments.
    pub collector_url: Option<String>,
    /// Which environment this process runs in.
    pub environment: DeployEnvironment,
    /// Platform label used by page views that do not name one.
    pub default_platform: String,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            production_key: None,
            staging_key: None,
            collector_url: None,
            environment: DeployEnvironment::default(),
            default_platform: DEFAULT_PLATFORM.to_string(),
        }
    }
}

/// A key/URL pair ready to hand to the client's `load`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    /// Write key for the active environment.
    pub key: String,
    /// Collector URL.
    pub collector_url: String,
}

impl AnalyticsSettings {
    /// Write key for the active environment, if set and non-empty.
    pub fn active_key(&self) -> Option<&str> {
        let key = match self.environment {
            DeployEnvironment::Production => self.production_key.as_deref(),
            DeployEnvironment::Staging => self.staging_key.as_deref(),
        };
        key.filter(|k| !k.is_empty())
    }

    /// Resolve the credentials for the active environment.
    ///
    /// Returns `None` when either the key or the collector URL is missing.
    pub fn credentials(&self) -> Option<Credentials> {
        let key = self.active_key()?;
        let url = self.collector_url.as_deref().filter(|u| !u.is_empty())?;
        Some(Credentials {
            key: key.to_string(),
            collector_url: url.to_string(),
        })
    }
}
