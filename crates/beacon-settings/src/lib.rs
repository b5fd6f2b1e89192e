//! # beacon-settings
//!
//! Configuration for the beacon analytics tracker.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`AnalyticsSettings::default()`]
//! 2. **User file** — `~/.beacon/analytics.json` (deep-merged over defaults)
//! 3. **Environment variables** — `RUDDERSTACK_*` and `CIRCLE_JOB` (highest priority)
//!
//! The tracker only needs a write key and a collector URL; which key is used
//! depends on the deployment environment. See [`AnalyticsSettings::credentials`].

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    COLLECTOR_URL_VAR, ENVIRONMENT_FLAG_VAR, PLATFORM_VAR, PRODUCTION_JOB, PRODUCTION_KEY_VAR,
    STAGING_KEY_VAR, apply_env_overrides, apply_overrides_with, deep_merge, load_settings,
    load_settings_at, load_settings_from_path, load_settings_or_default, parse_environment,
    settings_path, settings_path_in,
};
pub use types::{AnalyticsSettings, Credentials, DEFAULT_PLATFORM, DeployEnvironment};
