//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`AnalyticsSettings::default()`]
//! 2. If `~/.beacon/analytics.json` exists, deep-merge user values over defaults.
//!    Without a home directory this layer is skipped.
//! 3. Apply environment variable overrides (highest priority)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::{AnalyticsSettings, DeployEnvironment};

/// Write key used when running in production.
pub const PRODUCTION_KEY_VAR: &str = "RUDDERSTACK_PRODUCTION_KEY";
/// Write key used everywhere else.
pub const STAGING_KEY_VAR: &str = "RUDDERSTACK_STAGING_KEY";
/// Collector URL shared by both environments.
pub const COLLECTOR_URL_VAR: &str = "RUDDERSTACK_URL";
/// CI job name; selects the production key when it equals [`PRODUCTION_JOB`].
pub const ENVIRONMENT_FLAG_VAR: &str = "CIRCLE_JOB";
/// Overrides the default page-view platform label.
pub const PLATFORM_VAR: &str = "BEACON_PLATFORM";
/// Value of [`ENVIRONMENT_FLAG_VAR`] that marks a production build.
pub const PRODUCTION_JOB: &str = "release_production";

/// Resolve the path to the settings file (`~/.beacon/analytics.json`).
///
/// `None` when `HOME` is unset or empty.
pub fn settings_path() -> Option<PathBuf> {
    settings_path_in(std::env::var("HOME").ok())
}

/// Settings file location under `home`. An empty home counts as missing.
pub fn settings_path_in(home: Option<String>) -> Option<PathBuf> {
    let home = home.filter(|h| !h.is_empty())?;
    Some(PathBuf::from(home).join(".beacon").join("analytics.json"))
}

/// Load settings from the default path with env var overrides.
///
/// Without a home directory only defaults and env overrides apply.
pub fn load_settings() -> Result<AnalyticsSettings> {
    load_settings_at(settings_path().as_deref())
}

/// Load settings from `path` if given, otherwise from defaults alone, then
/// apply env var overrides.
pub fn load_settings_at(path: Option<&Path>) -> Result<AnalyticsSettings> {
    match path {
        Some(path) => load_settings_from_path(path),
        None => {
            debug!("no home directory, skipping settings file");
            let mut settings = AnalyticsSettings::default();
            apply_env_overrides(&mut settings);
            Ok(settings)
        }
    }
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults. Invalid JSON, or a file whose root is
/// not an object, is an error.
pub fn load_settings_from_path(path: &Path) -> Result<AnalyticsSettings> {
    let mut settings = read_settings_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Load settings, falling back to defaults (plus env overrides) on error.
///
/// Analytics must never stop the host application from starting, so a
/// broken settings file is logged and ignored.
pub fn load_settings_or_default() -> AnalyticsSettings {
    match load_settings() {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load analytics settings, using defaults");
            let mut settings = AnalyticsSettings::default();
            apply_env_overrides(&mut settings);
            settings
        }
    }
}

fn read_settings_file(path: &Path) -> Result<AnalyticsSettings> {
    let defaults = serde_json::to_value(AnalyticsSettings::default())?;
    if !path.exists() {
        debug!(?path, "settings file not found, using defaults");
        return Ok(serde_json::from_value(defaults)?);
    }

    debug!(?path, "loading settings from file");
    let content = std::fs::read_to_string(path)?;
    let user: Value = serde_json::from_str(&content)?;
    if !user.is_object() {
        return Err(SettingsError::InvalidValue(format!(
            "{} must contain a JSON object",
            path.display()
        )));
    }
    Ok(serde_json::from_value(deep_merge(defaults, user))?)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = match target_map.remove(&key) {
                    Some(target_val) => deep_merge(target_val, source_val),
                    None => source_val,
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(settings: &mut AnalyticsSettings) {
    apply_overrides_with(settings, |name| std::env::var(name).ok());
}

/// Apply overrides using an arbitrary variable lookup.
///
/// Empty values are treated as unset. The environment flag, when present,
/// always decides the environment: any job other than [`PRODUCTION_JOB`]
/// means staging.
pub fn apply_overrides_with<F>(settings: &mut AnalyticsSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(v) = read(PRODUCTION_KEY_VAR) {
        settings.production_key = Some(v);
    }
    if let Some(v) = read(STAGING_KEY_VAR) {
        settings.staging_key = Some(v);
    }
    if let Some(v) = read(COLLECTOR_URL_VAR) {
        settings.collector_url = Some(v);
    }
    if let Some(v) = read(PLATFORM_VAR) {
        settings.default_platform = v;
    }
    if let Some(job) = read(ENVIRONMENT_FLAG_VAR) {
        settings.environment = parse_environment(&job);
        debug!(job = %job, environment = ?settings.environment, "environment from CI job");
    }
}

/// Map a CI job name to a deployment environment.
pub fn parse_environment(job: &str) -> DeployEnvironment {
    if job == PRODUCTION_JOB {
        DeployEnvironment::Production
    } else {
        DeployEnvironment::Staging
    }
}
