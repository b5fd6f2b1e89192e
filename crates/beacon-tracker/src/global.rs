//! The process-wide tracker.
//!
//! The host builds exactly one [`EventTracker`] in its composition root and
//! installs it here; code that cannot have the tracker passed in reaches it
//! through [`instance`]. Installing is explicit so the single-instance rule
//! is visible at startup instead of hidden in a lazy static.

use std::sync::OnceLock;

use crate::client::AnalyticsClient;
use crate::errors::{Result, TrackerError};
use crate::tracker::EventTracker;

static TRACKER: OnceLock<EventTracker> = OnceLock::new();

/// Install `tracker` as the process-wide instance.
///
/// Fails if one is already installed; the existing instance is kept and
/// `tracker` is dropped.
pub fn install(tracker: EventTracker) -> Result<&'static EventTracker> {
    let mut installed_now = false;
    let current = TRACKER.get_or_init(|| {
        installed_now = true;
        tracker
    });
    if installed_now {
        Ok(current)
    } else {
        Err(TrackerError::AlreadyInstalled)
    }
}

/// Build a tracker from the environment, install it, then initialize it.
pub fn install_from_env(client: impl AnalyticsClient + 'static) -> Result<&'static EventTracker> {
    let tracker = install(EventTracker::from_env(client))?;
    tracker.initialize();
    Ok(tracker)
}

/// The installed tracker, or `None` before [`install`].
pub fn instance() -> Option<&'static EventTracker> {
    TRACKER.get()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use beacon_settings::AnalyticsSettings;

    use super::*;
    use crate::client::LogClient;

    // The static is shared by every test in this binary, so the whole
    // install lifecycle lives in one test.
    #[test]
    fn install_once_then_reuse() {
        assert!(instance().is_none());

        let first = install(EventTracker::new(
            LogClient::with_anonymous_id("anon-1"),
            AnalyticsSettings::default(),
        ))
        .unwrap();
        assert_eq!(first.anonymous_id().as_deref(), Some("anon-1"));

        let second = install(EventTracker::new(
            LogClient::with_anonymous_id("anon-2"),
            AnalyticsSettings::default(),
        ));
        assert_matches!(second, Err(TrackerError::AlreadyInstalled));

        let again = install_from_env(LogClient::new());
        assert_matches!(again, Err(TrackerError::AlreadyInstalled));

        let a = instance().unwrap();
        let b = instance().unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(std::ptr::eq(a, first));
        assert_eq!(a.anonymous_id().as_deref(), Some("anon-1"));
    }
}
