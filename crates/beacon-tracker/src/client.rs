//! The analytics client capability the tracker forwards to.
//!
//! [`AnalyticsClient`] is the whole surface the tracker needs from an
//! analytics SDK. Transport, batching, retries and storage all live behind
//! it. Adapters for a concrete SDK implement this trait in the host.

use parking_lot::Mutex;
use serde_json::Value;
use tracing::info;

/// Callback the client invokes once it is ready to accept calls.
pub type ReadyCallback = Box<dyn FnOnce() + Send + 'static>;

/// Capability surface of a third-party analytics SDK.
///
/// Implementations may invoke the [`ready`](AnalyticsClient::ready) callback
/// synchronously or later from any thread. Failures inside the client are
/// the client's own business; the tracker does not observe them.
///
/// Implementations must not call back into the [`EventTracker`] that owns
/// them (its methods, accessors, `Debug` output, or the tracker returned by
/// [`instance`]) from inside `identify`, `page`, `track` or `reset`. The
/// tracker holds its identity lock for the duration of those calls and the
/// lock is not reentrant, so such a call deadlocks. The `ready` callback is
/// the exception: it only touches an atomic flag.
///
/// [`EventTracker`]: crate::EventTracker
/// [`instance`]: crate::instance
#[cfg_attr(test, mockall::automock)]
pub trait AnalyticsClient: Send + Sync {
    /// Start the SDK against `collector_url` with `write_key`.
    fn load(&self, write_key: &str, collector_url: &str);

    /// Register `callback` to run once the SDK finished loading.
    fn ready(&self, callback: ReadyCallback);

    /// Associate subsequent events with `user_id`.
    fn identify(&self, user_id: &str, traits: &Value);

    /// Record a page view of `name` on `category`.
    fn page(&self, category: &str, name: &str);

    /// Record a custom `event` with `properties`.
    fn track(&self, event: &str, properties: &Value);

    /// Forget the identified user.
    fn reset(&self);

    /// Identifier assigned before any identify call.
    fn anonymous_id(&self) -> Option<String>;

    /// Identifier set by the last identify call.
    fn user_id(&self) -> Option<String>;
}

/// Client that writes every call to the `tracing` log instead of a collector.
///
/// Signals readiness as soon as it is loaded. Useful in development builds
/// and wherever no SDK adapter is wired in.
#[derive(Debug, Default)]
pub struct LogClient {
    anonymous_id: Option<String>,
    user_id: Mutex<Option<String>>,
}

impl LogClient {
    /// A client without an anonymous ID.
    pub fn new() -> Self {
        Self::default()
    }

    /// A client reporting `anonymous_id` before identify.
    pub fn with_anonymous_id(anonymous_id: impl Into<String>) -> Self {
        Self {
            anonymous_id: Some(anonymous_id.into()),
            user_id: Mutex::new(None),
        }
    }
}

impl AnalyticsClient for LogClient {
    fn load(&self, _write_key: &str, collector_url: &str) {
        info!(collector_url, "log client loaded");
    }

    fn ready(&self, callback: ReadyCallback) {
        callback();
    }

    fn identify(&self, user_id: &str, traits: &Value) {
        info!(user_id, %traits, "identify");
        *self.user_id.lock() = Some(user_id.to_string());
    }

    fn page(&self, category: &str, name: &str) {
        info!(category, name, "page");
    }

    fn track(&self, event: &str, properties: &Value) {
        info!(event, %properties, "track");
    }

    fn reset(&self) {
        info!("reset");
        *self.user_id.lock() = None;
    }

    fn anonymous_id(&self) -> Option<String> {
        self.anonymous_id.clone()
    }

    fn user_id(&self) -> Option<String> {
        self.user_id.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use beacon_logging::capture_logs;
    use serde_json::json;
    use tracing::Level;

    use super::*;

    #[test]
    fn log_client_is_ready_immediately() {
        let client = LogClient::new();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        client.ready(Box::new(move || flag.store(true, Ordering::SeqCst)));
        assert!(fired.load(Ordering::SeqCst));
    }

    #[test]
    fn log_client_tracks_user_id() {
        let client = LogClient::with_anonymous_id("anon-1");
        assert_eq!(client.anonymous_id().as_deref(), Some("anon-1"));
        assert!(client.user_id().is_none());

        client.identify("C123", &json!({"language": "en"}));
        assert_eq!(client.user_id().as_deref(), Some("C123"));

        client.reset();
        assert!(client.user_id().is_none());
        assert_eq!(client.anonymous_id().as_deref(), Some("anon-1"));
    }

    #[test]
    fn log_client_logs_calls() {
        let (logs, _guard) = capture_logs();
        let client = LogClient::new();
        client.track("ce_trade_types_form", &json!({"action": "open"}));
        client.page("Deriv App", "dashboard");

        let tracked = logs.matching("track");
        assert_eq!(tracked.len(), 1);
        assert_eq!(tracked[0].field("event"), Some("ce_trade_types_form"));
        assert!(logs.has_event(Level::INFO, "page"));
    }
}
