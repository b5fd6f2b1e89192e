//! Lifecycle-gated forwarding to the analytics client.
//!
//! The tracker moves through three states:
//!
//! 1. **Uninitialized**: every gated call is dropped.
//! 2. **Initialized**: the client signalled readiness. `identify` and `reset`
//!    are forwarded; `track` and page views are still dropped.
//! 3. **Identified**: everything is forwarded. `reset` returns to 2.
//!
//! Dropped calls never surface to the caller. They are counted in
//! [`TrackerStats`] and logged at debug level with a [`DropReason`], so a
//! misbehaving host can be diagnosed without analytics ever failing it.
//!
//! `initialized` is an atomic shared with the readiness callback, which may
//! run on any thread. Identity state sits behind a mutex that is held across
//! the client call, making check, forward and update a single step. Client
//! implementations therefore must not call back into the tracker from
//! `identify`, `page`, `track` or `reset`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use beacon_settings::{AnalyticsSettings, load_settings_or_default};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::AnalyticsClient;
use crate::events::{IdentifyTraits, TrackedEvent};

/// Why a call was not forwarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// The client has not signalled readiness.
    NotInitialized,
    /// No user has been identified since start or the last reset.
    NotIdentified,
    /// The page view repeats the last recorded page.
    DuplicatePage,
    /// The payload could not be turned into JSON.
    UnserializablePayload,
}

impl DropReason {
    /// Stable name used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotInitialized => "not_initialized",
            Self::NotIdentified => "not_identified",
            Self::DuplicatePage => "duplicate_page",
            Self::UnserializablePayload => "unserializable_payload",
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Operation {
    Identify,
    Page,
    Track,
    Reset,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Self::Identify => "identify",
            Self::Page => "page",
            Self::Track => "track",
            Self::Reset => "reset",
        }
    }
}

/// Snapshot of the tracker's forwarding counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackerStats {
    /// Calls handed to the client.
    pub forwarded: u64,
    /// Calls dropped before readiness.
    pub dropped_not_initialized: u64,
    /// Calls dropped for lack of an identified user.
    pub dropped_not_identified: u64,
    /// Page views dropped as repeats.
    pub dropped_duplicate_page: u64,
    /// Calls dropped because the payload failed to serialize.
    pub dropped_unserializable: u64,
}

impl TrackerStats {
    /// Total calls dropped for any reason.
    pub fn dropped(&self) -> u64 {
        self.dropped_not_initialized
            + self.dropped_not_identified
            + self.dropped_duplicate_page
            + self.dropped_unserializable
    }
}

#[derive(Default)]
struct Counters {
    forwarded: AtomicU64,
    not_initialized: AtomicU64,
    not_identified: AtomicU64,
    duplicate_page: AtomicU64,
    unserializable: AtomicU64,
}

impl Counters {
    fn dropped(&self, reason: DropReason) -> &AtomicU64 {
        match reason {
            DropReason::NotInitialized => &self.not_initialized,
            DropReason::NotIdentified => &self.not_identified,
            DropReason::DuplicatePage => &self.duplicate_page,
            DropReason::UnserializablePayload => &self.unserializable,
        }
    }

    fn snapshot(&self) -> TrackerStats {
        TrackerStats {
            forwarded: self.forwarded.load(Ordering::Relaxed),
            dropped_not_initialized: self.not_initialized.load(Ordering::Relaxed),
            dropped_not_identified: self.not_identified.load(Ordering::Relaxed),
            dropped_duplicate_page: self.duplicate_page.load(Ordering::Relaxed),
            dropped_unserializable: self.unserializable.load(Ordering::Relaxed),
        }
    }
}

#[derive(Default)]
struct Identity {
    identified: bool,
    last_page: String,
}

/// Gatekeeper between the application and its analytics client.
pub struct EventTracker {
    client: Box<dyn AnalyticsClient>,
    settings: AnalyticsSettings,
    initialized: Arc<AtomicBool>,
    loaded: AtomicBool,
    identity: Mutex<Identity>,
    counters: Counters,
}

impl std::fmt::Debug for EventTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let identity = self.identity.lock();
        f.debug_struct("EventTracker")
            .field("initialized", &self.is_initialized())
            .field("identified", &identity.identified)
            .field("last_page", &identity.last_page)
            .finish_non_exhaustive()
    }
}

impl EventTracker {
    /// Wrap `client`. Nothing is sent until [`initialize`](Self::initialize).
    pub fn new(client: impl AnalyticsClient + 'static, settings: AnalyticsSettings) -> Self {
        Self {
            client: Box::new(client),
            settings,
            initialized: Arc::new(AtomicBool::new(false)),
            loaded: AtomicBool::new(false),
            identity: Mutex::new(Identity::default()),
            counters: Counters::default(),
        }
    }

    /// Wrap `client` with settings from the settings file and environment.
    pub fn from_env(client: impl AnalyticsClient + 'static) -> Self {
        Self::new(client, load_settings_or_default())
    }

    /// Load the client and arm the readiness callback.
    ///
    /// Without both a write key for the active environment and a collector
    /// URL the tracker stays uninitialized for good. The client is loaded at
    /// most once; later calls are ignored.
    pub fn initialize(&self) {
        let Some(credentials) = self.settings.credentials() else {
            info!(
                environment = ?self.settings.environment,
                "analytics disabled: write key or collector URL not configured"
            );
            return;
        };
        if self.loaded.swap(true, Ordering::AcqRel) {
            debug!("analytics client already loaded, ignoring initialize");
            return;
        }

        self.client.load(&credentials.key, &credentials.collector_url);

        let initialized = Arc::clone(&self.initialized);
        self.client.ready(Box::new(move || {
            if !initialized.swap(true, Ordering::AcqRel) {
                info!("analytics client ready");
            }
        }));
    }

    /// Identify `user_id` and attach `traits`.
    ///
    /// Dropped until the client is ready. Repeated calls re-identify.
    pub fn identify(&self, user_id: &str, traits: &IdentifyTraits) {
        if !self.is_initialized() {
            self.dropped(Operation::Identify, DropReason::NotInitialized);
            return;
        }
        let Some(traits) = self.to_value(Operation::Identify, traits) else {
            return;
        };

        let mut identity = self.identity.lock();
        self.client.identify(user_id, &traits);
        identity.identified = true;
        self.forwarded(Operation::Identify);
    }

    /// Record a page view on the configured default platform.
    pub fn record_page_view(&self, page: &str) {
        self.record_page_view_on(page, &self.settings.default_platform);
    }

    /// Record a page view of `page` on `platform`.
    ///
    /// Requires an identified user. A page equal to the last recorded one is
    /// dropped, so repeated renders of the same page count once.
    pub fn record_page_view_on(&self, page: &str, platform: &str) {
        if !self.is_initialized() {
            self.dropped(Operation::Page, DropReason::NotInitialized);
            return;
        }

        let mut identity = self.identity.lock();
        if !identity.identified {
            self.dropped(Operation::Page, DropReason::NotIdentified);
            return;
        }
        if identity.last_page == page {
            self.dropped(Operation::Page, DropReason::DuplicatePage);
            return;
        }

        self.client.page(platform, page);
        page.clone_into(&mut identity.last_page);
        self.forwarded(Operation::Page);
    }

    /// Forget the identified user.
    ///
    /// The last recorded page is kept, so returning to it after a new
    /// identify is still treated as a repeat.
    pub fn reset(&self) {
        if !self.is_initialized() {
            self.dropped(Operation::Reset, DropReason::NotInitialized);
            return;
        }

        let mut identity = self.identity.lock();
        self.client.reset();
        identity.identified = false;
        self.forwarded(Operation::Reset);
    }

    /// Send `event` under its name. Requires an identified user.
    pub fn track<E: TrackedEvent>(&self, event: &E) {
        if !self.is_initialized() {
            self.dropped(Operation::Track, DropReason::NotInitialized);
            return;
        }

        let identity = self.identity.lock();
        if !identity.identified {
            self.dropped(Operation::Track, DropReason::NotIdentified);
            return;
        }
        let Some(properties) = self.to_value(Operation::Track, event) else {
            return;
        };

        self.client.track(E::NAME, &properties);
        self.forwarded(Operation::Track);
    }

    /// Anonymous ID from the client, regardless of lifecycle state.
    pub fn anonymous_id(&self) -> Option<String> {
        self.client.anonymous_id()
    }

    /// User ID from the client, regardless of lifecycle state.
    pub fn user_id(&self) -> Option<String> {
        self.client.user_id()
    }

    /// Whether the client signalled readiness.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Whether a user is currently identified.
    pub fn is_identified(&self) -> bool {
        self.identity.lock().identified
    }

    /// Last page view forwarded to the client; empty before the first.
    pub fn last_page(&self) -> String {
        self.identity.lock().last_page.clone()
    }

    /// Forwarding counters since construction.
    pub fn stats(&self) -> TrackerStats {
        self.counters.snapshot()
    }

    /// Settings the tracker was built with.
    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    fn to_value<T: Serialize>(&self, op: Operation, payload: &T) -> Option<Value> {
        match serde_json::to_value(payload) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(operation = op.as_str(), error = %e, "failed to serialize analytics payload");
                self.dropped(op, DropReason::UnserializablePayload);
                None
            }
        }
    }

    fn forwarded(&self, op: Operation) {
        let _ = self.counters.forwarded.fetch_add(1, Ordering::Relaxed);
        debug!(operation = op.as_str(), "analytics call forwarded");
    }

    fn dropped(&self, op: Operation, reason: DropReason) {
        let _ = self.counters.dropped(reason).fetch_add(1, Ordering::Relaxed);
        debug!(
            operation = op.as_str(),
            reason = reason.as_str(),
            "analytics call dropped"
        );
    }
}
