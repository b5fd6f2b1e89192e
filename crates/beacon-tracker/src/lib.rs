//! # beacon-tracker
//!
//! A typed, lifecycle-gated front for a third-party analytics client.
//!
//! - **Client**: [`AnalyticsClient`] is the capability surface of the wrapped
//!   SDK; [`LogClient`] logs calls instead of sending them
//! - **Tracker**: [`EventTracker`] forwards identify, page and track calls
//!   only once the client is ready and a user is identified
//! - **Events**: [`events`] binds every event name to its payload type
//! - **Instance**: [`install`] and [`instance`] manage the one tracker per process
//!
//! Misuse is never an error: calls made out of order are dropped, counted in
//! [`TrackerStats`] and logged at debug level.
//!
//! ```no_run
//! use beacon_tracker::events::{IdentifyTraits, TradeTypesForm};
//! use beacon_tracker::{LogClient, install_from_env, instance};
//!
//! install_from_env(LogClient::new()).unwrap();
//!
//! let tracker = instance().unwrap();
//! tracker.identify("C123", &IdentifyTraits::new("en"));
//! tracker.track(&TradeTypesForm::open());
//! tracker.record_page_view("dashboard");
//! ```

#![deny(unsafe_code)]

pub mod client;
pub mod errors;
pub mod events;
pub mod global;
pub mod tracker;

pub use client::{AnalyticsClient, LogClient, ReadyCallback};
pub use errors::{Result, TrackerError};
pub use events::{IdentifyTraits, TrackedEvent};
pub use global::{install, install_from_env, instance};
pub use tracker::{DropReason, EventTracker, TrackerStats};
