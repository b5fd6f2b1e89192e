//! Typed payloads for every event the tracker can send.
//!
//! Each payload type is bound to exactly one event name through
//! [`TrackedEvent::NAME`], so passing the wrong payload for an event is a
//! compile error rather than a runtime check. Payloads serialize to JSON
//! objects with `snake_case` keys; unset optional fields are omitted.

pub mod signup;
pub mod trade_types;

use serde::{Deserialize, Serialize};

pub use signup::{
    RealAccountSignupAction, RealAccountSignupForm, SignupProvider, VirtualSignupAction,
    VirtualSignupEmailConfirmation, VirtualSignupEmailConfirmationAction, VirtualSignupForm,
};
pub use trade_types::{ChooseTradeType, TradeTypesForm, TradeTypesFormView};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::VirtualSignupForm {}
    impl Sealed for super::RealAccountSignupForm {}
    impl Sealed for super::VirtualSignupEmailConfirmation {}
    impl Sealed for super::TradeTypesForm {}
}

/// A payload that can be sent through [`EventTracker::track`](crate::EventTracker::track).
///
/// Sealed: the set of events is closed and only the payload types in this
/// module implement it.
pub trait TrackedEvent: Serialize + sealed::Sealed {
    /// Event name reported to the collector.
    const NAME: &'static str;
}

/// Traits attached to an identify call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifyTraits {
    /// UI language of the identified user.
    pub language: String,
}

impl IdentifyTraits {
    /// Traits for a user browsing in `language`.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

impl TrackedEvent for VirtualSignupForm {
    const NAME: &'static str = "ce_virtual_signup_form";
}

impl TrackedEvent for RealAccountSignupForm {
    const NAME: &'static str = "ce_real_account_signup_form";
}

impl TrackedEvent for VirtualSignupEmailConfirmation {
    const NAME: &'static str = "ce_virtual_signup_email_confirmation";
}

impl TrackedEvent for TradeTypesForm {
    const NAME: &'static str = "ce_trade_types_form";
}
