//! Signup flow payloads.

use serde::{Deserialize, Serialize};

/// How the user signed up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignupProvider {
    /// Email and password.
    Email,
    /// Phone number.
    Phone,
    /// Google account.
    Google,
    /// Facebook account.
    Facebook,
    /// Apple ID.
    Apple,
}

/// Steps of the virtual (demo) account signup form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VirtualSignupAction {
    /// Form shown.
    Open,
    /// User started filling the form.
    Started,
    /// Confirmation email sent.
    EmailConfirmationSent,
    /// Email address confirmed.
    EmailConfirmed,
    /// User continued past the first screen.
    SignupContinued,
    /// Country selection screen shown.
    CountrySelectionScreenOpened,
    /// Password screen shown.
    PasswordScreenOpened,
    /// Signup completed.
    SignupDone,
    /// Signup failed.
    SignupFlowError,
    /// User switched to login.
    GoToLogin,
}

/// Payload for `ce_virtual_signup_form`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualSignupForm {
    /// Form step.
    pub action: VirtualSignupAction,
    /// Signup provider chosen by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signup_provider: Option<SignupProvider>,
    /// Where the form was opened from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_source: Option<String>,
    /// Form identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_name: Option<String>,
    /// Error shown to the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Email entered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Application ID of the embedding app.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

impl VirtualSignupForm {
    /// Payload with only the action set.
    pub fn new(action: VirtualSignupAction) -> Self {
        Self {
            action,
            signup_provider: None,
            form_source: None,
            form_name: None,
            error_message: None,
            email: None,
            app_id: None,
        }
    }
}

/// Steps of the real account signup wizard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RealAccountSignupAction {
    /// Wizard shown.
    Open,
    /// A step was completed.
    StepPassed,
    /// Progress saved.
    Save,
    /// Saved progress restored.
    Restore,
    /// Wizard closed.
    Close,
    /// Account creation rejected.
    RealSignupError,
    /// Any other failure.
    OtherError,
    /// Account created.
    RealSignupFinished,
}

/// Payload for `ce_real_account_signup_form`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealAccountSignupForm {
    /// Wizard step.
    pub action: RealAccountSignupAction,
    /// Landing company the account is opened under.
    pub landing_company: String,
    /// Codename of the current step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_codename: Option<String>,
    /// 1-based step number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_num: Option<u32>,
    /// Option picked by the user on this step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_choice: Option<String>,
    /// Where the wizard was opened from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Form identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_name: Option<String>,
    /// Error returned by account creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_signup_error_message: Option<String>,
}

impl RealAccountSignupForm {
    /// Payload with the required fields set.
    pub fn new(action: RealAccountSignupAction, landing_company: impl Into<String>) -> Self {
        Self {
            action,
            landing_company: landing_company.into(),
            step_codename: None,
            step_num: None,
            user_choice: None,
            source: None,
            form_name: None,
            real_signup_error_message: None,
        }
    }
}

/// Outcome of the signup confirmation email.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VirtualSignupEmailConfirmationAction {
    /// Email link opened.
    Received,
    /// Link expired.
    Expired,
    /// Address confirmed.
    Confirmed,
    /// Confirmation failed.
    Error,
}

/// Payload for `ce_virtual_signup_email_confirmation`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualSignupEmailConfirmation {
    /// Confirmation outcome.
    pub action: VirtualSignupEmailConfirmationAction,
    /// Signup provider chosen by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signup_provider: Option<SignupProvider>,
    /// Where the signup started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_source: Option<String>,
    /// MD5 of the confirmed address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_md5: Option<String>,
    /// Error shown to the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl VirtualSignupEmailConfirmation {
    /// Payload with only the action set.
    pub fn new(action: VirtualSignupEmailConfirmationAction) -> Self {
        Self {
            action,
            signup_provider: None,
            form_source: None,
            email_md5: None,
            error_message: None,
        }
    }
}
