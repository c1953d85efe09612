// Core types for credential classification and expected outcomes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path fragment present in the URL after a successful login
pub const INVENTORY_FRAGMENT: &str = "inventory";

/// Error fragment for wrong or unknown credentials
pub const MSG_MISMATCH: &str = "Username and password do not match";

/// Error fragment for the locked account
pub const MSG_LOCKED: &str = "this user has been locked out";

/// Error fragment when the username is missing
pub const MSG_USERNAME_REQUIRED: &str = "Username is required";

/// Error fragment when the password is missing
pub const MSG_PASSWORD_REQUIRED: &str = "Password is required";

/// A username/password pair as typed into the login form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Account category a credential pair falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountClass {
    Valid,
    UnknownUser,
    Locked,
    DegradedPerformance,
    CaseMismatched,
    EmptyUsername,
    EmptyPassword,
    EmptyBoth,
}

impl AccountClass {
    /// Every class, in classification precedence order
    pub const ALL: [AccountClass; 8] = [
        AccountClass::EmptyBoth,
        AccountClass::EmptyUsername,
        AccountClass::EmptyPassword,
        AccountClass::CaseMismatched,
        AccountClass::Locked,
        AccountClass::DegradedPerformance,
        AccountClass::Valid,
        AccountClass::UnknownUser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountClass::Valid => "valid",
            AccountClass::UnknownUser => "unknown_user",
            AccountClass::Locked => "locked",
            AccountClass::DegradedPerformance => "degraded_performance",
            AccountClass::CaseMismatched => "case_mismatched",
            AccountClass::EmptyUsername => "empty_username",
            AccountClass::EmptyPassword => "empty_password",
            AccountClass::EmptyBoth => "empty_both",
        }
    }
}

impl fmt::Display for AccountClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the filled form is submitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// Activate the submit control
    #[default]
    ButtonClick,
    /// Press Enter in the password field
    KeySubmit,
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionMode::ButtonClick => f.write_str("button_click"),
            InteractionMode::KeySubmit => f.write_str("key_submit"),
        }
    }
}

/// Observable result the page must show after submission
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "fragment", rename_all = "snake_case")]
pub enum ExpectedOutcome {
    /// The URL must contain this path fragment
    NavigatesTo(String),
    /// The error container must contain this text, and no navigation happens
    ShowsError(String),
}

impl fmt::Display for ExpectedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedOutcome::NavigatesTo(path) => write!(f, "navigates to '{}'", path),
            ExpectedOutcome::ShowsError(msg) => write!(f, "shows error '{}'", msg),
        }
    }
}

/// Static UI contract of the login form, independent of credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProperty {
    UsernameVisible,
    PasswordVisible,
    /// The password input is `type="password"`
    PasswordObscured,
    /// The submit control has no `disabled` attribute
    SubmitEnabled,
}

impl fmt::Display for FieldProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldProperty::UsernameVisible => "username field visible",
            FieldProperty::PasswordVisible => "password field visible",
            FieldProperty::PasswordObscured => "password field obscured",
            FieldProperty::SubmitEnabled => "submit control enabled",
        };
        f.write_str(s)
    }
}
