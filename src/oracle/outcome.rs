use serde::{Deserialize, Serialize};
use std::fmt;

use super::classify::ReferenceCredentials;
use super::types::{
    AccountClass, Credential, ExpectedOutcome, InteractionMode, INVENTORY_FRAGMENT, MSG_LOCKED,
    MSG_MISMATCH, MSG_PASSWORD_REQUIRED, MSG_USERNAME_REQUIRED,
};

/// Ground-truth outcome for a classified credential.
///
/// Degraded-performance accounts render slowly but land on the same page as a
/// valid login. A missing username is reported before a missing password.
pub fn expected_outcome(class: AccountClass) -> ExpectedOutcome {
    match class {
        AccountClass::Valid | AccountClass::DegradedPerformance => {
            ExpectedOutcome::NavigatesTo(INVENTORY_FRAGMENT.to_string())
        }
        AccountClass::UnknownUser | AccountClass::CaseMismatched => {
            ExpectedOutcome::ShowsError(MSG_MISMATCH.to_string())
        }
        AccountClass::Locked => ExpectedOutcome::ShowsError(MSG_LOCKED.to_string()),
        AccountClass::EmptyUsername | AccountClass::EmptyBoth => {
            ExpectedOutcome::ShowsError(MSG_USERNAME_REQUIRED.to_string())
        }
        AccountClass::EmptyPassword => {
            ExpectedOutcome::ShowsError(MSG_PASSWORD_REQUIRED.to_string())
        }
    }
}

/// Outcome for a class submitted through a given interaction.
/// The submission mode never changes the outcome.
pub fn expected_outcome_for(class: AccountClass, _mode: InteractionMode) -> ExpectedOutcome {
    expected_outcome(class)
}

/// Class and expected outcome for one credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub class: AccountClass,
    pub outcome: ExpectedOutcome,
}

/// Classify a credential and look up its outcome in one step
pub fn predict(
    reference: &ReferenceCredentials,
    credential: &Credential,
    mode: InteractionMode,
) -> Prediction {
    let class = reference.classify(credential);
    Prediction {
        class,
        outcome: expected_outcome_for(class, mode),
    }
}

/// What the driver reported after a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedOutcome {
    /// URL after submission
    pub url: String,
    /// Text of the error container, if it is visible
    pub error_text: Option<String>,
}

impl ObservedOutcome {
    /// Whether this observation satisfies the expected outcome.
    ///
    /// A navigation requires the fragment in the URL and no error shown. An
    /// error requires the message fragment and that the URL never reached the
    /// inventory page.
    pub fn satisfies(&self, expected: &ExpectedOutcome) -> bool {
        match expected {
            ExpectedOutcome::NavigatesTo(fragment) => {
                self.url.contains(fragment.as_str()) && self.error_text.is_none()
            }
            ExpectedOutcome::ShowsError(message) => {
                !self.url.contains(INVENTORY_FRAGMENT)
                    && self
                        .error_text
                        .as_deref()
                        .is_some_and(|text| text.contains(message.as_str()))
            }
        }
    }
}

impl fmt::Display for ObservedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_text {
            Some(text) => write!(f, "url '{}' with error '{}'", self.url, text),
            None => write!(f, "url '{}' with no error", self.url),
        }
    }
}
