pub mod classify;
pub mod outcome;
pub mod types;

pub use classify::{ReferenceCredentials, classify};
pub use outcome::{ObservedOutcome, Prediction, expected_outcome, expected_outcome_for, predict};
pub use types::{
    AccountClass, Credential, ExpectedOutcome, FieldProperty, InteractionMode, INVENTORY_FRAGMENT,
    MSG_LOCKED, MSG_MISMATCH, MSG_PASSWORD_REQUIRED, MSG_USERNAME_REQUIRED,
};
