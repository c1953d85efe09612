use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::driver::DriverError;
use crate::oracle::{Credential, ExpectedOutcome, FieldProperty, InteractionMode, ObservedOutcome};

/// What a scenario asserts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Submit the credential and compare against the oracle
    Login,

    /// Check static form properties. When `submit_after` is set the
    /// credential is typed first and the form submitted after the check.
    FieldContract {
        properties: Vec<FieldProperty>,
        submit_after: bool,
    },

    /// Log in, stay idle, reload, and expect to still be on the inventory page
    SessionPersistence {
        #[serde(with = "duration_ms")]
        idle: Duration,
    },
}

/// A single named test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Human-readable name shown in reports
    pub name: String,

    /// Values typed into the form; empty fields are left untouched
    pub credential: Credential,

    /// How the form is submitted
    pub mode: InteractionMode,

    pub kind: ScenarioKind,
}

impl Scenario {
    /// A login scenario submitted with the button
    pub fn login(name: impl Into<String>, credential: Credential) -> Self {
        Self {
            name: name.into(),
            credential,
            mode: InteractionMode::ButtonClick,
            kind: ScenarioKind::Login,
        }
    }

    /// A form-contract scenario with nothing typed
    pub fn field_contract(name: impl Into<String>, properties: Vec<FieldProperty>) -> Self {
        Self {
            name: name.into(),
            credential: Credential::new("", ""),
            mode: InteractionMode::ButtonClick,
            kind: ScenarioKind::FieldContract {
                properties,
                submit_after: false,
            },
        }
    }

    /// A session persistence scenario
    pub fn session_persistence(
        name: impl Into<String>,
        credential: Credential,
        idle: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            credential,
            mode: InteractionMode::ButtonClick,
            kind: ScenarioKind::SessionPersistence { idle },
        }
    }

    /// Submit with the given interaction mode
    pub fn mode(mut self, mode: InteractionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Type this credential before a field-contract check, then submit
    pub fn then_submit(mut self, credential: Credential) -> Self {
        if let ScenarioKind::FieldContract { submit_after, .. } = &mut self.kind {
            *submit_after = true;
            self.credential = credential;
        }
        self
    }

    /// Whether the scenario submits the credential to the oracle-checked form
    pub fn classifies(&self) -> bool {
        !matches!(self.kind, ScenarioKind::FieldContract { .. })
    }
}

/// Result type for scenario execution
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Reasons a scenario fails
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// The page did not show what the oracle expects
    #[error("expected page to {expected}, observed {observed}")]
    OutcomeMismatch {
        expected: ExpectedOutcome,
        observed: ObservedOutcome,
    },

    /// A static form property did not hold
    #[error("field contract violated: {property}")]
    FieldContractViolated { property: FieldProperty },

    /// The session did not survive the idle period and reload
    #[error("session lost after idle period, reloaded to '{url}'")]
    SessionLost { url: String },

    /// The idle period is shorter than the configured threshold
    #[error("idle period {requested:?} is below the threshold {threshold:?}")]
    IdleBelowThreshold {
        requested: Duration,
        threshold: Duration,
    },

    /// The driver could not reach or interact with the page
    #[error("driver unavailable: {0}")]
    DriverUnavailable(#[from] DriverError),
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
