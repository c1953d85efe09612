//! Login Oracle - executable expectations for a web login screen.
//!
//! This crate provides:
//! - A total credential classifier over a configurable reference account set
//! - An outcome oracle mapping each account class to the page the user must see
//! - A browser driver abstraction with a simulated login page for offline runs
//! - The login scenario table and a sequential runner producing JSON reports
//! - An injectable clock so the idle-session check can run on virtual time
//!
//! # Example
//!
//! ```rust
//! use login_oracle::oracle::{
//!     AccountClass, Credential, ExpectedOutcome, ReferenceCredentials, expected_outcome,
//! };
//!
//! let reference = ReferenceCredentials::default();
//! let class = reference.classify(&Credential::new("STANDARD_USER", "secret_sauce"));
//! assert_eq!(class, AccountClass::CaseMismatched);
//! assert_eq!(
//!     expected_outcome(class),
//!     ExpectedOutcome::ShowsError("Username and password do not match".to_string())
//! );
//! ```

pub mod clock;
pub mod config;
pub mod driver;
pub mod harness;
pub mod oracle;
pub mod runner;
pub mod session;

// Re-export runner types
pub use runner::{ScenarioReport, SuiteReport};

// Re-export harness types
pub use harness::{
    RunnerConfig, Scenario, ScenarioError, ScenarioKind, ScenarioResult, ScenarioRunner,
    check_session_persistence, login_suite,
};

// Re-export oracle types
pub use oracle::{
    AccountClass, Credential, ExpectedOutcome, FieldProperty, InteractionMode, ObservedOutcome,
    ReferenceCredentials, classify, expected_outcome,
};

// Re-export drivers and clocks
pub use clock::{Clock, SimulatedClock, SystemClock};
pub use driver::{BrowserDriver, DriverError, DriverResult, MockLoginPage, MockPageConfig};

// Re-export session management
pub use session::Session;
