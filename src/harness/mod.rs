pub mod run;
pub mod scenarios;
pub mod types;

pub use run::{RunnerConfig, ScenarioRunner, check_session_persistence};
pub use scenarios::{filter_scenarios, login_suite};
pub use types::{Scenario, ScenarioError, ScenarioKind, ScenarioResult};
