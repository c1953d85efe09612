//! Types for scenario run reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::oracle::{AccountClass, ExpectedOutcome, InteractionMode};

/// Result of a single scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name
    pub name: String,

    /// How the form was submitted
    pub mode: InteractionMode,

    /// Class of the submitted credential (None for form-contract scenarios)
    pub class: Option<AccountClass>,

    /// Outcome the oracle asserted (None for form-contract scenarios)
    pub expected: Option<ExpectedOutcome>,

    /// Whether every assertion held
    pub passed: bool,

    /// Failure description if failed
    pub error: Option<String>,

    /// Time spent in the scenario, including idle waits
    pub duration_ms: u64,
}

/// Result of a complete suite run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Login page the scenarios ran against
    pub target: String,

    /// Driver source type (e.g. "mock")
    pub driver: String,

    /// Number of passing scenarios
    pub passed: usize,

    /// Number of failing scenarios
    pub failed: usize,

    /// Per-scenario results in execution order
    pub scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    /// Create an empty report
    pub fn new(target: impl Into<String>, driver: impl Into<String>) -> Self {
        Self {
            started_at: Utc::now(),
            target: target.into(),
            driver: driver.into(),
            passed: 0,
            failed: 0,
            scenarios: Vec::new(),
        }
    }

    /// Record a scenario result
    pub fn push(&mut self, report: ScenarioReport) {
        if report.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.scenarios.push(report);
    }

    /// True when no scenario failed
    pub fn success(&self) -> bool {
        self.failed == 0
    }

    /// Reports of failing scenarios
    pub fn failures(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.scenarios.iter().filter(|s| !s.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, passed: bool) -> ScenarioReport {
        ScenarioReport {
            name: name.to_string(),
            mode: InteractionMode::ButtonClick,
            class: Some(AccountClass::Valid),
            expected: None,
            passed,
            error: (!passed).then(|| "boom".to_string()),
            duration_ms: 0,
        }
    }

    #[test]
    fn test_suite_report_counts() {
        let mut suite = SuiteReport::new("http://app/", "mock");
        suite.push(report("a", true));
        suite.push(report("b", false));
        suite.push(report("c", true));

        assert_eq!(suite.passed, 2);
        assert_eq!(suite.failed, 1);
        assert!(!suite.success());
        assert_eq!(suite.failures().map(|r| r.name.as_str()).collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_suite_report_json_shape() {
        let mut suite = SuiteReport::new("http://app/", "mock");
        suite.push(report("a", true));
        let json = serde_json::to_value(&suite).unwrap();
        assert_eq!(json["scenarios"][0]["class"], "valid");
        assert_eq!(json["scenarios"][0]["mode"], "button_click");
        assert_eq!(json["passed"], 1);
    }
}
