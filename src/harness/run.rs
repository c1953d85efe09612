use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::clock::Clock;
use crate::config::Config;
use crate::driver::{BrowserDriver, DriverResult, Key, Selectors};
use crate::harness::types::{Scenario, ScenarioError, ScenarioKind, ScenarioResult};
use crate::oracle::{
    ExpectedOutcome, FieldProperty, INVENTORY_FRAGMENT, InteractionMode, ObservedOutcome,
    ReferenceCredentials, predict,
};
use crate::runner::{ScenarioReport, SuiteReport};

/// Settings shared by every scenario of a run
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Login page each scenario starts from
    pub base_url: String,
    /// Element identifiers
    pub selectors: Selectors,
    /// Reference accounts for classification
    pub reference: ReferenceCredentials,
    /// Minimum idle period for session persistence scenarios
    pub idle_threshold: Duration,
}

impl From<&Config> for RunnerConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.target.base_url.clone(),
            selectors: Selectors::default(),
            reference: ReferenceCredentials::from(config),
            idle_threshold: config.idle_threshold(),
        }
    }
}

/// Executes scenarios one at a time against a driver
pub struct ScenarioRunner<D: BrowserDriver> {
    driver: D,
    config: RunnerConfig,
    clock: Arc<dyn Clock>,
}

impl<D: BrowserDriver> ScenarioRunner<D> {
    /// Create a runner; `clock` should be the one the driver waits on
    pub fn new(driver: D, config: RunnerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            driver,
            config,
            clock,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run every scenario in order. Failures are recorded and the run continues.
    pub fn run_suite(&mut self, scenarios: &[Scenario]) -> SuiteReport {
        let mut report = SuiteReport::new(&self.config.base_url, self.driver.source_type());
        for scenario in scenarios {
            report.push(self.run(scenario));
        }
        info!(passed = report.passed, failed = report.failed, "suite finished");
        report
    }

    /// Run one scenario and describe the result
    pub fn run(&mut self, scenario: &Scenario) -> ScenarioReport {
        info!(scenario = %scenario.name, mode = %scenario.mode, "running scenario");
        let started = self.clock.elapsed();

        let prediction = scenario
            .classifies()
            .then(|| predict(&self.config.reference, &scenario.credential, scenario.mode));
        let result = self.execute(scenario);

        let elapsed = self.clock.elapsed().saturating_sub(started);
        let error = match &result {
            Ok(()) => {
                info!(scenario = %scenario.name, "passed");
                None
            }
            Err(e) => {
                warn!(scenario = %scenario.name, error = %e, "failed");
                Some(e.to_string())
            }
        };

        ScenarioReport {
            name: scenario.name.clone(),
            mode: scenario.mode,
            class: prediction.as_ref().map(|p| p.class),
            expected: prediction.map(|p| p.outcome),
            passed: result.is_ok(),
            error,
            duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Run one scenario, failing on the first broken assertion
    pub fn execute(&mut self, scenario: &Scenario) -> ScenarioResult<()> {
        match &scenario.kind {
            ScenarioKind::Login => {
                self.login(scenario)?;
                Ok(())
            }
            ScenarioKind::FieldContract {
                properties,
                submit_after,
            } => {
                self.open()?;
                if *submit_after {
                    self.fill(scenario)?;
                }
                for property in properties {
                    self.check_field(*property)?;
                }
                if *submit_after {
                    self.submit(scenario.mode)?;
                }
                Ok(())
            }
            ScenarioKind::SessionPersistence { idle } => {
                if *idle < self.config.idle_threshold {
                    return Err(ScenarioError::IdleBelowThreshold {
                        requested: *idle,
                        threshold: self.config.idle_threshold,
                    });
                }
                let observed = self.login(scenario)?;
                if check_session_persistence(&mut self.driver, &observed, *idle)? {
                    Ok(())
                } else {
                    Err(ScenarioError::SessionLost {
                        url: self.driver.current_url()?,
                    })
                }
            }
        }
    }

    /// Load the page, type the credential, submit, and compare with the oracle
    fn login(&mut self, scenario: &Scenario) -> ScenarioResult<ObservedOutcome> {
        let prediction = predict(&self.config.reference, &scenario.credential, scenario.mode);

        self.open()?;
        self.fill(scenario)?;
        self.submit(scenario.mode)?;

        let observed = self.observe()?;
        if !observed.satisfies(&prediction.outcome) {
            return Err(ScenarioError::OutcomeMismatch {
                expected: prediction.outcome,
                observed,
            });
        }
        Ok(observed)
    }

    fn open(&mut self) -> DriverResult<()> {
        self.driver.navigate(&self.config.base_url)
    }

    fn fill(&mut self, scenario: &Scenario) -> DriverResult<()> {
        let credential = &scenario.credential;
        if !credential.username.is_empty() {
            self.driver
                .fill_field(&self.config.selectors.username, &credential.username)?;
        }
        if !credential.password.is_empty() {
            self.driver
                .fill_field(&self.config.selectors.password, &credential.password)?;
        }
        Ok(())
    }

    fn submit(&mut self, mode: InteractionMode) -> DriverResult<()> {
        match mode {
            InteractionMode::ButtonClick => self.driver.click(&self.config.selectors.submit),
            InteractionMode::KeySubmit => self
                .driver
                .press_key(&self.config.selectors.password, Key::Enter),
        }
    }

    fn observe(&self) -> DriverResult<ObservedOutcome> {
        let error_sel = &self.config.selectors.error;
        let error_text = if self.driver.element_visible(error_sel)? {
            Some(self.driver.element_text(error_sel)?)
        } else {
            None
        };
        Ok(ObservedOutcome {
            url: self.driver.current_url()?,
            error_text,
        })
    }

    fn check_field(&self, property: FieldProperty) -> ScenarioResult<()> {
        let s = &self.config.selectors;
        let holds = match property {
            FieldProperty::UsernameVisible => self.driver.element_visible(&s.username)?,
            FieldProperty::PasswordVisible => self.driver.element_visible(&s.password)?,
            FieldProperty::PasswordObscured => {
                self.driver.element_attribute(&s.password, "type")?.as_deref() == Some("password")
            }
            FieldProperty::SubmitEnabled => {
                self.driver.element_visible(&s.submit)?
                    && self.driver.element_attribute(&s.submit, "disabled")?.is_none()
            }
        };
        if holds {
            Ok(())
        } else {
            Err(ScenarioError::FieldContractViolated { property })
        }
    }
}

/// Check that a successful login survives an idle period and a reload.
///
/// Blocks through the driver for the whole of `idle` before reloading.
/// Returns false without waiting if `login` was not a successful navigation.
pub fn check_session_persistence<D: BrowserDriver + ?Sized>(
    driver: &mut D,
    login: &ObservedOutcome,
    idle: Duration,
) -> DriverResult<bool> {
    let success = ExpectedOutcome::NavigatesTo(INVENTORY_FRAGMENT.to_string());
    if !login.satisfies(&success) {
        return Ok(false);
    }

    driver.wait(idle)?;
    driver.reload()?;

    Ok(driver.current_url()?.contains(INVENTORY_FRAGMENT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimulatedClock;
    use crate::driver::{MockLoginPage, MockPageConfig};
    use crate::oracle::{AccountClass, Credential};
    use pretty_assertions::assert_eq;

    fn runner(page: MockPageConfig, clock: &SimulatedClock) -> ScenarioRunner<MockLoginPage> {
        let clock: Arc<dyn Clock> = Arc::new(clock.clone());
        let driver = MockLoginPage::with_clock(page, clock.clone());
        ScenarioRunner::new(driver, RunnerConfig::from(&Config::defaults()), clock)
    }

    #[test]
    fn test_run_reports_class_and_outcome() {
        let clock = SimulatedClock::new();
        let mut runner = runner(MockPageConfig::default(), &clock);
        let report = runner.run(&Scenario::login(
            "locked",
            Credential::new("locked_out_user", "secret_sauce"),
        ));

        assert!(report.passed, "{:?}", report.error);
        assert_eq!(report.class, Some(AccountClass::Locked));
        assert_eq!(
            report.expected,
            Some(ExpectedOutcome::ShowsError("this user has been locked out".to_string()))
        );
    }

    #[test]
    fn test_idle_below_threshold_is_rejected_before_driving() {
        let clock = SimulatedClock::new();
        let mut runner = runner(MockPageConfig::default(), &clock);
        let scenario = Scenario::session_persistence(
            "short idle",
            Credential::new("standard_user", "secret_sauce"),
            Duration::from_secs(5),
        );

        let err = runner.execute(&scenario).unwrap_err();
        assert!(matches!(err, ScenarioError::IdleBelowThreshold { .. }));
        // Nothing was loaded
        assert!(runner.driver().current_url().is_err());
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_check_session_persistence_skips_failed_login() {
        let mut page = MockLoginPage::new(MockPageConfig::default());
        let failed = ObservedOutcome {
            url: "https://www.saucedemo.com/".to_string(),
            error_text: Some("Epic sadface: Username is required".to_string()),
        };
        assert!(!check_session_persistence(&mut page, &failed, Duration::from_secs(60)).unwrap());
    }

    #[test]
    fn test_field_contract_reports_violation() {
        let clock = SimulatedClock::new();
        let mut runner = runner(MockPageConfig::default().plaintext_password(), &clock);
        let scenario = Scenario::field_contract("obscured", vec![FieldProperty::PasswordObscured]);

        let err = runner.execute(&scenario).unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::FieldContractViolated {
                property: FieldProperty::PasswordObscured
            }
        ));
    }
}
