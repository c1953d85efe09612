//! The login screen scenario table.

use std::time::Duration;

use crate::harness::types::Scenario;
use crate::oracle::{Credential, FieldProperty, InteractionMode, ReferenceCredentials};

/// Username that belongs to no account
pub const UNKNOWN_USERNAME: &str = "new_user";

/// Password that belongs to no account
pub const WRONG_PASSWORD: &str = "password123";

/// Build every login screen scenario for a reference set.
///
/// Each scenario starts from a freshly loaded login page. `idle` is the
/// inactivity window of the session persistence scenario.
pub fn login_suite(reference: &ReferenceCredentials, idle: Duration) -> Vec<Scenario> {
    let user = reference.valid_username.as_str();
    let pass = reference.valid_password.as_str();

    vec![
        Scenario::field_contract(
            "Should check if login and password fields are visible",
            vec![FieldProperty::UsernameVisible, FieldProperty::PasswordVisible],
        ),
        Scenario::field_contract(
            "Should check if \"login\" button is visible and active",
            vec![FieldProperty::SubmitEnabled],
        )
        .then_submit(reference.valid()),
        Scenario::login("Should login with a valid username and password", reference.valid()),
        Scenario::login(
            "Should not login with a valid username and incorrect password",
            Credential::new(user, WRONG_PASSWORD),
        ),
        Scenario::login(
            "Should not login with a incorrect username and valid password",
            Credential::new(UNKNOWN_USERNAME, pass),
        ),
        Scenario::login(
            "Should not login with a empty username and password fields",
            Credential::new("", ""),
        ),
        Scenario::login(
            "Should not login with only the username field filled",
            Credential::new(user, ""),
        ),
        Scenario::login(
            "Should not login with only the password field filled",
            Credential::new("", pass),
        ),
        Scenario::login(
            "Should not login with a blocked account",
            Credential::new(&reference.locked_username, pass),
        ),
        Scenario::login(
            "Should login with a glitched account",
            Credential::new(&reference.degraded_username, pass),
        ),
        Scenario::login(
            "Should not log in with an uppercase username and valid password",
            Credential::new(user.to_uppercase(), pass),
        ),
        Scenario::login(
            "Should not log in with a valid username and uppercase password",
            Credential::new(user, pass.to_uppercase()),
        ),
        Scenario::login(
            "Should navigate by \"enter\" key from username to password field",
            reference.valid(),
        )
        .mode(InteractionMode::KeySubmit),
        Scenario::field_contract(
            "Should check if entered password is encrypted",
            vec![FieldProperty::PasswordObscured],
        ),
        Scenario::session_persistence(
            "Should check if the user is still logged in after one minute of inactivity after logging in",
            reference.valid(),
            idle,
        ),
    ]
}

/// Scenarios whose name contains `filter` (case-insensitive)
pub fn filter_scenarios(scenarios: Vec<Scenario>, filter: &str) -> Vec<Scenario> {
    let needle = filter.to_lowercase();
    scenarios
        .into_iter()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::types::ScenarioKind;
    use crate::oracle::{AccountClass, ExpectedOutcome, expected_outcome};
    use pretty_assertions::assert_eq;

    fn suite() -> Vec<Scenario> {
        login_suite(&ReferenceCredentials::default(), Duration::from_secs(60))
    }

    #[test]
    fn test_suite_has_unique_names() {
        let scenarios = suite();
        let names: std::collections::HashSet<_> = scenarios.iter().map(|s| &s.name).collect();
        assert_eq!(scenarios.len(), 15);
        assert_eq!(names.len(), scenarios.len());
    }

    #[test]
    fn test_suite_classes() {
        let reference = ReferenceCredentials::default();
        let classes: Vec<AccountClass> = suite()
            .iter()
            .filter(|s| matches!(s.kind, ScenarioKind::Login))
            .map(|s| reference.classify(&s.credential))
            .collect();

        assert_eq!(
            classes,
            vec![
                AccountClass::Valid,
                AccountClass::UnknownUser,
                AccountClass::UnknownUser,
                AccountClass::EmptyBoth,
                AccountClass::EmptyPassword,
                AccountClass::EmptyUsername,
                AccountClass::Locked,
                AccountClass::DegradedPerformance,
                AccountClass::CaseMismatched,
                AccountClass::CaseMismatched,
                AccountClass::Valid,
            ]
        );
    }

    #[test]
    fn test_suite_key_submit_matches_button() {
        let reference = ReferenceCredentials::default();
        let scenarios = suite();
        let key = scenarios
            .iter()
            .find(|s| s.mode == InteractionMode::KeySubmit)
            .unwrap();
        let class = reference.classify(&key.credential);
        assert_eq!(class, AccountClass::Valid);
        assert_eq!(
            expected_outcome(class),
            ExpectedOutcome::NavigatesTo("inventory".to_string())
        );
    }

    #[test]
    fn test_suite_session_scenario_uses_idle() {
        let scenarios = login_suite(&ReferenceCredentials::default(), Duration::from_millis(1234));
        let last = scenarios.last().unwrap();
        assert_eq!(
            last.kind,
            ScenarioKind::SessionPersistence {
                idle: Duration::from_millis(1234)
            }
        );
    }

    #[test]
    fn test_filter_scenarios() {
        let filtered = filter_scenarios(suite(), "UPPERCASE");
        assert_eq!(filtered.len(), 2);
        assert!(filter_scenarios(suite(), "no such scenario").is_empty());
    }
}
