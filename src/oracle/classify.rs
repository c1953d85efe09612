//! Credential classification.
//!
//! Maps any (username, password) pair onto exactly one [`AccountClass`]. The
//! rules are checked in a fixed order and the first match wins:
//!
//! 1. both fields empty → `EmptyBoth`
//! 2. username empty → `EmptyUsername`
//! 3. password empty → `EmptyPassword`
//! 4. either field equals the valid reference only up to letter case → `CaseMismatched`
//! 5. locked username → `Locked`
//! 6. degraded username with the valid password → `DegradedPerformance`
//! 7. exact valid pair → `Valid`
//! 8. anything else → `UnknownUser`

use serde::{Deserialize, Serialize};

use super::types::{AccountClass, Credential};
use crate::config::Config;

/// The fixed reference set the classifier compares against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCredentials {
    pub valid_username: String,
    pub valid_password: String,
    pub locked_username: String,
    pub degraded_username: String,
}

impl ReferenceCredentials {
    /// The canonical valid pair
    pub fn valid(&self) -> Credential {
        Credential::new(&self.valid_username, &self.valid_password)
    }

    /// Classify a credential against this reference set
    pub fn classify(&self, credential: &Credential) -> AccountClass {
        classify(self, &credential.username, &credential.password)
    }
}

impl Default for ReferenceCredentials {
    fn default() -> Self {
        Self::from(&Config::defaults())
    }
}

impl From<&Config> for ReferenceCredentials {
    fn from(config: &Config) -> Self {
        Self {
            valid_username: config.accounts.valid_username.clone(),
            valid_password: config.accounts.valid_password.clone(),
            locked_username: config.accounts.locked_username.clone(),
            degraded_username: config.accounts.degraded_username.clone(),
        }
    }
}

/// Classify a raw username/password pair. Total: never fails.
pub fn classify(reference: &ReferenceCredentials, username: &str, password: &str) -> AccountClass {
    match (username.is_empty(), password.is_empty()) {
        (true, true) => return AccountClass::EmptyBoth,
        (true, false) => return AccountClass::EmptyUsername,
        (false, true) => return AccountClass::EmptyPassword,
        (false, false) => {}
    }

    if differs_only_in_case(username, &reference.valid_username)
        || differs_only_in_case(password, &reference.valid_password)
    {
        return AccountClass::CaseMismatched;
    }

    if username == reference.locked_username {
        return AccountClass::Locked;
    }

    if username == reference.degraded_username && password == reference.valid_password {
        return AccountClass::DegradedPerformance;
    }

    if username == reference.valid_username && password == reference.valid_password {
        return AccountClass::Valid;
    }

    AccountClass::UnknownUser
}

/// True when `candidate` is not byte-identical to `reference` but equal ignoring case.
/// Any case deviation counts, including partial ones such as a capitalised first letter.
fn differs_only_in_case(candidate: &str, reference: &str) -> bool {
    candidate != reference && candidate.to_lowercase() == reference.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn reference() -> ReferenceCredentials {
        ReferenceCredentials::default()
    }

    #[rstest]
    #[case::valid_pair("standard_user", "secret_sauce", AccountClass::Valid)]
    #[case::empty_both("", "", AccountClass::EmptyBoth)]
    #[case::empty_username("", "secret_sauce", AccountClass::EmptyUsername)]
    #[case::empty_password("standard_user", "", AccountClass::EmptyPassword)]
    #[case::uppercase_username("STANDARD_USER", "secret_sauce", AccountClass::CaseMismatched)]
    #[case::uppercase_password("standard_user", "SECRET_SAUCE", AccountClass::CaseMismatched)]
    #[case::uppercase_both("STANDARD_USER", "SECRET_SAUCE", AccountClass::CaseMismatched)]
    #[case::capitalised_username("Standard_user", "secret_sauce", AccountClass::CaseMismatched)]
    #[case::locked("locked_out_user", "secret_sauce", AccountClass::Locked)]
    #[case::locked_wrong_password("locked_out_user", "password123", AccountClass::Locked)]
    #[case::degraded(
        "performance_glitch_user",
        "secret_sauce",
        AccountClass::DegradedPerformance
    )]
    #[case::degraded_wrong_password(
        "performance_glitch_user",
        "password123",
        AccountClass::UnknownUser
    )]
    #[case::wrong_password("standard_user", "password123", AccountClass::UnknownUser)]
    #[case::unknown_username("new_user", "secret_sauce", AccountClass::UnknownUser)]
    fn test_classify(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: AccountClass,
    ) {
        assert_eq!(classify(&reference(), username, password), expected);
    }

    #[test]
    fn test_empty_checks_take_precedence_over_case() {
        // An empty username beside an uppercased password is still a missing-field case
        assert_eq!(classify(&reference(), "", "SECRET_SAUCE"), AccountClass::EmptyUsername);
        assert_eq!(classify(&reference(), "STANDARD_USER", ""), AccountClass::EmptyPassword);
    }

    #[test]
    fn test_case_mismatch_precedes_locked() {
        assert_eq!(
            classify(&reference(), "locked_out_user", "SECRET_SAUCE"),
            AccountClass::CaseMismatched
        );
    }

    #[test]
    fn test_classify_uses_supplied_reference() {
        let reference = ReferenceCredentials {
            valid_username: "alice".to_string(),
            valid_password: "hunter2".to_string(),
            locked_username: "mallory".to_string(),
            degraded_username: "slowpoke".to_string(),
        };
        let class = |u: &str, p: &str| reference.classify(&Credential::new(u, p));
        assert_eq!(class("alice", "hunter2"), AccountClass::Valid);
        assert_eq!(class("standard_user", "secret_sauce"), AccountClass::UnknownUser);
        assert_eq!(class("ALICE", "hunter2"), AccountClass::CaseMismatched);
        assert_eq!(class("mallory", "x"), AccountClass::Locked);
    }

    #[test]
    fn test_classify_is_total_over_sample_space() {
        let reference = reference();
        let usernames = [
            "",
            "standard_user",
            "STANDARD_USER",
            "locked_out_user",
            "performance_glitch_user",
            "new_user",
            " ",
        ];
        let passwords = ["", "secret_sauce", "SECRET_SAUCE", "password123", "Secret_Sauce"];

        let mut seen = std::collections::HashSet::new();
        for u in usernames {
            for p in passwords {
                let class = classify(&reference, u, p);
                assert!(AccountClass::ALL.contains(&class));
                seen.insert(class);
            }
        }
        // Every class is reachable from the sample
        assert_eq!(seen.len(), AccountClass::ALL.len());
    }
}
