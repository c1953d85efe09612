//! Browser automation abstraction.
//!
//! This module provides the interface scenarios drive a login page through:
//! - `BrowserDriver`, the set of actions and queries a scenario needs
//! - `MockLoginPage`, an in-process login screen for tests and offline runs

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::types::{DriverError, DriverResult, Key, Selectors};
use crate::clock::{Clock, SimulatedClock};
use crate::oracle::ReferenceCredentials;

/// Trait for browser automation drivers
///
/// Implementations wrap whatever actually renders the page. Selectors are the
/// CSS identifiers from [`Selectors`].
pub trait BrowserDriver {
    /// Load a URL, replacing the current page
    fn navigate(&mut self, url: &str) -> DriverResult<()>;

    /// Type text into an input
    fn fill_field(&mut self, selector: &str, text: &str) -> DriverResult<()>;

    /// Activate an element
    fn click(&mut self, selector: &str) -> DriverResult<()>;

    /// Press a key while the element has focus
    fn press_key(&mut self, selector: &str, key: Key) -> DriverResult<()>;

    /// URL of the current page
    fn current_url(&self) -> DriverResult<String>;

    /// Whether an element exists and is displayed
    fn element_visible(&self, selector: &str) -> DriverResult<bool>;

    /// Attribute value, `None` when the element lacks it
    fn element_attribute(&self, selector: &str, name: &str) -> DriverResult<Option<String>>;

    /// Rendered text of an element
    fn element_text(&self, selector: &str) -> DriverResult<String>;

    /// Reload the current URL
    fn reload(&mut self) -> DriverResult<()>;

    /// Block for the full duration
    fn wait(&mut self, duration: Duration) -> DriverResult<()>;

    /// Get the source type identifier (e.g., "mock", "webdriver")
    fn source_type(&self) -> &str;
}

/// Configuration for the simulated login page
#[derive(Debug, Clone)]
pub struct MockPageConfig {
    /// URL of the login page; the inventory lives at `{base_url}inventory.html`
    pub base_url: String,
    /// Accounts the page accepts
    pub accounts: ReferenceCredentials,
    /// Element identifiers
    pub selectors: Selectors,
    /// Idle time after which the session expires (None = never)
    pub session_ttl: Option<Duration>,
    /// Extra render time for the degraded-performance account
    pub degraded_delay: Duration,
    /// Whether the password input is `type="password"`
    pub obscure_password: bool,
    /// Whether navigation succeeds at all
    pub reachable: bool,
}

impl Default for MockPageConfig {
    fn default() -> Self {
        Self {
            base_url: crate::config::DEFAULT_BASE_URL.to_string(),
            accounts: ReferenceCredentials::default(),
            selectors: Selectors::default(),
            session_ttl: None,
            degraded_delay: Duration::from_millis(500),
            obscure_password: true,
            reachable: true,
        }
    }
}

impl MockPageConfig {
    /// Create a page config served from the given URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the accepted accounts
    pub fn accounts(mut self, accounts: ReferenceCredentials) -> Self {
        self.accounts = accounts;
        self
    }

    /// Expire sessions after this much idle time
    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = Some(ttl);
        self
    }

    /// Set the degraded account's render delay
    pub fn degraded_delay(mut self, delay: Duration) -> Self {
        self.degraded_delay = delay;
        self
    }

    /// Render the password input as plain text
    pub fn plaintext_password(mut self) -> Self {
        self.obscure_password = false;
        self
    }

    /// Make every navigation fail
    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    fn inventory_url(&self) -> String {
        format!("{}inventory.html", self.base_url)
    }
}

const ERR_PREFIX: &str = "Epic sadface: ";

const MSG_NO_MATCH: &str = "Username and password do not match any user in this service";

fn differs_only_in_case(typed: &str, account: &str) -> bool {
    typed != account && typed.to_lowercase() == account.to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Page {
    Blank,
    Login {
        username: String,
        password: String,
        error: Option<String>,
    },
    Inventory,
}

impl Page {
    fn fresh_login(error: Option<String>) -> Self {
        Page::Login {
            username: String::new(),
            password: String::new(),
            error,
        }
    }
}

/// A simulated login screen
///
/// Behaves like the storefront login form: validates the typed fields on
/// submission, shows an error banner or moves to the inventory page, and keeps
/// a session that survives reloads until the optional TTL runs out.
pub struct MockLoginPage {
    config: MockPageConfig,
    clock: Arc<dyn Clock>,
    page: Page,
    /// Clock reading when the session was last used
    session_since: Option<Duration>,
}

impl MockLoginPage {
    /// Create a page with its own simulated clock
    pub fn new(config: MockPageConfig) -> Self {
        Self::with_clock(config, Arc::new(SimulatedClock::new()))
    }

    /// Create a page driven by the given clock
    pub fn with_clock(config: MockPageConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            page: Page::Blank,
            session_since: None,
        }
    }

    /// Whether a non-expired session exists
    pub fn logged_in(&self) -> bool {
        match (self.session_since, self.config.session_ttl) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(since), Some(ttl)) => self.clock.elapsed().saturating_sub(since) <= ttl,
        }
    }

    fn login_url(&self) -> &str {
        &self.config.base_url
    }

    fn load(&mut self, url: &str) -> DriverResult<()> {
        if !self.config.reachable {
            return Err(DriverError::Unreachable(url.to_string()));
        }

        let inventory = self.config.inventory_url();
        if url == inventory {
            if self.logged_in() {
                self.session_since = Some(self.clock.elapsed());
                self.page = Page::Inventory;
            } else {
                self.session_since = None;
                self.page = Page::fresh_login(Some(format!(
                    "{}You can only access '/inventory.html' when you are logged in.",
                    ERR_PREFIX
                )));
            }
            Ok(())
        } else if url == self.login_url() {
            self.page = Page::fresh_login(None);
            Ok(())
        } else {
            Err(DriverError::Unreachable(format!("no such page: {}", url)))
        }
    }

    fn submit(&mut self) -> DriverResult<()> {
        let Page::Login { username, password, .. } = &self.page else {
            return Err(DriverError::ElementNotFound(self.config.selectors.submit.clone()));
        };
        let accounts = &self.config.accounts;

        let error = if username.is_empty() {
            Some("Username is required".to_string())
        } else if password.is_empty() {
            Some("Password is required".to_string())
        } else if differs_only_in_case(username, &accounts.valid_username)
            || differs_only_in_case(password, &accounts.valid_password)
        {
            // Credentials are case sensitive; a case variant never reaches the account checks
            Some(MSG_NO_MATCH.to_string())
        } else if *username == accounts.locked_username {
            Some("Sorry, this user has been locked out.".to_string())
        } else if (*username == accounts.valid_username || *username == accounts.degraded_username)
            && *password == accounts.valid_password
        {
            None
        } else {
            Some(MSG_NO_MATCH.to_string())
        };

        match error {
            Some(message) => {
                debug!(%message, "login rejected");
                if let Page::Login { error, .. } = &mut self.page {
                    *error = Some(format!("{}{}", ERR_PREFIX, message));
                }
            }
            None => {
                if *username == accounts.degraded_username {
                    self.clock.sleep(self.config.degraded_delay);
                }
                debug!("login accepted");
                self.session_since = Some(self.clock.elapsed());
                self.page = Page::Inventory;
            }
        }
        Ok(())
    }

    fn is_form_element(&self, selector: &str) -> bool {
        let s = &self.config.selectors;
        selector == s.username || selector == s.password || selector == s.submit
    }
}

impl BrowserDriver for MockLoginPage {
    fn navigate(&mut self, url: &str) -> DriverResult<()> {
        debug!(url, "navigate");
        // Visiting the login page starts from a clean slate
        if url == self.login_url() {
            self.session_since = None;
        }
        self.load(url)
    }

    fn fill_field(&mut self, selector: &str, text: &str) -> DriverResult<()> {
        debug!(selector, "fill field");
        let (user_sel, pass_sel) = (
            self.config.selectors.username.clone(),
            self.config.selectors.password.clone(),
        );
        match &mut self.page {
            Page::Login { username, .. } if selector == user_sel => username.push_str(text),
            Page::Login { password, .. } if selector == pass_sel => password.push_str(text),
            Page::Blank => return Err(DriverError::NotNavigated),
            _ => return Err(DriverError::ElementNotFound(selector.to_string())),
        }
        Ok(())
    }

    fn click(&mut self, selector: &str) -> DriverResult<()> {
        debug!(selector, "click");
        if self.page == Page::Blank {
            return Err(DriverError::NotNavigated);
        }
        if selector == self.config.selectors.submit {
            self.submit()
        } else if matches!(self.page, Page::Login { .. }) && self.is_form_element(selector) {
            Ok(())
        } else {
            Err(DriverError::ElementNotFound(selector.to_string()))
        }
    }

    fn press_key(&mut self, selector: &str, key: Key) -> DriverResult<()> {
        debug!(selector, %key, "press key");
        if self.page == Page::Blank {
            return Err(DriverError::NotNavigated);
        }
        if !matches!(self.page, Page::Login { .. }) || !self.is_form_element(selector) {
            return Err(DriverError::ElementNotFound(selector.to_string()));
        }
        // Enter in any form control submits the form
        match key {
            Key::Enter => self.submit(),
        }
    }

    fn current_url(&self) -> DriverResult<String> {
        match self.page {
            Page::Blank => Err(DriverError::NotNavigated),
            Page::Login { .. } => Ok(self.config.base_url.clone()),
            Page::Inventory => Ok(self.config.inventory_url()),
        }
    }

    fn element_visible(&self, selector: &str) -> DriverResult<bool> {
        match &self.page {
            Page::Blank => Err(DriverError::NotNavigated),
            Page::Login { error, .. } => {
                if selector == self.config.selectors.error {
                    Ok(error.is_some())
                } else {
                    Ok(self.is_form_element(selector))
                }
            }
            Page::Inventory => Ok(false),
        }
    }

    fn element_attribute(&self, selector: &str, name: &str) -> DriverResult<Option<String>> {
        let Page::Login { username, password, .. } = &self.page else {
            return match self.page {
                Page::Blank => Err(DriverError::NotNavigated),
                _ => Err(DriverError::ElementNotFound(selector.to_string())),
            };
        };
        let s = &self.config.selectors;

        let value = if selector == s.username {
            match name {
                "type" => Some("text".to_string()),
                "value" => Some(username.clone()),
                _ => None,
            }
        } else if selector == s.password {
            match name {
                "type" if self.config.obscure_password => Some("password".to_string()),
                "type" => Some("text".to_string()),
                "value" => Some(password.clone()),
                _ => None,
            }
        } else if selector == s.submit {
            match name {
                "type" => Some("submit".to_string()),
                "value" => Some("Login".to_string()),
                _ => None,
            }
        } else {
            return Err(DriverError::ElementNotFound(selector.to_string()));
        };
        Ok(value)
    }

    fn element_text(&self, selector: &str) -> DriverResult<String> {
        match &self.page {
            Page::Blank => Err(DriverError::NotNavigated),
            Page::Login { error: Some(message), .. } if selector == self.config.selectors.error => {
                Ok(message.clone())
            }
            Page::Login { .. } if self.is_form_element(selector) => Ok(String::new()),
            _ => Err(DriverError::ElementNotFound(selector.to_string())),
        }
    }

    fn reload(&mut self) -> DriverResult<()> {
        debug!("reload");
        let url = self.current_url()?;
        self.load(&url)
    }

    fn wait(&mut self, duration: Duration) -> DriverResult<()> {
        debug!(ms = duration.as_millis() as u64, "wait");
        self.clock.sleep(duration);
        Ok(())
    }

    fn source_type(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.saucedemo.com/";

    fn page() -> MockLoginPage {
        let mut page = MockLoginPage::new(MockPageConfig::default());
        page.navigate(BASE).unwrap();
        page
    }

    fn login(page: &mut MockLoginPage, user: &str, pass: &str) {
        page.fill_field("#user-name", user).unwrap();
        page.fill_field("#password", pass).unwrap();
        page.click("#login-button").unwrap();
    }

    #[test]
    fn test_mock_page_requires_navigation() {
        let page = MockLoginPage::new(MockPageConfig::default());
        assert!(matches!(page.current_url(), Err(DriverError::NotNavigated)));
    }

    #[test]
    fn test_mock_page_initial_state() {
        let page = page();
        assert_eq!(page.current_url().unwrap(), BASE);
        assert!(page.element_visible("#user-name").unwrap());
        assert!(page.element_visible("#password").unwrap());
        assert!(!page.element_visible("h3").unwrap());
        assert_eq!(
            page.element_attribute("#password", "type").unwrap().as_deref(),
            Some("password")
        );
        assert_eq!(page.element_attribute("#login-button", "disabled").unwrap(), None);
    }

    #[test]
    fn test_mock_page_valid_login() {
        let mut page = page();
        login(&mut page, "standard_user", "secret_sauce");
        assert_eq!(page.current_url().unwrap(), format!("{}inventory.html", BASE));
        assert!(page.logged_in());
    }

    #[test]
    fn test_mock_page_enter_submits() {
        let mut page = page();
        page.fill_field("#user-name", "standard_user").unwrap();
        page.fill_field("#password", "secret_sauce").unwrap();
        page.press_key("#password", Key::Enter).unwrap();
        assert!(page.current_url().unwrap().contains("inventory"));
    }

    #[test]
    fn test_mock_page_error_banner() {
        let mut page = page();
        page.click("#login-button").unwrap();
        assert!(page.element_visible("h3").unwrap());
        assert_eq!(page.element_text("h3").unwrap(), "Epic sadface: Username is required");

        let mut page = self::page();
        login(&mut page, "locked_out_user", "secret_sauce");
        assert!(page.element_text("h3").unwrap().contains("this user has been locked out"));
    }

    #[test]
    fn test_mock_page_case_variant_of_password_is_not_locked_out() {
        let mut locked = page();
        login(&mut locked, "locked_out_user", "SECRET_SAUCE");
        assert_eq!(locked.current_url().unwrap(), BASE);
        assert_eq!(
            locked.element_text("h3").unwrap(),
            "Epic sadface: Username and password do not match any user in this service"
        );

        let mut capitalised = page();
        login(&mut capitalised, "Standard_user", "secret_sauce");
        assert!(capitalised.element_text("h3").unwrap().contains("do not match"));
    }

    #[test]
    fn test_mock_page_degraded_login_takes_time() {
        let clock = SimulatedClock::new();
        let config = MockPageConfig::default().degraded_delay(Duration::from_secs(3));
        let mut page = MockLoginPage::with_clock(config, Arc::new(clock.clone()));
        page.navigate(BASE).unwrap();
        login(&mut page, "performance_glitch_user", "secret_sauce");
        assert!(page.current_url().unwrap().contains("inventory"));
        assert_eq!(clock.elapsed(), Duration::from_secs(3));
    }

    #[test]
    fn test_mock_page_session_expires_after_ttl() {
        let clock = SimulatedClock::new();
        let config = MockPageConfig::default().session_ttl(Duration::from_secs(30));
        let mut page = MockLoginPage::with_clock(config, Arc::new(clock.clone()));
        page.navigate(BASE).unwrap();
        login(&mut page, "standard_user", "secret_sauce");

        page.wait(Duration::from_secs(10)).unwrap();
        page.reload().unwrap();
        assert!(page.current_url().unwrap().contains("inventory"));

        page.wait(Duration::from_secs(31)).unwrap();
        page.reload().unwrap();
        assert_eq!(page.current_url().unwrap(), BASE);
        assert!(page.element_text("h3").unwrap().contains("when you are logged in"));
    }

    #[test]
    fn test_mock_page_unreachable() {
        let mut page = MockLoginPage::new(MockPageConfig::default().unreachable());
        assert!(matches!(page.navigate(BASE), Err(DriverError::Unreachable(_))));
    }

    #[test]
    fn test_mock_page_unknown_selector() {
        let mut page = page();
        assert!(matches!(
            page.fill_field("#email", "x"),
            Err(DriverError::ElementNotFound(_))
        ));
    }
}
