// Shared types for browser automation drivers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Error types for driver operations
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The page could not be reached or navigation failed
    #[error("Page unreachable: {0}")]
    Unreachable(String),

    /// No element matched the selector
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// An element interaction was attempted before any page was loaded
    #[error("No page loaded")]
    NotNavigated,
}

/// Fixed identifiers of the login form elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selectors {
    pub username: String,
    pub password: String,
    pub submit: String,
    pub error: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            username: "#user-name".to_string(),
            password: "#password".to_string(),
            submit: "#login-button".to_string(),
            error: "h3".to_string(),
        }
    }
}

/// Keys a scenario may press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Enter,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Enter => f.write_str("enter"),
        }
    }
}
