pub mod backend;
pub mod types;

pub use backend::{BrowserDriver, MockLoginPage, MockPageConfig};
pub use types::{DriverError, DriverResult, Key, Selectors};
