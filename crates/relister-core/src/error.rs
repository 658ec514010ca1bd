use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid listing record: {0}")]
    InvalidRecord(String),

    #[error("Unsupported listing category: {0}")]
    UnsupportedCategory(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Required element not found after {waited:?}: {locator}")]
    ElementNotFound { locator: String, waited: Duration },

    #[error("Automation surface error: {0}")]
    Surface(String),
}

impl Error {
    /// True when the error is a required element that never appeared
    pub fn is_element_not_found(&self) -> bool {
        matches!(self, Error::ElementNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
