use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("No home directory to keep browser profiles in")]
    NoHomeDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

impl From<Error> for relister_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => relister_core::Error::Io(e),
            other => relister_core::Error::Surface(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
