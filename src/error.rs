use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A lesson index or word list could not be fetched or parsed.
    /// A session cannot start from a lesson that failed to load.
    #[error("failed to load lesson data: {0}")]
    Load(String),

    /// The persistent store is unavailable or unwritable. Reads degrade to
    /// an empty store instead of surfacing this; only writes report it.
    #[error("persistent store failure: {0}")]
    Persistence(String),

    /// A session method was called in the wrong state. Indicates a caller
    /// bug, not a recoverable condition.
    #[error("invalid session state: {0}")]
    InvalidState(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
