use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeadlinerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Gave up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<HeadlinerError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HeadlinerError {
    /// Network failures are worth another attempt; malformed payloads are not.
    pub fn is_transient(&self) -> bool {
        matches!(self, HeadlinerError::Http(_) | HeadlinerError::Timeout(_))
    }
}

pub type Result<T> = std::result::Result<T, HeadlinerError>;
