//! Fetch error taxonomy
//!
//! Every failure of the listing query is terminal for the invocation:
//! repeated failures almost always indicate a configuration or
//! authentication problem, so nothing here is retried.

use std::fmt;

/// Errors raised by the remote repository fetcher
#[derive(Debug)]
pub enum FetchError {
    /// No usable credential; GitHub's GraphQL API rejects anonymous callers
    Unauthenticated(String),

    /// The underlying HTTP client could not be constructed
    ClientConstruction(String),

    /// The listing query failed with a non-success status or transport error
    Request(String),

    /// The queried account does not exist or is not visible to the caller
    OwnerNotFound(String),

    /// The response did not decode as the expected document shape
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Unauthenticated(details) => {
                write!(f, "Authentication failed: {}", details)
            }
            FetchError::ClientConstruction(details) => {
                write!(f, "Failed to construct GitHub client: {}", details)
            }
            FetchError::Request(details) => write!(f, "Repository listing failed: {}", details),
            FetchError::OwnerNotFound(owner) => {
                write!(f, "Owner '{}' not found or not visible", owner)
            }
            FetchError::Decode(details) => {
                write!(f, "Unexpected repository listing response: {}", details)
            }
        }
    }
}

impl std::error::Error for FetchError {}

impl FetchError {
    /// Classify an octocrab error into the fetch taxonomy.
    ///
    /// Authentication problems (401, and 403 when not rate limiting) map to
    /// `Unauthenticated`; undecodable payloads map to `Decode`; everything
    /// else is a plain request failure.
    pub fn from_octocrab_error(error: octocrab::Error) -> Self {
        match &error {
            octocrab::Error::GitHub { source, .. } => {
                let status = source.status_code.as_u16();
                let detailed_error = format!(
                    "GitHub API error - Status: {}, Message: {:?}",
                    status, source.message
                );
                tracing::error!("GitHub API error details: {}", detailed_error);

                match status {
                    401 | 403 => Self::Unauthenticated(detailed_error),
                    _ => Self::Request(detailed_error),
                }
            }
            octocrab::Error::Json { .. } => {
                Self::Decode(format!("Response parsing error: {}", error))
            }
            _ => Self::Request(format!("Request error: {}", error)),
        }
    }
}
