//! Failure taxonomy for remote catalog calls.

/// Error returned by every TMDB request.
///
/// "No trailer found" is not an error; resolvers report it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Connection, timeout, or body read failure.
    #[error("TMDB request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// TMDB answered with a non-success status.
    #[error("TMDB returned HTTP {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The response body did not have the expected JSON shape.
    #[error("failed to decode TMDB response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    /// HTTP status for [`CatalogError::Api`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias for catalog operations.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
