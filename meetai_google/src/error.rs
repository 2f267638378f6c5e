use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoogleApiError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid Google configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl GoogleApiError {
    /// Failures of the remote sign-in flow are reported as authentication errors.
    pub(crate) fn into_authentication(self) -> Self {
        match self {
            GoogleApiError::Http(error) => GoogleApiError::Authentication(error.to_string()),
            other => other,
        }
    }
}
