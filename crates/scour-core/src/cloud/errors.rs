use crate::errors::ScourError;

#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Cloud rejected the request: {message}")]
    Unauthorized { message: String },

    #[error("Cloud API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport failure talking to the cloud: {message}")]
    Transport { message: String },

    #[error("Failed to decode cloud response: {message}")]
    Decode { message: String },

    #[error("No '{service}' endpoint in the service catalog")]
    MissingEndpoint { service: String },
}

impl CloudError {
    /// Whether this error means the target no longer exists.
    ///
    /// Deletes racing against the cloud's own cleanup surface as 404s;
    /// callers treat those as "already gone".
    pub fn is_not_found(&self) -> bool {
        matches!(self, CloudError::NotFound { .. })
    }
}

impl From<reqwest::Error> for CloudError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            CloudError::Decode {
                message: e.to_string(),
            }
        } else {
            CloudError::Transport {
                message: e.to_string(),
            }
        }
    }
}

impl ScourError for CloudError {
    fn error_code(&self) -> &'static str {
        match self {
            CloudError::NotFound { .. } => "CLOUD_NOT_FOUND",
            CloudError::Unauthorized { .. } => "CLOUD_UNAUTHORIZED",
            CloudError::Api { .. } => "CLOUD_API_ERROR",
            CloudError::Transport { .. } => "CLOUD_TRANSPORT_ERROR",
            CloudError::Decode { .. } => "CLOUD_DECODE_ERROR",
            CloudError::MissingEndpoint { .. } => "CLOUD_MISSING_ENDPOINT",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, CloudError::Unauthorized { .. })
    }
}
