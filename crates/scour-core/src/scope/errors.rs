use crate::cloud::errors::CloudError;
use crate::errors::ScourError;

#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    #[error("Unable to find project '{identifier}'")]
    ProjectNotFound { identifier: String },

    #[error("Not authorized to operate on the target project: {message}")]
    AuthorizationFailure { message: String },

    #[error("Project record is missing its id")]
    MalformedProject,

    #[error("Cloud call failed during scope resolution: {source}")]
    CloudError {
        #[source]
        source: CloudError,
    },
}

impl From<CloudError> for ScopeError {
    fn from(source: CloudError) -> Self {
        // Authorization problems get their own variant so setup-phase
        // failures stay distinguishable in the exit path.
        match source {
            CloudError::Unauthorized { message } => ScopeError::AuthorizationFailure { message },
            source => ScopeError::CloudError { source },
        }
    }
}

impl ScourError for ScopeError {
    fn error_code(&self) -> &'static str {
        match self {
            ScopeError::ProjectNotFound { .. } => "SCOPE_PROJECT_NOT_FOUND",
            ScopeError::AuthorizationFailure { .. } => "SCOPE_AUTHORIZATION_FAILURE",
            ScopeError::MalformedProject => "SCOPE_MALFORMED_PROJECT",
            ScopeError::CloudError { .. } => "SCOPE_CLOUD_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ScopeError::ProjectNotFound { .. } | ScopeError::AuthorizationFailure { .. }
        )
    }
}
