// ABOUTME: Manager error types with SNAFU pattern.
// ABOUTME: Unifies construction, deployment and teardown failures for programmatic handling.

use snafu::Snafu;

use crate::backend::BackendError;
use crate::config::ConfigurationError;
use crate::credentials::CredentialLoadError;

/// Unified error for building a manager and running its operations.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ManagerError {
    #[snafu(display("invalid manager configuration: {source}"))]
    Configuration { source: ConfigurationError },

    #[snafu(display("failed to load credentials: {source}"))]
    CredentialLoad { source: CredentialLoadError },

    #[snafu(display("failed to deploy container set '{set}': {source}"))]
    Deployment { set: String, source: BackendError },

    #[snafu(display("failed to remove container set '{id}': {source}"))]
    Teardown { id: String, source: BackendError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerErrorKind {
    /// Selected engine is missing required settings.
    Configuration,
    /// A credential file could not be read.
    CredentialLoad,
    /// The backend rejected or failed a create request.
    Deployment,
    /// The backend rejected or failed a delete request.
    Teardown,
}

impl ManagerError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ManagerErrorKind {
        match self {
            ManagerError::Configuration { .. } => ManagerErrorKind::Configuration,
            ManagerError::CredentialLoad { .. } => ManagerErrorKind::CredentialLoad,
            ManagerError::Deployment { .. } => ManagerErrorKind::Deployment,
            ManagerError::Teardown { .. } => ManagerErrorKind::Teardown,
        }
    }

    /// Returns the backend's error detail for deployment and teardown failures.
    pub fn backend_detail(&self) -> Option<&BackendError> {
        match self {
            ManagerError::Deployment { source, .. } | ManagerError::Teardown { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

impl From<ConfigurationError> for ManagerError {
    fn from(source: ConfigurationError) -> Self {
        ManagerError::Configuration { source }
    }
}

impl From<CredentialLoadError> for ManagerError {
    fn from(source: CredentialLoadError) -> Self {
        ManagerError::CredentialLoad { source }
    }
}
