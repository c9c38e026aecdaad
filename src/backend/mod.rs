// ABOUTME: Outbound client seams for the Docker and Kubernetes APIs.
// ABOUTME: Managers talk to these traits; production implementations wrap bollard and reqwest.

mod docker;
mod kubernetes;

pub use docker::{BollardDockerApi, DockerApi};
pub use kubernetes::{HttpKubernetesApi, KubernetesApi};

/// A create or delete request that the backend rejected or could not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    Conflict(String),

    #[error("rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),
}

impl BackendError {
    /// Map an HTTP error status and message the way both APIs report them.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            404 => BackendError::NotFound(message),
            409 => BackendError::Conflict(message),
            _ => BackendError::Rejected { status, message },
        }
    }
}
