// ABOUTME: Builds the connection handle for the configured engine.
// ABOUTME: Credentials are read here, once, and never re-read.

mod docker;
mod kubernetes;

pub use crate::config::DockerEndpoint;
pub use docker::{DockerConnection, DockerTls};
pub use kubernetes::{GROUP_VERSION, KubernetesAuth, KubernetesConnection};

use crate::config::{BackendConfig, Engine, ManagerConfiguration};
use crate::manager::ManagerError;

/// Resolved, authenticated client configuration for exactly one backend.
#[derive(Debug, Clone)]
pub enum ConnectionHandle {
    Docker(DockerConnection),
    Kubernetes(KubernetesConnection),
}

impl ConnectionHandle {
    pub fn build(config: &ManagerConfiguration) -> Result<Self, ManagerError> {
        match config.backend()? {
            BackendConfig::Docker(docker) => {
                tracing::info!(access = %docker.access, "using docker driver");
                Ok(ConnectionHandle::Docker(DockerConnection::from_config(docker)?))
            }
            BackendConfig::Kubernetes(kubernetes) => {
                tracing::info!(
                    url = %kubernetes.url,
                    security_mode = %kubernetes.security_mode,
                    "using kubernetes driver"
                );
                Ok(ConnectionHandle::Kubernetes(
                    KubernetesConnection::from_config(kubernetes)?,
                ))
            }
        }
    }

    pub fn engine(&self) -> Engine {
        match self {
            ConnectionHandle::Docker(_) => Engine::Docker,
            ConnectionHandle::Kubernetes(_) => Engine::Kubernetes,
        }
    }

    /// Short description of the authentication in use. Never includes secrets.
    pub fn auth_mode(&self) -> &'static str {
        match self {
            ConnectionHandle::Docker(conn) if conn.tls().is_some() => "tls",
            ConnectionHandle::Docker(_) => "none",
            ConnectionHandle::Kubernetes(conn) => match conn.auth() {
                KubernetesAuth::None => "none",
                KubernetesAuth::Bearer(_) => "token",
                KubernetesAuth::ClientCertificate(_) => "ca",
            },
        }
    }
}
