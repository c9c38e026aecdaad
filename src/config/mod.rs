// ABOUTME: Manager configuration types and YAML parsing.
// ABOUTME: Selects the backend engine and carries its connection settings.

mod docker;
mod error;
mod kubernetes;
mod tls;

pub use docker::{DockerAccess, DockerApiConfiguration, DockerEndpoint, SwarmConfiguration};
pub use error::ConfigurationError;
pub use kubernetes::{
    DEFAULT_NAMESPACE, KubernetesConfiguration, SERVICE_ACCOUNT_TOKEN, SecurityMode,
};
pub use tls::TlsConfiguration;

use crate::error::Result;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "berth.yml";

/// The container backend a manager drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Docker,
    Kubernetes,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Docker => write!(f, "docker"),
            Engine::Kubernetes => write!(f, "kubernetes"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManagerConfiguration {
    /// Port the request listener binds to. Not used by the managers.
    #[serde(default)]
    pub port: Option<u16>,

    pub engine: Engine,

    #[serde(default)]
    pub docker: Option<DockerApiConfiguration>,

    #[serde(default)]
    pub kubernetes: Option<KubernetesConfiguration>,
}

/// The configuration section of the selected engine.
#[derive(Debug, Clone, Copy)]
pub enum BackendConfig<'a> {
    Docker(&'a DockerApiConfiguration),
    Kubernetes(&'a KubernetesConfiguration),
}

impl ManagerConfiguration {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Resolve the section for `engine`. The other section is ignored even if present.
    pub fn backend(&self) -> std::result::Result<BackendConfig<'_>, ConfigurationError> {
        match self.engine {
            Engine::Docker => self
                .docker
                .as_ref()
                .map(BackendConfig::Docker)
                .ok_or(ConfigurationError::MissingEngineConfig(Engine::Docker)),
            Engine::Kubernetes => self
                .kubernetes
                .as_ref()
                .map(BackendConfig::Kubernetes)
                .ok_or(ConfigurationError::MissingEngineConfig(Engine::Kubernetes)),
        }
    }
}
