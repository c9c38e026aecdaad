// ABOUTME: Docker Remote API configuration section.
// ABOUTME: Either a local unix socket or a swarm manager endpoint, optionally with TLS.

use super::error::ConfigurationError;
use super::tls::TlsConfiguration;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// How the Docker Remote API is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockerAccess {
    Socket,
    Swarm,
}

impl fmt::Display for DockerAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DockerAccess::Socket => write!(f, "socket"),
            DockerAccess::Swarm => write!(f, "swarm"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SwarmConfiguration {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DockerApiConfiguration {
    #[serde(rename = "type")]
    pub access: DockerAccess,

    /// Local socket path, used when `type` is `socket`.
    #[serde(default)]
    pub socket: Option<String>,

    /// Swarm manager endpoint, used when `type` is `swarm`.
    #[serde(default)]
    pub swarm: Option<SwarmConfiguration>,

    #[serde(default)]
    pub tls: Option<TlsConfiguration>,

    #[serde(default = "default_docker_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_docker_timeout() -> Duration {
    Duration::from_secs(120)
}

/// The Docker endpoint selected by `type`, with the other field ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockerEndpoint {
    Socket(String),
    Swarm { host: String, port: u16 },
}

impl DockerEndpoint {
    /// Address in the form bollard expects.
    pub fn address(&self) -> String {
        match self {
            DockerEndpoint::Socket(path) => path.clone(),
            DockerEndpoint::Swarm { host, port } => format!("tcp://{}:{}", host, port),
        }
    }
}

impl fmt::Display for DockerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DockerEndpoint::Socket(path) => write!(f, "unix socket {}", path),
            DockerEndpoint::Swarm { host, port } => write!(f, "swarm {}:{}", host, port),
        }
    }
}

impl DockerApiConfiguration {
    pub fn endpoint(&self) -> Result<DockerEndpoint, ConfigurationError> {
        match self.access {
            DockerAccess::Socket => self
                .socket
                .as_ref()
                .filter(|s| !s.trim().is_empty())
                .map(|s| DockerEndpoint::Socket(s.clone()))
                .ok_or(ConfigurationError::MissingSocketPath),
            DockerAccess::Swarm => {
                let swarm = self.swarm.as_ref().ok_or(ConfigurationError::MissingSwarm)?;
                if swarm.host.trim().is_empty() {
                    return Err(ConfigurationError::MissingSwarm);
                }
                Ok(DockerEndpoint::Swarm {
                    host: swarm.host.clone(),
                    port: swarm.port,
                })
            }
        }
    }
}
