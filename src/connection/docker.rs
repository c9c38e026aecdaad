// ABOUTME: Resolved connection settings for a Docker Remote API endpoint.
// ABOUTME: Socket path or swarm address, plus TLS material when configured.

use crate::config::{DockerApiConfiguration, DockerEndpoint, TlsConfiguration};
use crate::credentials::{self, TlsMaterial};
use crate::manager::ManagerError;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DockerConnection {
    endpoint: DockerEndpoint,
    tls: Option<DockerTls>,
    timeout: Duration,
}

/// TLS material together with the files it came from; bollard opens the files itself.
#[derive(Debug, Clone)]
pub struct DockerTls {
    pub material: TlsMaterial,
    pub files: TlsConfiguration,
}

impl DockerConnection {
    pub fn from_config(config: &DockerApiConfiguration) -> Result<Self, ManagerError> {
        let endpoint = config.endpoint()?;

        let tls = match &config.tls {
            Some(files) => {
                tracing::info!(%endpoint, "using TLS for docker connection");
                Some(DockerTls {
                    material: credentials::load_tls(files)?,
                    files: files.clone(),
                })
            }
            None => None,
        };

        Ok(Self {
            endpoint,
            tls,
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &DockerEndpoint {
        &self.endpoint
    }

    pub fn tls(&self) -> Option<&TlsMaterial> {
        self.tls.as_ref().map(|t| &t.material)
    }

    pub fn tls_files(&self) -> Option<&TlsConfiguration> {
        self.tls.as_ref().map(|t| &t.files)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
