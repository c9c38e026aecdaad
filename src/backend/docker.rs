// ABOUTME: Docker Remote API client built on bollard.
// ABOUTME: Connects over a unix socket or to a swarm endpoint with optional TLS.

use super::BackendError;
use crate::config::{ConfigurationError, DockerEndpoint, Engine};
use crate::connection::DockerConnection;
use crate::manifest::GroupMember;
use async_trait::async_trait;
use bollard::Docker;
use bollard::models::{ContainerCreateBody, HostConfig, RestartPolicy, RestartPolicyNameEnum};
use bollard::query_parameters::{
    CreateContainerOptions, ListContainersOptions, RemoveContainerOptions, StartContainerOptions,
};
use std::collections::{BTreeMap, HashMap};

/// Container calls a Docker manager needs.
#[async_trait]
pub trait DockerApi: Send + Sync {
    /// Create the container described by `member`. Returns its ID.
    async fn create_container(&self, member: &GroupMember) -> Result<String, BackendError>;

    async fn start_container(&self, id: &str) -> Result<(), BackendError>;

    /// IDs of all containers, running or not, carrying every label in `labels`.
    async fn list_containers(
        &self,
        labels: &BTreeMap<String, String>,
    ) -> Result<Vec<String>, BackendError>;

    /// Force-remove a container.
    async fn remove_container(&self, id: &str) -> Result<(), BackendError>;
}

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_docker_error(e: bollard::errors::Error) -> BackendError {
    match e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } => BackendError::from_status(status_code, message),
        other => BackendError::Transport(other.to_string()),
    }
}

fn client_error(e: bollard::errors::Error) -> ConfigurationError {
    ConfigurationError::Client {
        engine: Engine::Docker,
        reason: e.to_string(),
    }
}

fn create_body(member: &GroupMember) -> ContainerCreateBody {
    ContainerCreateBody {
        image: Some(member.image.clone()),
        labels: Some(
            member
                .labels
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
        host_config: Some(HostConfig {
            restart_policy: Some(RestartPolicy {
                name: Some(RestartPolicyNameEnum::ALWAYS),
                maximum_retry_count: None,
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

// =============================================================================
// BollardDockerApi
// =============================================================================

pub struct BollardDockerApi {
    client: Docker,
}

impl BollardDockerApi {
    pub fn new(client: Docker) -> Self {
        Self { client }
    }

    /// Create a client for the endpoint in `connection`.
    ///
    /// Unix sockets are reached without TLS; swarm endpoints use TLS when configured.
    pub fn connect(connection: &DockerConnection) -> Result<Self, ConfigurationError> {
        let timeout = connection.timeout().as_secs();
        let address = connection.endpoint().address();

        let client = match (connection.endpoint(), connection.tls_files()) {
            (DockerEndpoint::Socket(_), tls) => {
                if tls.is_some() {
                    tracing::warn!(
                        socket = %address,
                        "TLS is configured but unix socket connections do not use it"
                    );
                }
                Docker::connect_with_unix(&address, timeout, bollard::API_DEFAULT_VERSION)
                    .map_err(client_error)?
            }
            (DockerEndpoint::Swarm { .. }, None) => {
                Docker::connect_with_http(&address, timeout, bollard::API_DEFAULT_VERSION)
                    .map_err(client_error)?
            }
            (DockerEndpoint::Swarm { .. }, Some(files)) => {
                if files.passphrase().is_some() {
                    return Err(ConfigurationError::EncryptedKeyUnsupported);
                }
                Docker::connect_with_ssl(
                    &address,
                    &files.key,
                    &files.cert,
                    &files.ca,
                    timeout,
                    bollard::API_DEFAULT_VERSION,
                )
                .map_err(client_error)?
            }
        };

        Ok(Self::new(client))
    }
}

#[async_trait]
impl DockerApi for BollardDockerApi {
    async fn create_container(&self, member: &GroupMember) -> Result<String, BackendError> {
        let opts = CreateContainerOptions {
            name: Some(member.name.clone()),
            ..Default::default()
        };

        let response = self
            .client
            .create_container(Some(opts), create_body(member))
            .await
            .map_err(map_docker_error)?;

        for warning in &response.warnings {
            tracing::warn!(container = %member.name, "{}", warning);
        }

        Ok(response.id)
    }

    async fn start_container(&self, id: &str) -> Result<(), BackendError> {
        self.client
            .start_container(id, None::<StartContainerOptions>)
            .await
            .map_err(map_docker_error)
    }

    async fn list_containers(
        &self,
        labels: &BTreeMap<String, String>,
    ) -> Result<Vec<String>, BackendError> {
        let label_filters: Vec<String> = labels
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();

        let opts = ListContainersOptions {
            all: true,
            filters: Some(HashMap::from([("label".to_string(), label_filters)])),
            ..Default::default()
        };

        let containers = self
            .client
            .list_containers(Some(opts))
            .await
            .map_err(map_docker_error)?;

        Ok(containers.into_iter().filter_map(|c| c.id).collect())
    }

    async fn remove_container(&self, id: &str) -> Result<(), BackendError> {
        let opts = RemoveContainerOptions {
            force: true,
            ..Default::default()
        };

        self.client
            .remove_container(id, Some(opts))
            .await
            .map_err(map_docker_error)
    }
}
