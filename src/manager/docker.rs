// ABOUTME: Container manager backed by the Docker Remote API.
// ABOUTME: Creates and starts one container per description; teardown removes by set label.

use super::ContainerManager;
use super::error::{ManagerError, TeardownSnafu};
use crate::backend::{BackendError, BollardDockerApi, DockerApi};
use crate::config::Engine;
use crate::connection::DockerConnection;
use crate::manifest::{self, ContainerGroup, GroupMember};
use crate::types::{ContainerSet, ResourceName};
use async_trait::async_trait;
use snafu::ResultExt;

pub struct DockerManager<A = BollardDockerApi> {
    connection: DockerConnection,
    api: A,
}

impl DockerManager<BollardDockerApi> {
    /// Build a manager with a bollard client for `connection`.
    pub fn connect(connection: DockerConnection) -> Result<Self, ManagerError> {
        let api = BollardDockerApi::connect(&connection)?;
        Ok(Self::new(connection, api))
    }
}

impl<A: DockerApi> DockerManager<A> {
    pub fn new(connection: DockerConnection, api: A) -> Self {
        Self { connection, api }
    }

    pub fn connection(&self) -> &DockerConnection {
        &self.connection
    }

    /// The container group that would be created for `set`.
    pub fn manifest(&self, set: &ContainerSet) -> ContainerGroup {
        manifest::container_group(set)
    }

    async fn run_member(
        &self,
        member: &GroupMember,
        created: &mut Vec<String>,
    ) -> Result<(), BackendError> {
        let id = self.api.create_container(member).await?;
        tracing::debug!(container = %member.name, %id, "container created");
        created.push(id.clone());
        self.api.start_container(&id).await
    }

    /// Remove containers left behind by a partially deployed group.
    async fn discard(&self, created: &[String]) {
        for id in created {
            if let Err(e) = self.api.remove_container(id).await {
                tracing::warn!(%id, error = %e, "failed to remove partially deployed container");
            }
        }
    }
}

#[async_trait]
impl<A: DockerApi> ContainerManager for DockerManager<A> {
    fn engine(&self) -> Engine {
        Engine::Docker
    }

    async fn setup_and_run_container_set(
        &self,
        set: ContainerSet,
        namespace: &str,
    ) -> Result<ContainerSet, ManagerError> {
        tracing::debug!(set = %set.name, namespace, endpoint = %self.connection.endpoint(), "deploying container group");

        let group = self.manifest(&set);
        let mut created = Vec::with_capacity(group.members.len());

        for member in &group.members {
            if let Err(source) = self.run_member(member, &mut created).await {
                tracing::warn!(set = %set.name, container = %member.name, error = %source, "deployment failed");
                self.discard(&created).await;
                return Err(ManagerError::Deployment {
                    set: set.name.to_string(),
                    source,
                });
            }
        }

        tracing::info!(set = %set.name, containers = created.len(), "container set deployed");
        Ok(set)
    }

    async fn kill_and_remove_container_set(&self, id: &ResourceName) -> Result<i32, ManagerError> {
        let containers = self
            .api
            .list_containers(&manifest::docker::set_labels(id.as_str()))
            .await
            .context(TeardownSnafu { id: id.as_str() })?;

        if containers.is_empty() {
            return Err(ManagerError::Teardown {
                id: id.to_string(),
                source: BackendError::NotFound(format!("no containers for set {}", id)),
            });
        }

        let mut first_error = None;
        for container in &containers {
            if let Err(e) = self.api.remove_container(container).await {
                tracing::warn!(set = %id, %container, error = %e, "failed to remove container");
                first_error.get_or_insert(e);
            }
        }

        if let Some(source) = first_error {
            return Err(ManagerError::Teardown {
                id: id.to_string(),
                source,
            });
        }

        tracing::info!(set = %id, containers = containers.len(), "container set removed");
        Ok(0)
    }
}
