// ABOUTME: Container manager backed by a Kubernetes cluster.
// ABOUTME: Each container set becomes one Deployment in the configured namespace.

use super::ContainerManager;
use super::error::{DeploymentSnafu, ManagerError, TeardownSnafu};
use crate::backend::{HttpKubernetesApi, KubernetesApi};
use crate::config::Engine;
use crate::connection::KubernetesConnection;
use crate::manifest::{self, Deployment};
use crate::types::{ContainerSet, ResourceName};
use async_trait::async_trait;
use snafu::ResultExt;

pub struct KubernetesManager<A = HttpKubernetesApi> {
    connection: KubernetesConnection,
    api: A,
}

impl KubernetesManager<HttpKubernetesApi> {
    /// Build a manager with the reqwest client for `connection`.
    pub fn connect(connection: KubernetesConnection) -> Result<Self, ManagerError> {
        let api = HttpKubernetesApi::new(&connection)?;
        Ok(Self::new(connection, api))
    }
}

impl<A: KubernetesApi> KubernetesManager<A> {
    pub fn new(connection: KubernetesConnection, api: A) -> Self {
        Self { connection, api }
    }

    pub fn connection(&self) -> &KubernetesConnection {
        &self.connection
    }

    /// The Deployment that would be submitted for `set`.
    pub fn manifest(&self, set: &ContainerSet) -> Deployment {
        manifest::deployment(set, self.connection.replicas())
    }
}

#[async_trait]
impl<A: KubernetesApi> ContainerManager for KubernetesManager<A> {
    fn engine(&self) -> Engine {
        Engine::Kubernetes
    }

    async fn setup_and_run_container_set(
        &self,
        set: ContainerSet,
        namespace: &str,
    ) -> Result<ContainerSet, ManagerError> {
        let target = self.connection.namespace().as_str();
        if namespace != target {
            tracing::debug!(
                requested = namespace,
                configured = target,
                "deploying to the configured namespace"
            );
        }

        let deployment = self.manifest(&set);
        let response = self
            .api
            .create_deployment(target, &deployment)
            .await
            .inspect_err(|e| tracing::warn!(set = %set.name, error = %e, "deployment failed"))
            .context(DeploymentSnafu {
                set: set.name.as_str(),
            })?;

        tracing::debug!(set = %set.name, %response, "deployment accepted");
        tracing::info!(set = %set.name, namespace = target, "container set deployed");
        Ok(set)
    }

    async fn kill_and_remove_container_set(&self, id: &ResourceName) -> Result<i32, ManagerError> {
        let target = self.connection.namespace().as_str();
        let response = self
            .api
            .delete_deployment(target, id.as_str())
            .await
            .inspect_err(|e| tracing::warn!(set = %id, error = %e, "teardown failed"))
            .context(TeardownSnafu { id: id.as_str() })?;

        tracing::debug!(set = %id, %response, "deletion accepted");
        tracing::info!(set = %id, namespace = target, "container set removed");
        Ok(0)
    }
}
