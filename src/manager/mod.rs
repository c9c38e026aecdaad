// ABOUTME: The container manager contract and its Docker and Kubernetes drivers.
// ABOUTME: A factory keyed on the configured engine picks the driver once at startup.

mod docker;
mod error;
mod kubernetes;

pub use docker::DockerManager;
pub use error::{ManagerError, ManagerErrorKind};
pub use kubernetes::KubernetesManager;

use crate::config::{Engine, ManagerConfiguration};
use crate::connection::ConnectionHandle;
use crate::types::{ContainerSet, ResourceName};
use async_trait::async_trait;

/// Deploys and tears down container sets on one backend.
///
/// Each call sends its request and completes when the backend acknowledges it.
/// Nothing is retried, and acknowledgment is not readiness: the backend may still
/// be converging when a deploy returns. Concurrent calls are independent and may
/// complete in any order.
#[async_trait]
pub trait ContainerManager: Send + Sync {
    /// The backend this manager drives.
    fn engine(&self) -> Engine;

    /// Submit `set` and return it unchanged once the backend accepts it.
    ///
    /// `namespace` is informational; requests go to the namespace fixed by configuration.
    async fn setup_and_run_container_set(
        &self,
        set: ContainerSet,
        namespace: &str,
    ) -> Result<ContainerSet, ManagerError>;

    /// Delete the container set `id`. Resolves to `0` on success.
    async fn kill_and_remove_container_set(&self, id: &ResourceName) -> Result<i32, ManagerError>;
}

/// Build the manager selected by `config.engine`.
///
/// Fails if the engine's section is missing or any credential file cannot be read.
pub fn create_manager(
    config: &ManagerConfiguration,
) -> Result<Box<dyn ContainerManager>, ManagerError> {
    manager_for(ConnectionHandle::build(config)?)
}

/// Build the driver for an already resolved connection handle.
pub fn manager_for(handle: ConnectionHandle) -> Result<Box<dyn ContainerManager>, ManagerError> {
    match handle {
        ConnectionHandle::Docker(connection) => Ok(Box::new(DockerManager::connect(connection)?)),
        ConnectionHandle::Kubernetes(connection) => {
            Ok(Box::new(KubernetesManager::connect(connection)?))
        }
    }
}
