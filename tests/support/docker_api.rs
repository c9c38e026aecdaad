// ABOUTME: In-memory Docker daemon for manager tests.
// ABOUTME: Tracks created containers, their labels and state; failures can be injected.

use async_trait::async_trait;
use berth::backend::{BackendError, DockerApi};
use berth::manifest::GroupMember;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct MockContainer {
    pub id: String,
    pub name: String,
    pub member: GroupMember,
    pub running: bool,
}

#[derive(Default)]
struct DaemonState {
    containers: Vec<MockContainer>,
    next_id: usize,
    fail_create: Option<String>,
    fail_remove: bool,
    fail_remove_of: Option<String>,
}

/// Clones share the same daemon state.
#[derive(Clone, Default)]
pub struct MockDockerApi {
    state: Arc<Mutex<DaemonState>>,
}

impl MockDockerApi {
    /// Make creating the container named `name` fail with a server error.
    pub fn failing_create(name: &str) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().fail_create = Some(name.to_string());
        api
    }

    pub fn fail_removals(&self) {
        self.state.lock().unwrap().fail_remove = true;
    }

    /// Make removing the container named `name` fail; other removals succeed.
    pub fn fail_removal_of(&self, name: &str) {
        self.state.lock().unwrap().fail_remove_of = Some(name.to_string());
    }

    pub fn containers(&self) -> Vec<MockContainer> {
        self.state.lock().unwrap().containers.clone()
    }
}

#[async_trait]
impl DockerApi for MockDockerApi {
    async fn create_container(&self, member: &GroupMember) -> Result<String, BackendError> {
        let name = member.name.as_str();
        let mut state = self.state.lock().unwrap();
        if state.fail_create.as_deref() == Some(name) {
            return Err(BackendError::from_status(500, format!("cannot create {}", name)));
        }
        if state.containers.iter().any(|c| c.name == name) {
            return Err(BackendError::Conflict(format!("name {} is already in use", name)));
        }

        state.next_id += 1;
        let id = format!("c{:04}", state.next_id);
        state.containers.push(MockContainer {
            id: id.clone(),
            name: name.to_string(),
            member: member.clone(),
            running: false,
        });
        Ok(id)
    }

    async fn start_container(&self, id: &str) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        match state.containers.iter_mut().find(|c| c.id == id) {
            Some(container) => {
                container.running = true;
                Ok(())
            }
            None => Err(BackendError::NotFound(format!("no such container: {}", id))),
        }
    }

    async fn list_containers(
        &self,
        labels: &BTreeMap<String, String>,
    ) -> Result<Vec<String>, BackendError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .containers
            .iter()
            .filter(|c| labels.iter().all(|(k, v)| c.member.labels.get(k) == Some(v)))
            .map(|c| c.id.clone())
            .collect())
    }

    async fn remove_container(&self, id: &str) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_remove {
            return Err(BackendError::from_status(500, "removal in progress"));
        }
        let name = state
            .containers
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone());
        if name.is_some() && name == state.fail_remove_of {
            return Err(BackendError::from_status(500, format!("cannot remove {}", id)));
        }
        let before = state.containers.len();
        state.containers.retain(|c| c.id != id);
        if state.containers.len() == before {
            return Err(BackendError::NotFound(format!("no such container: {}", id)));
        }
        Ok(())
    }
}
