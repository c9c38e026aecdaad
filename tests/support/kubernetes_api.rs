// ABOUTME: Recording stand-in for the Kubernetes deployments API.
// ABOUTME: Captures submitted manifests and replays configured responses.

use async_trait::async_trait;
use berth::backend::{BackendError, KubernetesApi};
use berth::manifest::Deployment;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum KubeCall {
    Create { namespace: String, body: Value },
    Delete { namespace: String, name: String },
}

/// Clones share the recorded calls, so a test can keep one and hand the other to a manager.
#[derive(Clone)]
pub struct MockKubernetesApi {
    calls: Arc<Mutex<Vec<KubeCall>>>,
    create_response: Result<Value, BackendError>,
    delete_response: Result<Value, BackendError>,
}

impl MockKubernetesApi {
    pub fn accepting() -> Self {
        Self {
            calls: Arc::default(),
            create_response: Ok(json!({ "kind": "Deployment" })),
            delete_response: Ok(json!({ "kind": "Status", "status": "Success" })),
        }
    }

    pub fn rejecting(error: BackendError) -> Self {
        Self {
            create_response: Err(error.clone()),
            delete_response: Err(error),
            ..Self::accepting()
        }
    }

    pub fn with_delete_response(mut self, response: Value) -> Self {
        self.delete_response = Ok(response);
        self
    }

    pub fn calls(&self) -> Vec<KubeCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                KubeCall::Create { body, .. } => Some(body),
                KubeCall::Delete { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl KubernetesApi for MockKubernetesApi {
    async fn create_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> Result<Value, BackendError> {
        // Yield so concurrent callers interleave.
        tokio::task::yield_now().await;
        self.calls.lock().unwrap().push(KubeCall::Create {
            namespace: namespace.to_string(),
            body: serde_json::to_value(deployment).unwrap(),
        });
        self.create_response.clone()
    }

    async fn delete_deployment(&self, namespace: &str, name: &str) -> Result<Value, BackendError> {
        self.calls.lock().unwrap().push(KubeCall::Delete {
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
        self.delete_response.clone()
    }
}
