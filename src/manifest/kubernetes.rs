// ABOUTME: Translates a container set into a Kubernetes Deployment manifest.
// ABOUTME: Pure and deterministic; labels use ordered maps so output bytes are stable.

use crate::connection::GROUP_VERSION;
use crate::types::ContainerSet;
use serde::Serialize;
use std::collections::BTreeMap;

/// Label carrying the container set name on the deployment and its pods.
pub const NAME_LABEL: &str = "name";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: DeploymentSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentSpec {
    pub replicas: u32,
    pub template: PodTemplateSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodTemplateSpec {
    pub metadata: ObjectMeta,
    pub spec: PodSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    pub containers: Vec<ContainerTemplate>,
    pub restart_policy: PodRestartPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerTemplate {
    pub name: String,
    pub image: String,
    pub image_pull_policy: PullPolicy,
}

/// Images are expected on the nodes already.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PullPolicy {
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PodRestartPolicy {
    Always,
}

/// Build the Deployment for `set`, one container template per container, in order.
pub fn deployment(set: &ContainerSet, replicas: u32) -> Deployment {
    let labels = BTreeMap::from([(NAME_LABEL.to_string(), set.name.to_string())]);

    let containers = set
        .containers
        .iter()
        .map(|c| ContainerTemplate {
            name: c.name.to_string(),
            image: c.image.to_string(),
            image_pull_policy: PullPolicy::Never,
        })
        .collect();

    Deployment {
        api_version: GROUP_VERSION.to_string(),
        kind: "Deployment".to_string(),
        metadata: ObjectMeta {
            name: Some(set.name.to_string()),
            labels: labels.clone(),
        },
        spec: DeploymentSpec {
            replicas,
            template: PodTemplateSpec {
                metadata: ObjectMeta { name: None, labels },
                spec: PodSpec {
                    containers,
                    restart_policy: PodRestartPolicy::Always,
                },
            },
        },
    }
}
