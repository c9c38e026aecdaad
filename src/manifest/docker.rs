// ABOUTME: Translates a container set into Docker container create requests.
// ABOUTME: One container per description, labelled with its set in key order.

use crate::types::{Container, ContainerSet};
use serde::Serialize;
use std::collections::BTreeMap;

pub const SET_LABEL: &str = "berth.set";
pub const CONTAINER_LABEL: &str = "berth.container";
pub const MANAGED_LABEL: &str = "berth.managed";

/// The Docker counterpart of a Deployment: the containers of one set, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerGroup {
    pub set: String,
    pub members: Vec<GroupMember>,
}

/// One container to create. Every member restarts always.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupMember {
    /// Docker container name, `{set}-{container}`.
    pub name: String,
    pub image: String,
    pub labels: BTreeMap<String, String>,
}

pub fn container_group(set: &ContainerSet) -> ContainerGroup {
    let members = set
        .containers
        .iter()
        .map(|container| GroupMember {
            name: container_name(set, container),
            image: container.image.to_string(),
            labels: member_labels(set, container),
        })
        .collect();

    ContainerGroup {
        set: set.name.to_string(),
        members,
    }
}

pub fn container_name(set: &ContainerSet, container: &Container) -> String {
    format!("{}-{}", set.name, container.name)
}

/// Label filter matching every container that belongs to the set `id`.
pub fn set_labels(id: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (SET_LABEL.to_string(), id.to_string()),
        (MANAGED_LABEL.to_string(), "true".to_string()),
    ])
}

fn member_labels(set: &ContainerSet, container: &Container) -> BTreeMap<String, String> {
    let mut labels = set_labels(set.name.as_str());
    labels.insert(CONTAINER_LABEL.to_string(), container.name.to_string());
    labels
}
