// ABOUTME: Backend-agnostic description of a group of containers.
// ABOUTME: A container set is deployed and torn down as one unit.

use super::image_ref::ImageRef;
use super::resource_name::ResourceName;
use nonempty::NonEmpty;
use serde::{Deserialize, Deserializer};

/// A single container within a set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Container {
    pub name: ResourceName,
    pub image: ImageRef,
}

impl Container {
    pub fn new(name: ResourceName, image: ImageRef) -> Self {
        Self { name, image }
    }
}

/// A named, ordered, non-empty group of containers.
///
/// Container order is significant: manifests list containers in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContainerSet {
    pub name: ResourceName,
    #[serde(deserialize_with = "deserialize_containers")]
    pub containers: NonEmpty<Container>,
}

impl ContainerSet {
    pub fn new(name: ResourceName, containers: NonEmpty<Container>) -> Self {
        Self { name, containers }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

fn deserialize_containers<'de, D>(deserializer: D) -> Result<NonEmpty<Container>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<Container> = Vec::deserialize(deserializer)?;
    NonEmpty::from_vec(values)
        .ok_or_else(|| serde::de::Error::custom("a container set needs at least one container"))
}
