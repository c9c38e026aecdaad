// ABOUTME: Backend-native request bodies built from a container set.
// ABOUTME: Translation does no I/O and always yields the same output for the same set.

pub mod docker;
pub mod kubernetes;

pub use docker::{ContainerGroup, GroupMember, container_group};
pub use kubernetes::{Deployment, deployment};
