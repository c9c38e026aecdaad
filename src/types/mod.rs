// ABOUTME: Validated domain types shared by every backend.
// ABOUTME: Container sets, their containers, names and image references.

mod container_set;
mod image_ref;
mod resource_name;

pub use container_set::{Container, ContainerSet};
pub use image_ref::{ImageRef, ParseImageRefError};
pub use resource_name::{ResourceName, ResourceNameError};
