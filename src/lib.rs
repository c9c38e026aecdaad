// ABOUTME: Library root for berth - deploys container sets on Docker or Kubernetes.
// ABOUTME: The main binary is in main.rs.

pub mod backend;
pub mod config;
pub mod connection;
pub mod credentials;
pub mod error;
pub mod manager;
pub mod manifest;
pub mod types;

pub use manager::{ContainerManager, ManagerError, create_manager, manager_for};
