// ABOUTME: Errors raised while turning a parsed configuration into a manager.
// ABOUTME: All of them are fatal at construction time.

use super::Engine;
use crate::types::ResourceNameError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("engine '{0}' is selected but its configuration section is missing")]
    MissingEngineConfig(Engine),

    #[error("docker access type 'socket' requires a socket path")]
    MissingSocketPath,

    #[error("docker access type 'swarm' requires a swarm host and port")]
    MissingSwarm,

    #[error("kubernetes security mode 'ca' requires a tls section")]
    MissingTls,

    #[error("invalid kubernetes url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid kubernetes namespace '{namespace}': {source}")]
    InvalidNamespace {
        namespace: String,
        source: ResourceNameError,
    },

    #[error("encrypted client keys are not supported, provide an unencrypted key")]
    EncryptedKeyUnsupported,

    #[error("invalid TLS material: {0}")]
    InvalidTls(String),

    #[error("failed to initialise {engine} client: {reason}")]
    Client { engine: Engine, reason: String },
}
