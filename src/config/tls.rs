// ABOUTME: TLS file locations shared by the Docker and Kubernetes sections.
// ABOUTME: Files are read once when a manager is built, never reloaded.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TlsConfiguration {
    /// CA certificate (PEM file).
    pub ca: PathBuf,
    /// Client certificate (PEM file).
    pub cert: PathBuf,
    /// Client key (PEM file).
    pub key: PathBuf,
    /// Key passphrase. An empty string means the key is not encrypted.
    #[serde(default)]
    pub passphrase: Option<String>,
}

impl TlsConfiguration {
    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref().filter(|p| !p.is_empty())
    }
}
