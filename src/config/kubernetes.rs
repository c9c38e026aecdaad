// ABOUTME: Kubernetes API configuration section.
// ABOUTME: Cluster URL, security mode, and the namespace/replica defaults.

use super::tls::TlsConfiguration;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Token mounted into every pod running under a service account.
pub const SERVICE_ACCOUNT_TOKEN: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";

pub const DEFAULT_NAMESPACE: &str = "default";

/// Authentication strategy for the cluster connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityMode {
    /// No authentication material.
    None,
    /// Bearer token read from a file.
    Token,
    /// Mutual TLS with the `tls` section.
    Ca,
}

impl fmt::Display for SecurityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityMode::None => write!(f, "none"),
            SecurityMode::Token => write!(f, "token"),
            SecurityMode::Ca => write!(f, "ca"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesConfiguration {
    pub url: String,

    pub security_mode: SecurityMode,

    /// Token file, used when `securityMode` is `token`.
    #[serde(default)]
    pub token: Option<PathBuf>,

    /// Only consulted when `securityMode` is `ca`.
    #[serde(default)]
    pub tls: Option<TlsConfiguration>,

    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_replicas")]
    pub replicas: u32,

    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_replicas() -> u32 {
    1
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

impl KubernetesConfiguration {
    /// Token file to read in `token` mode, falling back to the service-account token.
    pub fn token_path(&self) -> &Path {
        self.token
            .as_deref()
            .unwrap_or_else(|| Path::new(SERVICE_ACCOUNT_TOKEN))
    }
}
