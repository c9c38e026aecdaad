// ABOUTME: Resolved connection settings for a Kubernetes cluster.
// ABOUTME: Cluster URL, auth material chosen by security mode, and the target API group.

use crate::config::{ConfigurationError, KubernetesConfiguration, SecurityMode};
use crate::credentials::{self, BearerToken, TlsMaterial};
use crate::manager::ManagerError;
use crate::types::ResourceName;
use reqwest::Url;
use std::time::Duration;

/// API group/version every request and manifest targets.
pub const GROUP_VERSION: &str = "extensions/v1beta1";

/// Authentication material for the cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KubernetesAuth {
    None,
    Bearer(BearerToken),
    ClientCertificate(TlsMaterial),
}

impl KubernetesAuth {
    pub fn mode(&self) -> SecurityMode {
        match self {
            KubernetesAuth::None => SecurityMode::None,
            KubernetesAuth::Bearer(_) => SecurityMode::Token,
            KubernetesAuth::ClientCertificate(_) => SecurityMode::Ca,
        }
    }
}

/// Immutable once built; shared by every request a manager issues.
#[derive(Debug, Clone)]
pub struct KubernetesConnection {
    url: Url,
    group_version: &'static str,
    namespace: ResourceName,
    replicas: u32,
    timeout: Duration,
    auth: KubernetesAuth,
}

impl KubernetesConnection {
    pub fn from_config(config: &KubernetesConfiguration) -> Result<Self, ManagerError> {
        let url = parse_cluster_url(&config.url)?;
        let namespace = ResourceName::new(&config.namespace).map_err(|source| {
            ConfigurationError::InvalidNamespace {
                namespace: config.namespace.clone(),
                source,
            }
        })?;

        let auth = match config.security_mode {
            SecurityMode::None => KubernetesAuth::None,
            SecurityMode::Token => {
                tracing::info!("using access token");
                KubernetesAuth::Bearer(credentials::load_token(config.token_path())?)
            }
            SecurityMode::Ca => {
                tracing::info!("using client certificates and keys");
                let tls = config.tls.as_ref().ok_or(ConfigurationError::MissingTls)?;
                KubernetesAuth::ClientCertificate(credentials::load_tls(tls)?)
            }
        };

        Ok(Self {
            url,
            group_version: GROUP_VERSION,
            namespace,
            replicas: config.replicas,
            timeout: config.timeout,
            auth,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn group_version(&self) -> &str {
        self.group_version
    }

    pub fn namespace(&self) -> &ResourceName {
        &self.namespace
    }

    pub fn replicas(&self) -> u32 {
        self.replicas
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn auth(&self) -> &KubernetesAuth {
        &self.auth
    }

    pub fn token(&self) -> Option<&BearerToken> {
        match &self.auth {
            KubernetesAuth::Bearer(token) => Some(token),
            _ => None,
        }
    }

    pub fn tls(&self) -> Option<&TlsMaterial> {
        match &self.auth {
            KubernetesAuth::ClientCertificate(tls) => Some(tls),
            _ => None,
        }
    }

    /// `{url}/apis/{group}/{version}/namespaces/{namespace}/deployments`
    pub fn deployments_url(&self, namespace: &str) -> String {
        format!(
            "{}/apis/{}/namespaces/{}/deployments",
            self.url.as_str().trim_end_matches('/'),
            self.group_version,
            namespace
        )
    }

    pub fn deployment_url(&self, namespace: &str, name: &str) -> String {
        format!("{}/{}", self.deployments_url(namespace), name)
    }
}

fn parse_cluster_url(raw: &str) -> Result<Url, ConfigurationError> {
    let invalid = |reason: String| ConfigurationError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}
