// ABOUTME: Kubernetes deployments API client built on reqwest.
// ABOUTME: Applies bearer or client-certificate auth and maps error statuses.

use super::BackendError;
use crate::config::{ConfigurationError, Engine};
use crate::connection::{KubernetesAuth, KubernetesConnection};
use crate::credentials::TlsMaterial;
use crate::manifest::Deployment;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Create and delete calls against the deployments resource.
#[async_trait]
pub trait KubernetesApi: Send + Sync {
    /// Submit `deployment` to `namespace`. Returns the API server's response body.
    async fn create_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> Result<Value, BackendError>;

    /// Delete the deployment `name` in `namespace`. Returns the API server's response body.
    async fn delete_deployment(&self, namespace: &str, name: &str) -> Result<Value, BackendError>;
}

/// Subset of the `Status` object the API server returns on failure.
#[derive(Debug, Deserialize)]
struct StatusBody {
    message: Option<String>,
}

pub struct HttpKubernetesApi {
    client: reqwest::Client,
    connection: KubernetesConnection,
}

impl HttpKubernetesApi {
    pub fn new(connection: &KubernetesConnection) -> Result<Self, ConfigurationError> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(connection.timeout());

        if let KubernetesAuth::ClientCertificate(tls) = connection.auth() {
            let (ca, identity) = tls_identity(tls)?;
            builder = builder.add_root_certificate(ca).identity(identity);
        }

        let client = builder.build().map_err(|e| ConfigurationError::Client {
            engine: Engine::Kubernetes,
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            connection: connection.clone(),
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.connection.token() {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, BackendError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        tracing::debug!(status = status.as_u16(), %body, "kubernetes response");

        if status.is_success() {
            // Deletes may answer with an empty body.
            Ok(serde_json::from_str(&body).unwrap_or(Value::Null))
        } else {
            Err(status_error(status.as_u16(), &body))
        }
    }
}

fn tls_identity(
    tls: &TlsMaterial,
) -> Result<(reqwest::Certificate, reqwest::Identity), ConfigurationError> {
    if tls.passphrase.is_some() {
        return Err(ConfigurationError::EncryptedKeyUnsupported);
    }

    let ca = reqwest::Certificate::from_pem(tls.ca.as_bytes())
        .map_err(|e| ConfigurationError::InvalidTls(format!("CA certificate: {}", e)))?;

    let mut pem = tls.cert.clone();
    if !pem.ends_with('\n') {
        pem.push('\n');
    }
    pem.push_str(&tls.key);

    let identity = reqwest::Identity::from_pem(pem.as_bytes())
        .map_err(|e| ConfigurationError::InvalidTls(format!("client identity: {}", e)))?;

    Ok((ca, identity))
}

fn status_error(status: u16, body: &str) -> BackendError {
    let message = serde_json::from_str::<StatusBody>(body)
        .ok()
        .and_then(|s| s.message)
        .unwrap_or_else(|| body.trim().to_string());
    BackendError::from_status(status, message)
}

#[async_trait]
impl KubernetesApi for HttpKubernetesApi {
    async fn create_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> Result<Value, BackendError> {
        let url = self.connection.deployments_url(namespace);
        tracing::debug!(%url, "creating deployment");
        self.send(self.client.post(url).json(deployment)).await
    }

    async fn delete_deployment(&self, namespace: &str, name: &str) -> Result<Value, BackendError> {
        let url = self.connection.deployment_url(namespace, name);
        tracing::debug!(%url, "deleting deployment");
        self.send(self.client.delete(url)).await
    }
}
