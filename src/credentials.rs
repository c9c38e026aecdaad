// ABOUTME: Reads certificate, key and token material from disk.
// ABOUTME: Any unreadable file is an error; nothing falls back to empty credentials.

use crate::config::TlsConfiguration;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which credential file an operation was reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    CertificateAuthority,
    Certificate,
    Key,
    Token,
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialKind::CertificateAuthority => write!(f, "CA certificate"),
            CredentialKind::Certificate => write!(f, "client certificate"),
            CredentialKind::Key => write!(f, "client key"),
            CredentialKind::Token => write!(f, "bearer token"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialLoadError {
    #[error("failed to read {kind} file {}: {source}", path.display())]
    Read {
        kind: CredentialKind,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{kind} file {} is empty", path.display())]
    Empty { kind: CredentialKind, path: PathBuf },
}

impl CredentialLoadError {
    pub fn kind(&self) -> CredentialKind {
        match self {
            CredentialLoadError::Read { kind, .. } | CredentialLoadError::Empty { kind, .. } => {
                *kind
            }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            CredentialLoadError::Read { path, .. } | CredentialLoadError::Empty { path, .. } => {
                path
            }
        }
    }
}

/// PEM material for mutual TLS, held in memory for the manager's lifetime.
#[derive(Clone, PartialEq, Eq)]
pub struct TlsMaterial {
    pub ca: String,
    pub cert: String,
    pub key: String,
    pub passphrase: Option<String>,
}

impl fmt::Debug for TlsMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsMaterial")
            .field("ca", &format_args!("<{} bytes>", self.ca.len()))
            .field("cert", &format_args!("<{} bytes>", self.cert.len()))
            .field("key", &"<redacted>")
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A bearer token for API authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Read the CA, certificate and key named by `config`. Contents are kept verbatim.
pub fn load_tls(config: &TlsConfiguration) -> Result<TlsMaterial, CredentialLoadError> {
    Ok(TlsMaterial {
        ca: read_credential(CredentialKind::CertificateAuthority, &config.ca)?,
        cert: read_credential(CredentialKind::Certificate, &config.cert)?,
        key: read_credential(CredentialKind::Key, &config.key)?,
        passphrase: config.passphrase().map(str::to_string),
    })
}

/// Read a bearer token. Surrounding whitespace, such as a trailing newline, is dropped.
pub fn load_token(path: &Path) -> Result<BearerToken, CredentialLoadError> {
    let raw = read_credential(CredentialKind::Token, path)?;
    let token = raw.trim();
    if token.is_empty() {
        return Err(CredentialLoadError::Empty {
            kind: CredentialKind::Token,
            path: path.to_path_buf(),
        });
    }
    Ok(BearerToken::new(token))
}

fn read_credential(kind: CredentialKind, path: &Path) -> Result<String, CredentialLoadError> {
    tracing::debug!(%kind, path = %path.display(), "reading credential file");
    std::fs::read_to_string(path).map_err(|source| CredentialLoadError::Read {
        kind,
        path: path.to_path_buf(),
        source,
    })
}
