// ABOUTME: Integration tests for building connection handles from configuration.
// ABOUTME: Covers each security mode, credential failures and docker endpoints.

mod support;

use berth::config::{DockerEndpoint, ManagerConfiguration};
use berth::connection::{ConnectionHandle, GROUP_VERSION, KubernetesAuth};
use berth::credentials::CredentialKind;
use berth::manager::{ManagerError, ManagerErrorKind};
use berth::config::Engine;
use support::fixtures::{CA_PEM, CERT_PEM, KEY_PEM, write_tls_files};

fn build(yaml: &str) -> Result<ConnectionHandle, ManagerError> {
    ConnectionHandle::build(&ManagerConfiguration::from_yaml(yaml).unwrap())
}

mod kubernetes {
    use super::*;

    #[test]
    fn none_mode_has_no_auth_material() {
        let handle = build(
            r#"
engine: kubernetes
kubernetes:
  url: https://k8s.local
  securityMode: none
"#,
        )
        .unwrap();

        let ConnectionHandle::Kubernetes(conn) = handle else {
            panic!("expected a kubernetes handle");
        };
        assert_eq!(conn.auth(), &KubernetesAuth::None);
        assert!(conn.token().is_none());
        assert!(conn.tls().is_none());
        assert_eq!(conn.group_version(), GROUP_VERSION);
        assert_eq!(conn.namespace().as_str(), "default");
    }

    #[test]
    fn ca_mode_holds_file_contents_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        write_tls_files(dir.path());
        let yaml = format!(
            r#"
engine: kubernetes
kubernetes:
  url: https://k8s.local
  securityMode: ca
  tls:
    ca: {dir}/ca.pem
    cert: {dir}/cert.pem
    key: {dir}/key.pem
"#,
            dir = dir.path().display()
        );

        let handle = build(&yaml).unwrap();
        assert_eq!(handle.auth_mode(), "ca");

        let ConnectionHandle::Kubernetes(conn) = handle else {
            panic!("expected a kubernetes handle");
        };
        let tls = conn.tls().unwrap();
        assert_eq!(tls.ca, CA_PEM);
        assert_eq!(tls.cert, CERT_PEM);
        assert_eq!(tls.key, KEY_PEM);
        assert!(conn.token().is_none());
    }

    #[test]
    fn ca_mode_without_tls_section_fails() {
        let err = build(
            r#"
engine: kubernetes
kubernetes:
  url: https://k8s.local
  securityMode: ca
"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ManagerErrorKind::Configuration);
    }

    #[test]
    fn ca_mode_with_unreadable_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_tls_files(dir.path());
        let yaml = format!(
            r#"
engine: kubernetes
kubernetes:
  url: https://k8s.local
  securityMode: ca
  tls:
    ca: {dir}/ca.pem
    cert: {dir}/cert.pem
    key: {dir}/missing.pem
"#,
            dir = dir.path().display()
        );

        match build(&yaml).unwrap_err() {
            ManagerError::CredentialLoad { source } => {
                assert_eq!(source.kind(), CredentialKind::Key);
            }
            other => panic!("expected a credential error, got {other}"),
        }
    }

    #[test]
    fn token_mode_reads_the_token() {
        let dir = tempfile::tempdir().unwrap();
        let token = dir.path().join("token");
        std::fs::write(&token, "eyJhbGciOi\n").unwrap();
        let yaml = format!(
            r#"
engine: kubernetes
kubernetes:
  url: https://k8s.local
  securityMode: token
  token: {}
"#,
            token.display()
        );

        let ConnectionHandle::Kubernetes(conn) = build(&yaml).unwrap() else {
            panic!("expected a kubernetes handle");
        };
        assert_eq!(conn.token().unwrap().as_str(), "eyJhbGciOi");
        assert!(conn.tls().is_none());
    }

    #[test]
    fn token_mode_with_unreadable_token_fails() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = format!(
            r#"
engine: kubernetes
kubernetes:
  url: https://k8s.local
  securityMode: token
  token: {}/absent
"#,
            dir.path().display()
        );

        let err = build(&yaml).unwrap_err();
        assert_eq!(err.kind(), ManagerErrorKind::CredentialLoad);
        match err {
            ManagerError::CredentialLoad { source } => {
                assert_eq!(source.kind(), CredentialKind::Token);
            }
            other => panic!("expected a credential error, got {other}"),
        }
    }

    #[test]
    fn tls_section_is_ignored_outside_ca_mode() {
        let yaml = r#"
engine: kubernetes
kubernetes:
  url: https://k8s.local
  securityMode: none
  tls:
    ca: /nonexistent/ca.pem
    cert: /nonexistent/cert.pem
    key: /nonexistent/key.pem
"#;
        let handle = build(yaml).unwrap();
        assert_eq!(handle.auth_mode(), "none");
    }

    #[test]
    fn invalid_namespace_fails() {
        let err = build(
            r#"
engine: kubernetes
kubernetes:
  url: https://k8s.local
  securityMode: none
  namespace: Team_A
"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ManagerErrorKind::Configuration);
        assert!(err.to_string().contains("Team_A"));
    }
}

mod docker {
    use super::*;

    #[test]
    fn socket_without_tls() {
        let handle = build(
            r#"
engine: docker
docker:
  type: socket
  socket: /var/run/docker.sock
"#,
        )
        .unwrap();
        assert_eq!(handle.engine(), Engine::Docker);
        assert_eq!(handle.auth_mode(), "none");

        let ConnectionHandle::Docker(conn) = handle else {
            panic!("expected a docker handle");
        };
        assert!(conn.tls().is_none());
        assert_eq!(
            conn.endpoint(),
            &DockerEndpoint::Socket("/var/run/docker.sock".into())
        );
    }

    #[test]
    fn swarm_with_tls_loads_material() {
        let dir = tempfile::tempdir().unwrap();
        write_tls_files(dir.path());
        let yaml = format!(
            r#"
engine: docker
docker:
  type: swarm
  swarm:
    host: swarm.local
    port: 2376
  tls:
    ca: {dir}/ca.pem
    cert: {dir}/cert.pem
    key: {dir}/key.pem
"#,
            dir = dir.path().display()
        );

        let ConnectionHandle::Docker(conn) = build(&yaml).unwrap() else {
            panic!("expected a docker handle");
        };
        assert_eq!(conn.endpoint().address(), "tcp://swarm.local:2376");
        assert_eq!(conn.tls().unwrap().cert, CERT_PEM);
        assert_eq!(conn.tls_files().unwrap().key, dir.path().join("key.pem"));
    }

    #[test]
    fn missing_tls_file_fails_construction() {
        let yaml = r#"
engine: docker
docker:
  type: socket
  socket: /var/run/docker.sock
  tls:
    ca: /nonexistent/ca.pem
    cert: /nonexistent/cert.pem
    key: /nonexistent/key.pem
"#;
        let err = build(yaml).unwrap_err();
        assert_eq!(err.kind(), ManagerErrorKind::CredentialLoad);
    }

    #[test]
    fn missing_docker_section_fails() {
        let err = build("engine: docker\n").unwrap_err();
        assert_eq!(err.kind(), ManagerErrorKind::Configuration);
        assert!(err.to_string().contains("docker"));
    }
}
