use std::path::Path;

use reqwest::{Certificate, Client, RequestBuilder, Response};
use url::Url;

use crate::auth::Token;
use crate::error::{JobkeeperError, Result};

const SERVICE_HOST_ENV: &str = "KUBERNETES_SERVICE_HOST";
const SERVICE_PORT_ENV: &str = "KUBERNETES_SERVICE_PORT";
const SERVICE_ACCOUNT_DIR: &str = "/var/run/secrets/kubernetes.io/serviceaccount";

/// Minimal Kubernetes API client covering the job and namespace collections.
#[derive(Clone)]
pub struct KubeClient {
    pub(super) client: Client,
    base_url: Url,
    token: Option<Token>,
}

impl KubeClient {
    /// Builds a client against an arbitrary API server endpoint.
    pub fn new(base_url: &str, token: Option<Token>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("jobkeeper/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| JobkeeperError::Config(format!("Failed to create HTTP client: {e}")))?;

        let base_url = Url::parse(base_url)
            .map_err(|e| JobkeeperError::Config(format!("Invalid API server URL: {e}")))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Builds a client from the pod's own service account, the way an
    /// in-cluster process reaches its API server: `KUBERNETES_SERVICE_HOST`
    /// and `KUBERNETES_SERVICE_PORT` plus the mounted token and cluster CA.
    pub fn in_cluster() -> Result<Self> {
        let host = require_env(SERVICE_HOST_ENV)?;
        let port = require_env(SERVICE_PORT_ENV)?;
        Self::from_service_account(&format!("https://{host}:{port}"), Path::new(SERVICE_ACCOUNT_DIR))
    }

    fn from_service_account(base_url: &str, dir: &Path) -> Result<Self> {
        let token = std::fs::read_to_string(dir.join("token")).map_err(|e| {
            JobkeeperError::Config(format!("Could not read service account token: {e}"))
        })?;

        let ca_pem = std::fs::read(dir.join("ca.crt")).map_err(|e| {
            JobkeeperError::Config(format!("Could not read cluster CA certificate: {e}"))
        })?;
        let ca = Certificate::from_pem(&ca_pem).map_err(|e| {
            JobkeeperError::Config(format!("Invalid cluster CA certificate: {e}"))
        })?;

        let client = Client::builder()
            .user_agent(concat!("jobkeeper/", env!("CARGO_PKG_VERSION")))
            .add_root_certificate(ca)
            .build()
            .map_err(|e| JobkeeperError::Config(format!("Failed to create HTTP client: {e}")))?;

        let base_url = Url::parse(base_url)
            .map_err(|e| JobkeeperError::Config(format!("Invalid API server URL: {e}")))?;

        Ok(Self {
            client,
            base_url,
            token: Some(Token::from(token)),
        })
    }

    pub(super) fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| JobkeeperError::Config(format!("Invalid API path {path}: {e}")))
    }

    fn auth_request(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.token {
            request.bearer_auth(token.as_str())
        } else {
            request
        }
    }

    /// Sends a request, mapping any non-success status to an `Api` error
    /// carrying the server's response text.
    pub(super) async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.auth_request(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(JobkeeperError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| {
        JobkeeperError::Config(format!("{name} is not set; not running inside a cluster?"))
    })
}
