//! Authenticated client for the internal orcabus apis (fastq, workflow, filemanager)

use anyhow::Context;
use orcabus_env::Environment;
use orcabus_env_var::env_var;
use secretsmanager_client::SecretManager;
use ssm_client::ParameterStore;

mod config;
pub mod error;
pub mod fastq;
pub mod filemanager;
mod pagination;
pub mod workflow;

pub use config::parse_token_secret;
pub use error::OrcabusClientErr;

env_var! {
    pub struct HostnameSsmParameterName;
}

env_var! {
    pub struct OrcabusTokenSecretId;
}

/// the services this client talks to, each served from `{service}.{hostname}`
#[derive(Debug, Clone, Copy)]
pub(crate) enum Service {
    Fastq,
    Workflow,
    FileManager,
}

impl Service {
    fn subdomain(&self) -> &'static str {
        match self {
            Service::Fastq => "fastq",
            Service::Workflow => "workflow",
            Service::FileManager => "file",
        }
    }
}

#[derive(Clone)]
pub struct OrcabusApi {
    hostname: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for OrcabusApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrcabusApi")
            .field("hostname", &self.hostname)
            .finish_non_exhaustive()
    }
}

impl OrcabusApi {
    /// build a client which sends `token` as a bearer token on every request
    pub fn new(hostname: impl Into<String>, token: &str) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth: reqwest::header::HeaderValue = format!("Bearer {token}")
            .parse()
            .context("token is not a valid header value")?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("could not build http client")?;

        Ok(Self {
            hostname: hostname.into(),
            client,
        })
    }

    /// Resolve the hostname and jwt for the current [Environment] and build a client.
    ///
    /// Deployed, `HOSTNAME_SSM_PARAMETER_NAME` names an ssm parameter and
    /// `ORCABUS_TOKEN_SECRET_ID` names a secret holding `{"id_token": "..."}`.
    /// Locally both variables hold the values directly.
    #[tracing::instrument(err, skip(secrets, parameters))]
    pub async fn from_env<S, P>(
        environment: Environment,
        secrets: &S,
        parameters: &P,
    ) -> anyhow::Result<Self>
    where
        S: SecretManager,
        P: ParameterStore,
    {
        let hostname = parameters
            .get_maybe_parameter(environment, HostnameSsmParameterName::new()?)
            .await
            .context("could not resolve orcabus hostname")?;

        let token = match secrets
            .get_maybe_secret_value(environment, OrcabusTokenSecretId::new()?)
            .await
            .context("could not resolve orcabus token")?
        {
            secretsmanager_client::LocalOrRemote::Local(raw) => raw.as_ref().to_owned(),
            secretsmanager_client::LocalOrRemote::Remote(secret) => parse_token_secret(&secret)?,
        };

        Self::new(hostname.as_ref(), &token)
    }

    pub(crate) fn url(&self, service: Service, path: &str) -> String {
        format!(
            "https://{}.{}/api/v1/{}",
            service.subdomain(),
            self.hostname,
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_service_urls() {
        let api = OrcabusApi::new("dev.umccr.org", "jwt").unwrap();
        assert_eq!(
            api.url(Service::Fastq, "/fastq"),
            "https://fastq.dev.umccr.org/api/v1/fastq"
        );
        assert_eq!(
            api.url(Service::FileManager, "s3/presign/abc"),
            "https://file.dev.umccr.org/api/v1/s3/presign/abc"
        );
    }
}
