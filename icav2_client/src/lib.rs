//! Minimal client for the analysis platform's project and storage configuration apis

use anyhow::Context;
use orcabus_env::Environment;
use orcabus_env_var::env_var;
use reqwest::StatusCode;
use secretsmanager_client::{LocalOrRemote, SecretManager};

pub const DEFAULT_BASE_URL: &str = "https://ica.illumina.com/ica/rest";

env_var! {
    pub struct Icav2BaseUrl;
}

env_var! {
    pub struct Icav2AccessTokenSecretId;
}

#[derive(thiserror::Error, Debug)]
pub enum Icav2Err {
    #[error("project {0} not found")]
    ProjectNotFound(String),
    #[error("project {0} is not backed by an s3 storage configuration")]
    NoStorageConfiguration(String),
    #[error("unexpected response {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Project {
    storage_configuration: Option<StorageConfigurationRef>,
}

#[derive(serde::Deserialize, Debug)]
struct StorageConfigurationRef {
    id: String,
}

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct StorageConfiguration {
    storage_configuration_details: StorageConfigurationDetails,
}

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct StorageConfigurationDetails {
    aws_s3: Option<AwsS3Details>,
}

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AwsS3Details {
    bucket_name: String,
    key_prefix: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Icav2Client {
    base_url: String,
    client: reqwest::Client,
}

impl Icav2Client {
    pub fn new(base_url: impl Into<String>, access_token: &str) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth: reqwest::header::HeaderValue = format!("Bearer {access_token}")
            .parse()
            .context("access token is not a valid header value")?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.illumina.v3+json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("could not build http client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Build a client for the current [Environment].
    ///
    /// `ICAV2_BASE_URL` overrides [DEFAULT_BASE_URL]. Deployed,
    /// `ICAV2_ACCESS_TOKEN_SECRET_ID` names the secret holding the access token;
    /// locally it holds the token itself.
    #[tracing::instrument(err, skip(secrets))]
    pub async fn from_env<S: SecretManager>(
        environment: Environment,
        secrets: &S,
    ) -> anyhow::Result<Self> {
        let base_url = Icav2BaseUrl::new()
            .map(|url| url.to_string())
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let token = match secrets
            .get_maybe_secret_value(environment, Icav2AccessTokenSecretId::new()?)
            .await
            .context("could not resolve icav2 access token")?
        {
            LocalOrRemote::Local(raw) => raw.as_ref().to_owned(),
            LocalOrRemote::Remote(secret) => secret.trim().to_string(),
        };

        Self::new(base_url, &token)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, Icav2Err> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(body=%body, status=%status, "unexpected response from icav2");
            return Err(Icav2Err::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(Some(response.json().await?))
    }

    /// The s3 uri that a project's data is stored under, always ending in `/`
    #[tracing::instrument(err, skip(self))]
    pub async fn get_s3_key_prefix_by_project_id(&self, project_id: &str) -> Result<String, Icav2Err> {
        let project: Project = self
            .get_json(&format!("api/projects/{project_id}"))
            .await?
            .ok_or_else(|| Icav2Err::ProjectNotFound(project_id.to_string()))?;

        let storage_id = project
            .storage_configuration
            .ok_or_else(|| Icav2Err::NoStorageConfiguration(project_id.to_string()))?
            .id;

        let storage: StorageConfiguration = self
            .get_json(&format!("api/storageConfigurations/{storage_id}"))
            .await?
            .ok_or_else(|| Icav2Err::NoStorageConfiguration(project_id.to_string()))?;

        let s3 = storage
            .storage_configuration_details
            .aws_s3
            .ok_or_else(|| Icav2Err::NoStorageConfiguration(project_id.to_string()))?;

        Ok(s3_uri(&s3.bucket_name, s3.key_prefix.as_deref()))
    }
}

fn s3_uri(bucket: &str, key_prefix: Option<&str>) -> String {
    match key_prefix.map(|p| p.trim_matches('/')).filter(|p| !p.is_empty()) {
        Some(prefix) => format!("s3://{bucket}/{prefix}/"),
        None => format!("s3://{bucket}/"),
    }
}
