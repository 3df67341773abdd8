use aws_sdk_secretsmanager as secretsmanager;
pub use orcabus_env::LocalOrRemote;
use orcabus_env::Environment;
use std::sync::Arc;
use thiserror::Error;

/// abstracts fetching a secret string from a remote secret store
pub trait SecretManager: Send + Sync {
    /// The error that can be returned from the store
    type Err: std::error::Error + Send + Sync + 'static;

    /// fetch the secret string stored under `secret_id`
    fn get_secret_value(
        &self,
        secret_id: &str,
    ) -> impl Future<Output = Result<Arc<str>, Self::Err>> + Send;

    /// in local mode return the variable itself, otherwise read the secret named by its value
    #[tracing::instrument(err, skip(self, var))]
    fn get_maybe_secret_value<T: AsRef<str> + Send>(
        &self,
        environment: Environment,
        var: T,
    ) -> impl Future<Output = Result<LocalOrRemote<T>, Self::Err>> + Send {
        async move {
            match environment {
                Environment::Local => Ok(LocalOrRemote::Local(var)),
                Environment::Production | Environment::Develop => Ok(LocalOrRemote::Remote(
                    self.get_secret_value(var.as_ref()).await?,
                )),
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct SecretsManagerClient {
    inner: secretsmanager::Client,
}

#[derive(Debug, Error)]
pub enum SecretErr {
    #[error("{0:?}")]
    AwsErr(#[from] aws_sdk_secretsmanager::Error),
    #[error("secret {0} has no string value")]
    NotPresent(String),
}

impl SecretsManagerClient {
    pub fn new(inner: secretsmanager::Client) -> Self {
        Self { inner }
    }
}

impl SecretManager for SecretsManagerClient {
    type Err = SecretErr;

    #[tracing::instrument(err, skip(self))]
    async fn get_secret_value(&self, secret_id: &str) -> Result<Arc<str>, SecretErr> {
        let result = self
            .inner
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(aws_sdk_secretsmanager::Error::from)?;

        match result.secret_string() {
            Some(secret_string) => Ok(Arc::from(secret_string)),
            None => Err(SecretErr::NotPresent(secret_id.to_string())),
        }
    }
}
