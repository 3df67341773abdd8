use aws_sdk_ssm as ssm;
pub use orcabus_env::LocalOrRemote;
use orcabus_env::Environment;
use std::sync::Arc;
use thiserror::Error;

/// abstracts reading a plain string parameter from a remote parameter store
pub trait ParameterStore: Send + Sync {
    type Err: std::error::Error + Send + Sync + 'static;

    /// fetch the value of the parameter at `name`
    fn get_parameter(&self, name: &str)
    -> impl Future<Output = Result<Arc<str>, Self::Err>> + Send;

    /// in local mode return the variable itself, otherwise read the parameter named by its value
    #[tracing::instrument(err, skip(self, var))]
    fn get_maybe_parameter<T: AsRef<str> + Send>(
        &self,
        environment: Environment,
        var: T,
    ) -> impl Future<Output = Result<LocalOrRemote<T>, Self::Err>> + Send {
        async move {
            match environment {
                Environment::Local => Ok(LocalOrRemote::Local(var)),
                Environment::Production | Environment::Develop => Ok(LocalOrRemote::Remote(
                    self.get_parameter(var.as_ref()).await?,
                )),
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct SsmClient {
    inner: ssm::Client,
}

#[derive(Debug, Error)]
pub enum ParameterErr {
    #[error("{0:?}")]
    AwsErr(#[from] aws_sdk_ssm::Error),
    #[error("parameter {0} has no value")]
    NotPresent(String),
}

impl SsmClient {
    pub fn new(inner: ssm::Client) -> Self {
        Self { inner }
    }
}

impl ParameterStore for SsmClient {
    type Err = ParameterErr;

    #[tracing::instrument(err, skip(self))]
    async fn get_parameter(&self, name: &str) -> Result<Arc<str>, ParameterErr> {
        let result = self
            .inner
            .get_parameter()
            .name(name)
            .send()
            .await
            .map_err(aws_sdk_ssm::Error::from)?;

        result
            .parameter()
            .and_then(|p| p.value())
            .map(Arc::from)
            .ok_or_else(|| ParameterErr::NotPresent(name.to_string()))
    }
}
