use orcabus_env_var::env_var;
use serde::Serialize;

use crate::domain::{models::DomainErr, ports::RunIdMinter};

env_var! {
    /// the workflow new runs are named for
    pub struct WorkflowName;
}

env_var! {
    /// the version of the workflow new runs are named for
    pub struct WorkflowVersion;
}

/// The workflow a run name is generated for
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowIdentity {
    /// e.g. `dragen-wgts-dna`
    pub workflow_name: String,
    /// e.g. `4.4.4`
    pub workflow_version: String,
}

impl WorkflowIdentity {
    /// read the identity from `WORKFLOW_NAME` and `WORKFLOW_VERSION`
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            workflow_name: WorkflowName::new()?.to_string(),
            workflow_version: WorkflowVersion::new()?.to_string(),
        })
    }
}

/// A freshly minted run identity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunName {
    /// the new portal run id
    pub portal_run_id: String,
    /// the run name built from it
    pub workflow_run_name: String,
}

/// Mints portal run ids and run names
#[derive(Debug, Clone)]
pub struct RunNameService<M> {
    minter: M,
}

impl<M> RunNameService<M>
where
    M: RunIdMinter,
    anyhow::Error: From<M::Err>,
{
    /// create a new instance of self
    pub fn new(minter: M) -> Self {
        Self { minter }
    }

    /// mint a new portal run id and name a run of `identity` with it
    #[tracing::instrument(err, skip(self))]
    pub async fn generate(&self, identity: &WorkflowIdentity) -> Result<RunName, DomainErr> {
        if identity.workflow_name.is_empty() {
            return Err(DomainErr::MissingInput(WorkflowName::var_name()));
        }
        if identity.workflow_version.is_empty() {
            return Err(DomainErr::MissingInput(WorkflowVersion::var_name()));
        }

        let portal_run_id = self
            .minter
            .create_portal_run_id()
            .await
            .map_err(anyhow::Error::from)?;
        let workflow_run_name = self
            .minter
            .workflow_run_name(
                &identity.workflow_name,
                &identity.workflow_version,
                &portal_run_id,
            )
            .await
            .map_err(anyhow::Error::from)?;

        if portal_run_id.is_empty() || workflow_run_name.is_empty() {
            return Err(anyhow::anyhow!("minted an empty run identity").into());
        }

        Ok(RunName {
            portal_run_id,
            workflow_run_name,
        })
    }
}
