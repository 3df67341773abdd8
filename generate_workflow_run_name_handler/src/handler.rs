use dragen_wgts_dna::domain::{
    ports::RunIdMinter,
    services::{RunName, RunNameService, WorkflowIdentity},
};
use lambda_runtime::{Error, LambdaEvent, tracing};
use serde::Deserialize;

/// The invocation carries nothing the run name depends on
#[derive(Debug, Default, Deserialize)]
pub struct Event {}

#[tracing::instrument(skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn handler<M>(
    service: &RunNameService<M>,
    identity: &WorkflowIdentity,
    event: LambdaEvent<Event>,
) -> Result<RunName, Error>
where
    M: RunIdMinter,
    anyhow::Error: From<M::Err>,
{
    let run_name = service.generate(identity).await?;

    tracing::info!(portal_run_id = %run_name.portal_run_id, "generated run name");
    Ok(run_name)
}
