mod handler;

use handler::{Event, handler};

use anyhow::Context;
use dragen_wgts_dna::{
    domain::services::{RunNameService, WorkflowIdentity},
    outbound::orcabus::OrcabusRunIds,
};
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use orcabus_entrypoint::OrcabusEntrypoint;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    OrcabusEntrypoint::for_handler("generate_workflow_run_name").init();

    let identity = Arc::new(WorkflowIdentity::from_env().context("workflow identity is not configured")?);
    let service = Arc::new(RunNameService::new(OrcabusRunIds));

    let func = service_fn(move |event: LambdaEvent<Event>| {
        let service = service.clone();
        let identity = identity.clone();
        async move { handler(&service, &identity, event).await }
    });

    run(func).await
}
