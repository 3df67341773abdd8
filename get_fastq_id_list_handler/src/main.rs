#![recursion_limit = "256"]

mod handler;

use handler::{Event, handler};

use anyhow::Context;
use aws_config::BehaviorVersion;
use dragen_wgts_dna::domain::services::FastqService;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};
use orcabus_api_client::OrcabusApi;
use orcabus_entrypoint::OrcabusEntrypoint;
use secretsmanager_client::SecretsManagerClient;
use ssm_client::SsmClient;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let entrypoint = OrcabusEntrypoint::for_handler("get_fastq_id_list").init();

    let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
    let api = OrcabusApi::from_env(
        entrypoint.environment(),
        &SecretsManagerClient::new(aws_sdk_secretsmanager::Client::new(&config)),
        &SsmClient::new(aws_sdk_ssm::Client::new(&config)),
    )
    .await
    .context("could not build orcabus client")?;

    tracing::trace!("initialized orcabus client");

    let service = Arc::new(FastqService::new(api));

    let func = service_fn(move |event: LambdaEvent<Event>| {
        let service = service.clone();
        async move { handler(&service, event).await }
    });

    run(func).await
}
