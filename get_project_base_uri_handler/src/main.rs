#![recursion_limit = "256"]

mod handler;

use handler::{Event, handler};

use anyhow::Context;
use aws_config::BehaviorVersion;
use dragen_wgts_dna::domain::services::ProjectService;
use icav2_client::Icav2Client;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};
use orcabus_entrypoint::OrcabusEntrypoint;
use secretsmanager_client::SecretsManagerClient;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let entrypoint = OrcabusEntrypoint::for_handler("get_project_base_uri").init();

    let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
    let client = Icav2Client::from_env(
        entrypoint.environment(),
        &SecretsManagerClient::new(aws_sdk_secretsmanager::Client::new(&config)),
    )
    .await
    .context("could not build icav2 client")?;

    tracing::trace!("initialized icav2 client");

    let service = Arc::new(ProjectService::new(client));

    let func = service_fn(move |event: LambdaEvent<Event>| {
        let service = service.clone();
        async move { handler(&service, event).await }
    });

    run(func).await
}
