use dragen_wgts_dna::domain::{
    models::{DomainErr, WesStateChangeEvent, WorkflowRunStateChange},
    ports::{TimeGetter, WorkflowRegistry},
    services::WesEventService,
};
use lambda_runtime::{Error, LambdaEvent, tracing};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    icav2_wes_state_change_event: Option<WesStateChangeEvent>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    workflow_run_state_change_event: WorkflowRunStateChange,
}

#[tracing::instrument(skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn handler<W, T>(
    service: &WesEventService<W, T>,
    event: LambdaEvent<Event>,
) -> Result<Response, Error>
where
    W: WorkflowRegistry,
    T: TimeGetter,
    anyhow::Error: From<W::Err>,
{
    let state_change = event
        .payload
        .icav2_wes_state_change_event
        .ok_or(DomainErr::MissingInput("icav2WesStateChangeEvent"))?;

    let workflow_run_state_change_event =
        service.to_workflow_run_state_change(state_change).await?;
    tracing::info!(
        status = %workflow_run_state_change_event.status,
        portal_run_id = %workflow_run_state_change_event.portal_run_id,
        "transcoded state change"
    );

    Ok(Response {
        workflow_run_state_change_event,
    })
}
