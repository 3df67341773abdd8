use dragen_wgts_dna::domain::{
    models::{DomainErr, EngineDefaults, ReadyEventDetail, WesRequest},
    services::wes_request::ready_to_wes_request,
};
use lambda_runtime::{Error, LambdaEvent, tracing};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    dragen_wgts_dna_ready_event_detail: Option<ReadyEventDetail>,
    #[serde(default)]
    default_project_id: Option<String>,
    #[serde(default)]
    default_pipeline_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    icav2_wes_request_event_detail: WesRequest,
}

#[tracing::instrument(skip(event), fields(request_id = %event.context.request_id))]
pub fn handler(event: LambdaEvent<Event>) -> Result<Response, Error> {
    let Event {
        dragen_wgts_dna_ready_event_detail,
        default_project_id,
        default_pipeline_id,
    } = event.payload;

    let detail = dragen_wgts_dna_ready_event_detail
        .ok_or(DomainErr::MissingInput("dragenWgtsDnaReadyEventDetail"))?;
    let defaults = EngineDefaults {
        project_id: default_project_id,
        pipeline_id: default_pipeline_id,
    };

    Ok(Response {
        icav2_wes_request_event_detail: ready_to_wes_request(detail, &defaults)?,
    })
}
