use dragen_wgts_dna::domain::{ports::ProjectStorage, services::ProjectService};
use lambda_runtime::{Error, LambdaEvent, tracing};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    project_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    s3_uri: String,
}

#[tracing::instrument(skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn handler<P>(service: &ProjectService<P>, event: LambdaEvent<Event>) -> Result<Response, Error>
where
    P: ProjectStorage,
    anyhow::Error: From<P::Err>,
{
    let s3_uri = service.base_uri(event.payload.project_id.as_deref()).await?;
    Ok(Response { s3_uri })
}

#[cfg(test)]
mod tests;
