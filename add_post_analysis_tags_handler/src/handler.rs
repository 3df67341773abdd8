use dragen_wgts_dna::domain::{
    models::{DomainErr, MetricTags},
    ports::ObjectStore,
    services::{MetricsService, PostAnalysisRequest},
};
use lambda_runtime::{Error, LambdaEvent, tracing};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    variant_calling_sample_name: Option<String>,
    variant_calling_output_uri: Option<String>,
    #[serde(default)]
    is_tumor: bool,
}

#[derive(Debug, Serialize)]
pub struct Response {
    tags: MetricTags,
}

/// Reduce a finished variant calling run's metrics files to workflow tags
#[tracing::instrument(skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn handler<O>(service: &MetricsService<O>, event: LambdaEvent<Event>) -> Result<Response, Error>
where
    O: ObjectStore,
    anyhow::Error: From<O::Err>,
{
    let Event {
        variant_calling_sample_name,
        variant_calling_output_uri,
        is_tumor,
    } = event.payload;

    let request = PostAnalysisRequest {
        sample_name: variant_calling_sample_name
            .ok_or(DomainErr::MissingInput("variantCallingSampleName"))?,
        output_uri: variant_calling_output_uri
            .ok_or(DomainErr::MissingInput("variantCallingOutputUri"))?,
        is_tumor,
    };

    let tags = service.post_analysis_tags(&request).await?;
    tracing::info!(count = tags.len(), "collected post analysis tags");
    Ok(Response { tags })
}
