use dragen_wgts_dna::domain::{
    models::required_rgids, ports::FastqRegistry, services::FastqService,
};
use lambda_runtime::{Error, LambdaEvent, tracing};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    fastq_rgid_list: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct Response {
    /// `null` when none of the fastqs belong to a fastq set yet
    related: Option<bool>,
}

/// Check that every fastq of a library was sequenced from the same individual
#[tracing::instrument(skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn handler<F>(service: &FastqService<F>, event: LambdaEvent<Event>) -> Result<Response, Error>
where
    F: FastqRegistry,
    anyhow::Error: From<F::Err>,
{
    let rgids = required_rgids(event.payload.fastq_rgid_list, "fastqRgidList")?;
    let related = service.check_ntsm_internal(&rgids).await?;

    if related == Some(false) {
        tracing::warn!("fastqs do not all come from the same individual");
    }
    Ok(Response { related })
}
