use dragen_wgts_dna::domain::{
    models::required_rgids, ports::FastqRegistry, services::FastqService,
};
use lambda_runtime::{Error, LambdaEvent, tracing};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    fastq_rgid_list: Option<Vec<String>>,
    tumor_fastq_rgid_list: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct Response {
    related: bool,
}

/// Check that a normal library and a tumor library come from the same individual
#[tracing::instrument(skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn handler<F>(service: &FastqService<F>, event: LambdaEvent<Event>) -> Result<Response, Error>
where
    F: FastqRegistry,
    anyhow::Error: From<F::Err>,
{
    let rgids = required_rgids(event.payload.fastq_rgid_list, "fastqRgidList")?;
    let tumor_rgids = required_rgids(event.payload.tumor_fastq_rgid_list, "tumorFastqRgidList")?;

    let related = service.check_ntsm_external(&rgids, &tumor_rgids).await?;
    if !related {
        tracing::warn!("normal and tumor fastqs come from different individuals");
    }
    Ok(Response { related })
}
