use dragen_wgts_dna::domain::{
    models::{DomainErr, FastqListRow, S3Uri, required_rgids},
    ports::FastqRegistry,
    services::FastqService,
};
use lambda_runtime::{Error, LambdaEvent, tracing};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    fastq_rgid_list: Option<Vec<String>>,
    /// relocate the read files under this prefix, e.g. an ora decompression cache
    #[serde(default)]
    fastq_list_row_uri_override: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    fastq_list_rows: Vec<FastqListRow>,
}

#[tracing::instrument(skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn handler<F>(service: &FastqService<F>, event: LambdaEvent<Event>) -> Result<Response, Error>
where
    F: FastqRegistry,
    anyhow::Error: From<F::Err>,
{
    let rgids = required_rgids(event.payload.fastq_rgid_list, "fastqRgidList")?;
    let location_override = event
        .payload
        .fastq_list_row_uri_override
        .filter(|uri| !uri.is_empty())
        .map(|uri| uri.parse::<S3Uri>())
        .transpose()?;

    let fastq_list_rows = service.fastq_list_rows(&rgids, location_override).await?;
    if fastq_list_rows.len() != rgids.len() {
        tracing::warn!(
            requested = rgids.len(),
            found = fastq_list_rows.len(),
            "not every rgid resolved to a fastq list row"
        );
    }

    Ok(Response { fastq_list_rows })
}

#[cfg(test)]
mod tests;
