use dragen_wgts_dna::domain::{
    models::{QcSummary, required_rgids},
    ports::FastqRegistry,
    services::FastqService,
};
use lambda_runtime::{Error, LambdaEvent, tracing};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    fastq_rgid_list: Option<Vec<String>>,
}

/// Summarise coverage, duplication and insert size across a library's fastqs
#[tracing::instrument(skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn handler<F>(service: &FastqService<F>, event: LambdaEvent<Event>) -> Result<QcSummary, Error>
where
    F: FastqRegistry,
    anyhow::Error: From<F::Err>,
{
    let rgids = required_rgids(event.payload.fastq_rgid_list, "fastqRgidList")?;
    let summary = service.qc_summary(&rgids).await?;

    tracing::info!(summary = ?summary, "summarised qc");
    Ok(summary)
}
