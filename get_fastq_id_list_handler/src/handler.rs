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
#[serde(rename_all = "camelCase")]
pub struct Response {
    fastq_id_list: Vec<String>,
}

/// Resolve read group ids to the distinct fastq ids behind them
#[tracing::instrument(skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn handler<F>(service: &FastqService<F>, event: LambdaEvent<Event>) -> Result<Response, Error>
where
    F: FastqRegistry,
    anyhow::Error: From<F::Err>,
{
    let rgids = required_rgids(event.payload.fastq_rgid_list, "fastqRgidList")?;
    let fastq_id_list = service.fastq_id_list(&rgids).await?;

    tracing::info!(count = fastq_id_list.len(), "resolved fastq ids");
    Ok(Response { fastq_id_list })
}

#[cfg(test)]
mod tests;
