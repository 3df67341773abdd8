//! The orcabus apis as [FastqRegistry], [WorkflowRegistry] and [ObjectStore],
//! and the orcabus naming convention as a [RunIdMinter]

use anyhow::Context;
use orcabus_api_client::{OrcabusApi, fastq, workflow};

use crate::domain::{
    models::{
        FastqListRow, FastqQc, FastqRecord, LinkedLibrary, Payload, Rgid, S3Uri, Workflow,
        WorkflowRun,
    },
    ports::{FastqRegistry, ObjectStore, RunIdMinter, WorkflowRegistry},
};

impl From<fastq::Fastq> for FastqRecord {
    fn from(fastq: fastq::Fastq) -> Self {
        Self {
            rgid: Rgid::from_parts(fastq.index, fastq.lane, fastq.instrument_run_id),
            id: fastq.id,
            fastq_set_id: fastq.fastq_set_id,
            qc: fastq.qc.map(|qc| FastqQc {
                raw_wgs_coverage_estimate: qc.raw_wgs_coverage_estimate,
                duplication_fraction_estimate: qc.duplication_fraction_estimate,
                insert_size_estimate: qc.insert_size_estimate,
            }),
        }
    }
}

impl From<workflow::WorkflowRun> for WorkflowRun {
    fn from(run: workflow::WorkflowRun) -> Self {
        Self {
            orcabus_id: run.orcabus_id,
            portal_run_id: run.portal_run_id,
            workflow_run_name: run.workflow_run_name,
            workflow: Workflow {
                workflow_name: run.workflow.workflow_name,
                workflow_version: run.workflow.workflow_version,
            },
            libraries: run
                .libraries
                .into_iter()
                .map(|library| LinkedLibrary {
                    orcabus_id: library.orcabus_id,
                    library_id: library.library_id,
                })
                .collect(),
        }
    }
}

impl FastqRegistry for OrcabusApi {
    type Err = anyhow::Error;

    async fn get_fastq_by_rgid(&self, rgid: &Rgid) -> Result<FastqRecord, Self::Err> {
        Ok(OrcabusApi::get_fastq_by_rgid(self, &rgid.to_string())
            .await?
            .into())
    }

    async fn get_fastqs_in_instrument_run(
        &self,
        instrument_run_id: &str,
    ) -> Result<Vec<FastqRecord>, Self::Err> {
        Ok(self
            .get_fastqs_in_instrument_run_id(instrument_run_id)
            .await?
            .into_iter()
            .map(FastqRecord::from)
            .collect())
    }

    async fn to_fastq_list_row(
        &self,
        fastq_id: &str,
        location_override: Option<S3Uri>,
    ) -> Result<FastqListRow, Self::Err> {
        let location = location_override
            .as_ref()
            .map(|uri| (uri.bucket(), uri.key()));
        let row = OrcabusApi::to_fastq_list_row(self, fastq_id, location).await?;

        serde_json::from_value(serde_json::Value::Object(row))
            .with_context(|| format!("fastq list row for {fastq_id} is malformed"))
    }

    async fn validate_ntsm_internal(&self, fastq_set_id: &str) -> Result<bool, Self::Err> {
        Ok(OrcabusApi::validate_ntsm_internal(self, fastq_set_id).await?)
    }

    async fn validate_ntsm_external(
        &self,
        fastq_set_id: &str,
        other_fastq_set_id: &str,
    ) -> Result<bool, Self::Err> {
        Ok(OrcabusApi::validate_ntsm_external(self, fastq_set_id, other_fastq_set_id).await?)
    }
}

impl WorkflowRegistry for OrcabusApi {
    type Err = anyhow::Error;

    async fn get_workflow_run_by_portal_run_id(
        &self,
        portal_run_id: &str,
    ) -> Result<WorkflowRun, Self::Err> {
        Ok(self
            .get_workflow_run_from_portal_run_id(portal_run_id)
            .await?
            .into())
    }

    async fn get_latest_payload(&self, workflow_run_orcabus_id: &str) -> Result<Payload, Self::Err> {
        let payload = self
            .get_latest_payload_from_workflow_run(workflow_run_orcabus_id)
            .await?;

        Ok(Payload {
            data: serde_json::from_value(payload.data).with_context(|| {
                format!("payload for workflow run {workflow_run_orcabus_id} is malformed")
            })?,
            ref_id: payload.payload_ref_id,
            version: payload.version,
        })
    }
}

/// The run naming convention shared by every automated workflow. Needs no network access
#[derive(Debug, Clone, Copy, Default)]
pub struct OrcabusRunIds;

impl RunIdMinter for OrcabusRunIds {
    type Err = std::convert::Infallible;

    async fn create_portal_run_id(&self) -> Result<String, Self::Err> {
        Ok(workflow::create_portal_run_id())
    }

    async fn workflow_run_name(
        &self,
        workflow_name: &str,
        workflow_version: &str,
        portal_run_id: &str,
    ) -> Result<String, Self::Err> {
        Ok(workflow::create_workflow_run_name(
            workflow_name,
            workflow_version,
            portal_run_id,
        ))
    }
}

impl ObjectStore for OrcabusApi {
    type Err = anyhow::Error;

    /// Resolve the object through the filemanager and download it via a presigned url
    async fn fetch(&self, uri: &str) -> Result<Option<Vec<u8>>, Self::Err> {
        let location: S3Uri = uri.parse()?;
        let Some(object) = self.get_s3_object(location.bucket(), location.key()).await? else {
            return Ok(None);
        };

        let presigned = self.get_presigned_url(&object.s3_object_id).await?;
        Ok(Some(self.download_presigned(&presigned).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_rebuilds_the_rgid_of_a_fastq() {
        let fastq: fastq::Fastq = serde_json::from_value(serde_json::json!({
            "id": "fqr.01JJY7P1AVFGHGVMEDE8T4VWJG",
            "fastqSetId": "fqs.01JJY7P1AVFGHGVMEDE8T4VWJH",
            "index": "GAATTCGT+TTGGTCTG",
            "lane": 4,
            "instrumentRunId": "240229_A00130_0288_BH5HM2DSXC",
            "qc": {"rawWgsCoverageEstimate": 12.5, "insertSizeEstimate": 310.0}
        }))
        .unwrap();

        let record = FastqRecord::from(fastq);

        assert_eq!(
            record.rgid.to_string(),
            "GAATTCGT+TTGGTCTG.4.240229_A00130_0288_BH5HM2DSXC"
        );
        let qc = record.qc.unwrap();
        assert_eq!(qc.raw_wgs_coverage_estimate, Some(12.5));
        assert_eq!(qc.duplication_fraction_estimate, None);
    }
}
