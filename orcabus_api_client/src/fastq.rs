use crate::{
    OrcabusApi, Service,
    error::{OrcabusClientErr, check_status, decode},
};

/// a fastq record as returned by the fastq api
#[derive(serde::Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Fastq {
    pub id: String,
    pub fastq_set_id: Option<String>,
    pub index: String,
    pub lane: u32,
    pub instrument_run_id: String,
    pub qc: Option<FastqQc>,
}

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FastqQc {
    pub raw_wgs_coverage_estimate: Option<f64>,
    pub duplication_fraction_estimate: Option<f64>,
    pub insert_size_estimate: Option<f64>,
}

#[derive(serde::Deserialize, Debug)]
struct NtsmResult {
    related: bool,
}

impl OrcabusApi {
    /// look up the single fastq registered under a read group id
    #[tracing::instrument(err, skip(self))]
    pub async fn get_fastq_by_rgid(&self, rgid: &str) -> Result<Fastq, OrcabusClientErr> {
        let mut fastqs: Vec<Fastq> = self
            .get_all_pages(&self.url(Service::Fastq, "fastq"), &[("rgid", rgid)])
            .await?;

        match fastqs.len() {
            1 => Ok(fastqs.remove(0)),
            0 => Err(OrcabusClientErr::NotFound(format!("fastq with rgid {rgid}"))),
            n => Err(OrcabusClientErr::UnexpectedStatus {
                status: 200,
                body: format!("expected one fastq for rgid {rgid}, found {n}"),
            }),
        }
    }

    /// list every fastq sequenced in an instrument run
    #[tracing::instrument(err, skip(self))]
    pub async fn get_fastqs_in_instrument_run_id(
        &self,
        instrument_run_id: &str,
    ) -> Result<Vec<Fastq>, OrcabusClientErr> {
        self.get_all_pages(
            &self.url(Service::Fastq, "fastq"),
            &[("instrumentRunId", instrument_run_id)],
        )
        .await
    }

    /// Render a fastq as a fastq list row. When a bucket and key prefix are given
    /// the registry rewrites the read file uris to live under them.
    #[tracing::instrument(err, skip(self))]
    pub async fn to_fastq_list_row(
        &self,
        fastq_id: &str,
        location_override: Option<(&str, &str)>,
    ) -> Result<serde_json::Map<String, serde_json::Value>, OrcabusClientErr> {
        let url = self.url(Service::Fastq, &format!("fastq/{fastq_id}/toFastqListRow"));
        let mut request = self.client.get(&url);
        if let Some((bucket, key_prefix)) = location_override {
            request = request.query(&[("bucket", bucket), ("keyPrefix", key_prefix)]);
        }

        decode(check_status(request.send().await?).await?).await
    }

    #[tracing::instrument(err, skip(self))]
    pub async fn validate_ntsm_internal(&self, fastq_set_id: &str) -> Result<bool, OrcabusClientErr> {
        let url = self.url(
            Service::Fastq,
            &format!("fastqSet/{fastq_set_id}/validateNtsmInternal"),
        );
        let response = self.client.get(&url).send().await?;
        let result: NtsmResult = decode(check_status(response).await?).await?;
        Ok(result.related)
    }

    #[tracing::instrument(err, skip(self))]
    pub async fn validate_ntsm_external(
        &self,
        fastq_set_id: &str,
        external_fastq_set_id: &str,
    ) -> Result<bool, OrcabusClientErr> {
        let url = self.url(
            Service::Fastq,
            &format!("fastqSet/{fastq_set_id}/validateNtsmExternal/{external_fastq_set_id}"),
        );
        let response = self.client.get(&url).send().await?;
        let result: NtsmResult = decode(check_status(response).await?).await?;
        Ok(result.related)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_decodes_a_fastq() {
        let fastq: Fastq = serde_json::from_value(serde_json::json!({
            "id": "fqr.01K12NF97VEM0V9K0ABFAEPHNT",
            "fastqSetId": "fqs.01K12NF9A2F3AXQWJ1CWGK0AM2",
            "index": "GTTCGCCG+CAATGAGC",
            "lane": 4,
            "instrumentRunId": "250724_A01052_0269_AHFHWJDSXF",
            "library": {"orcabusId": "lib.1", "libraryId": "L2500001"},
            "qc": {
                "rawWgsCoverageEstimate": 12.5,
                "duplicationFractionEstimate": 0.12,
                "insertSizeEstimate": 310.0
            }
        }))
        .unwrap();

        assert_eq!(fastq.lane, 4);
        assert_eq!(
            fastq.qc.and_then(|qc| qc.raw_wgs_coverage_estimate),
            Some(12.5)
        );
    }

    #[test]
    fn it_tolerates_missing_qc() {
        let fastq: Fastq = serde_json::from_value(serde_json::json!({
            "id": "fqr.1",
            "fastqSetId": null,
            "index": "AAAA",
            "lane": 1,
            "instrumentRunId": "run1",
            "qc": null
        }))
        .unwrap();
        assert!(fastq.qc.is_none());
        assert!(fastq.fastq_set_id.is_none());
    }
}
