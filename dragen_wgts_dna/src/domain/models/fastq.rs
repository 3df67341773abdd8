use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Rgid;

/// A fastq pair as held by the fastq registry
#[derive(Debug, Clone, PartialEq)]
pub struct FastqRecord {
    /// the registry's id for this fastq
    pub id: String,
    /// the fastq set this fastq belongs to, if it has been assigned one
    pub fastq_set_id: Option<String>,
    /// the read group this fastq was demultiplexed into
    pub rgid: Rgid,
    /// qc estimates, once qc has run
    pub qc: Option<FastqQc>,
}

/// The qc estimates the registry stores against a fastq
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FastqQc {
    /// estimated whole genome coverage contributed by this fastq
    pub raw_wgs_coverage_estimate: Option<f64>,
    /// estimated fraction of duplicate reads
    pub duplication_fraction_estimate: Option<f64>,
    /// estimated mean insert size
    pub insert_size_estimate: Option<f64>,
}

/// One row of a dragen fastq list. Fields the registry adds beyond the
/// standard columns are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastqListRow {
    /// the read group id
    pub rgid: String,
    /// the read group library
    pub rglb: String,
    /// the read group sample
    pub rgsm: String,
    /// the flowcell lane
    pub lane: u32,
    /// location of read 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read1_file_uri: Option<String>,
    /// location of read 2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read2_file_uri: Option<String>,
    /// any other fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
