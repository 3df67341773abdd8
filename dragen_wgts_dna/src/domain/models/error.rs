use thiserror::Error;

/// Every way a handler invocation can fail
#[derive(Debug, Error)]
pub enum DomainErr {
    /// a field the event must carry was absent or empty
    #[error("{0} is a required input")]
    MissingInput(&'static str),
    /// a field was present but could not be understood
    #[error("invalid {field}: {detail}")]
    InvalidInput {
        /// the wire name of the offending field
        field: &'static str,
        /// what was wrong with it
        detail: String,
    },
    /// the read group id is not of the form `index.lane.instrumentRunId`
    #[error("invalid rgid {0:?}, expected index.lane.instrumentRunId")]
    InvalidRgid(String),
    /// the location is not of the form `s3://bucket/key`
    #[error("invalid s3 uri {0:?}")]
    InvalidS3Uri(String),
    /// a metric row that should be unique matched zero or several rows
    #[error("expected exactly one {metric:?} row in {file}, found {matches}")]
    AmbiguousMetric {
        /// the metrics file that was searched
        file: String,
        /// the metric or sample that was searched for
        metric: String,
        /// how many rows matched
        matches: usize,
    },
    /// a metrics file or one of its values could not be read
    #[error("malformed metrics file {file}: {detail}")]
    MalformedMetric {
        /// the metrics file
        file: String,
        /// what could not be read
        detail: String,
    },
    /// a fastq taking part in a qc summary has not been qc'd yet
    #[error("fastq {fastq_id} has no {field}")]
    MissingQcEstimate {
        /// the fastq missing the estimate
        fastq_id: String,
        /// the missing estimate
        field: &'static str,
    },
    /// a collaborator failed
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}
