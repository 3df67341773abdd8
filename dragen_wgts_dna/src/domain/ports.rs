//! The collaborators the handlers need from outside the process

use chrono::{DateTime, Utc};

use crate::domain::models::{FastqListRow, FastqRecord, Payload, Rgid, S3Uri, WorkflowRun};

#[cfg(feature = "mock")]
const _NOT_PROD: () = const {
    assert!(
        cfg!(debug_assertions),
        "mock ports are being compiled into a release build, run `cargo tree -i dragen_wgts_dna -e features` to find which crate enables the mock feature in [dependencies]"
    );
};

/// The registry of sequenced fastqs and their qc
#[cfg_attr(any(test, feature = "mock"), mockall::automock(type Err = anyhow::Error;))]
pub trait FastqRegistry: Send + Sync + 'static {
    /// the error type that can occur
    type Err: Send;

    /// the one fastq registered under `rgid`
    fn get_fastq_by_rgid(
        &self,
        rgid: &Rgid,
    ) -> impl Future<Output = Result<FastqRecord, Self::Err>> + Send;

    /// every fastq sequenced in an instrument run
    fn get_fastqs_in_instrument_run(
        &self,
        instrument_run_id: &str,
    ) -> impl Future<Output = Result<Vec<FastqRecord>, Self::Err>> + Send;

    /// render a fastq as a fastq list row, optionally relocated under `location_override`
    fn to_fastq_list_row(
        &self,
        fastq_id: &str,
        location_override: Option<S3Uri>,
    ) -> impl Future<Output = Result<FastqListRow, Self::Err>> + Send;

    /// whether the fastqs within a set all come from the same individual
    fn validate_ntsm_internal(
        &self,
        fastq_set_id: &str,
    ) -> impl Future<Output = Result<bool, Self::Err>> + Send;

    /// whether two fastq sets come from the same individual
    fn validate_ntsm_external(
        &self,
        fastq_set_id: &str,
        other_fastq_set_id: &str,
    ) -> impl Future<Output = Result<bool, Self::Err>> + Send;
}

/// The registry of workflow runs and their payloads
#[cfg_attr(any(test, feature = "mock"), mockall::automock(type Err = anyhow::Error;))]
pub trait WorkflowRegistry: Send + Sync + 'static {
    /// the error type that can occur
    type Err: Send;

    /// the run launched under `portal_run_id`
    fn get_workflow_run_by_portal_run_id(
        &self,
        portal_run_id: &str,
    ) -> impl Future<Output = Result<WorkflowRun, Self::Err>> + Send;

    /// the payload recorded with the run's most recent state
    fn get_latest_payload(
        &self,
        workflow_run_orcabus_id: &str,
    ) -> impl Future<Output = Result<Payload, Self::Err>> + Send;
}

/// Mints new run identities following the platform's naming convention
#[cfg_attr(any(test, feature = "mock"), mockall::automock(type Err = anyhow::Error;))]
pub trait RunIdMinter: Send + Sync + 'static {
    /// the error type that can occur
    type Err: Send;

    /// mint a fresh portal run id
    fn create_portal_run_id(&self) -> impl Future<Output = Result<String, Self::Err>> + Send;

    /// name a run of `workflow_name`/`workflow_version` under `portal_run_id`
    fn workflow_run_name(
        &self,
        workflow_name: &str,
        workflow_version: &str,
        portal_run_id: &str,
    ) -> impl Future<Output = Result<String, Self::Err>> + Send;
}

/// Read access to objects by uri
#[cfg_attr(any(test, feature = "mock"), mockall::automock(type Err = anyhow::Error;))]
pub trait ObjectStore: Send + Sync + 'static {
    /// the error type that can occur
    type Err: Send;

    /// the bytes at `uri`, or `None` when nothing is stored there
    fn fetch(&self, uri: &str) -> impl Future<Output = Result<Option<Vec<u8>>, Self::Err>> + Send;
}

/// Where analysis projects keep their data
#[cfg_attr(any(test, feature = "mock"), mockall::automock(type Err = anyhow::Error;))]
pub trait ProjectStorage: Send + Sync + 'static {
    /// the error type that can occur
    type Err: Send;

    /// the s3 uri, ending in `/`, that the project's data lives under
    fn s3_prefix_for_project(
        &self,
        project_id: &str,
    ) -> impl Future<Output = Result<String, Self::Err>> + Send;
}

/// Trait to get the current time
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait TimeGetter: Send + Sync + 'static {
    /// return the current time
    fn now(&self) -> DateTime<Utc>;
}
