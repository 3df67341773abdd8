use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// the analysis status that marks a completed, successful run
pub const SUCCEEDED: &str = "SUCCEEDED";

/// A workflow run as recorded by the workflow registry
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowRun {
    /// the registry's id for the run
    pub orcabus_id: String,
    /// the portal run id the run was launched under
    pub portal_run_id: String,
    /// the run's name
    pub workflow_run_name: String,
    /// the workflow being run
    pub workflow: Workflow,
    /// libraries the run was launched for
    pub libraries: Vec<LinkedLibrary>,
}

/// The workflow a run belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    /// e.g. `dragen-wgts-dna`
    pub workflow_name: String,
    /// e.g. `4.4.4`
    pub workflow_version: String,
}

/// A library linked to a workflow run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedLibrary {
    /// the registry's id for the library
    pub orcabus_id: String,
    /// the lab's library id
    pub library_id: String,
}

/// A versioned payload recorded against a workflow run state
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    /// the registry's reference to this payload
    pub ref_id: Option<String>,
    /// the payload schema version
    pub version: String,
    /// the payload body
    pub data: PayloadData,
}

/// The body of a workflow payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadData {
    /// workflow inputs
    #[serde(default)]
    pub inputs: Map<String, Value>,
    /// engine parameters, such as the output uri
    #[serde(default)]
    pub engine_parameters: Map<String, Value>,
    /// free form tags
    #[serde(default)]
    pub tags: Map<String, Value>,
    /// output locations, only meaningful once a run has succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Map<String, Value>>,
    /// anything else
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A reference genome as named in workflow inputs
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReferenceGenome {
    /// e.g. `hg38`
    pub name: String,
    /// e.g. `graph`
    pub structure: String,
}

/// The workflow inputs needed to predict where dragen writes its outputs
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragenInputs {
    /// the germline (normal) sample
    pub sample_name: String,
    /// the tumor sample, for somatic runs
    #[serde(default)]
    pub tumor_sample_name: Option<String>,
    /// the germline reference
    pub reference: ReferenceGenome,
    /// the reference used for somatic calling, when it differs from the germline one
    #[serde(default)]
    pub somatic_reference: Option<ReferenceGenome>,
}

/// A state change emitted by the analysis platform's workflow execution service
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WesStateChangeEvent {
    /// e.g. `RUNNING`, `SUCCEEDED`
    pub status: String,
    /// engine parameters of the run
    #[serde(default)]
    pub engine_parameters: WesEngineParameters,
    /// tags of the run
    #[serde(default)]
    pub tags: WesTags,
}

/// The engine parameters of a [WesStateChangeEvent]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WesEngineParameters {
    /// where the run writes its outputs
    #[serde(default)]
    pub output_uri: Option<String>,
}

/// The tags of a [WesStateChangeEvent]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WesTags {
    /// the portal run id the run was launched under
    #[serde(default)]
    pub portal_run_id: Option<String>,
}

/// A workflow run state change in the internal event schema
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRunStateChange {
    /// the status, passed through from the source event
    pub status: String,
    /// utc, second precision, `Z` suffixed
    pub timestamp: String,
    /// the run's portal run id
    pub portal_run_id: String,
    /// the workflow's name
    pub workflow_name: String,
    /// the workflow's version
    pub workflow_version: String,
    /// the run's name
    pub workflow_run_name: String,
    /// libraries linked to the run
    pub linked_libraries: Vec<LinkedLibrary>,
    /// the payload for this state
    pub payload: StateChangePayload,
}

/// The payload of a [WorkflowRunStateChange]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateChangePayload {
    /// the payload schema version
    pub version: String,
    /// the payload body
    pub data: PayloadData,
}

/// The detail of a dragen wgts dna READY event
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyEventDetail {
    /// the portal run id the run will launch under
    #[serde(default)]
    pub portal_run_id: Option<String>,
    /// the name the run will launch under
    #[serde(default)]
    pub workflow_run_name: Option<String>,
    /// the ready payload
    pub payload: ReadyPayload,
}

/// The payload of a [ReadyEventDetail]
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReadyPayload {
    /// the payload body
    #[serde(default)]
    pub data: PayloadData,
}

/// Engine parameters to fall back on when the ready payload leaves them out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineDefaults {
    /// the analysis project to run in
    pub project_id: Option<String>,
    /// the pipeline to run
    pub pipeline_id: Option<String>,
}

/// A launch request for the analysis platform's workflow execution service
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WesRequest {
    /// the run name
    pub name: String,
    /// the workflow inputs, keys snake_cased and locations wrapped
    pub inputs: Value,
    /// engine parameters
    pub engine_parameters: Map<String, Value>,
    /// tags, including the portal run id
    pub tags: Map<String, Value>,
}

/// The kind of location a workflow input points at
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum CwlClass {
    /// a single object
    File,
    /// a prefix
    Directory,
}

/// A location typed for the workflow language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CwlLocation {
    /// whether this is a file or a directory
    pub class: CwlClass,
    /// the uri
    pub location: String,
}

impl CwlLocation {
    /// Type a uri. Uris ending in `/` are directories.
    pub fn new(location: impl Into<String>) -> Self {
        let location = location.into();
        let class = if location.ends_with('/') {
            CwlClass::Directory
        } else {
            CwlClass::File
        };
        Self { class, location }
    }
}
