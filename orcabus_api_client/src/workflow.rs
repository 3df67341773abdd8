use chrono::{DateTime, Utc};

use crate::{
    OrcabusApi, Service,
    error::{OrcabusClientErr, check_status, decode},
};

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRun {
    pub orcabus_id: String,
    pub portal_run_id: String,
    pub workflow_run_name: String,
    pub workflow: Workflow,
    #[serde(default)]
    pub libraries: Vec<Library>,
}

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub workflow_name: String,
    pub workflow_version: String,
}

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub orcabus_id: String,
    pub library_id: String,
}

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// orcabus id of the payload recorded with this state
    pub payload: Option<String>,
}

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub payload_ref_id: Option<String>,
    pub version: String,
    pub data: serde_json::Value,
}

impl OrcabusApi {
    #[tracing::instrument(err, skip(self))]
    pub async fn get_workflow_run_from_portal_run_id(
        &self,
        portal_run_id: &str,
    ) -> Result<WorkflowRun, OrcabusClientErr> {
        let runs: Vec<WorkflowRun> = self
            .get_all_pages(
                &self.url(Service::Workflow, "workflowrun"),
                &[("portalRunId", portal_run_id)],
            )
            .await?;

        runs.into_iter()
            .next()
            .ok_or_else(|| OrcabusClientErr::NotFound(format!("workflow run {portal_run_id}")))
    }

    /// the payload attached to the most recent state of a workflow run
    #[tracing::instrument(err, skip(self))]
    pub async fn get_latest_payload_from_workflow_run(
        &self,
        workflow_run_orcabus_id: &str,
    ) -> Result<Payload, OrcabusClientErr> {
        let url = self.url(
            Service::Workflow,
            &format!("workflowrun/{workflow_run_orcabus_id}/state"),
        );
        let response = self.client.get(&url).send().await?;
        let states: Vec<State> = decode(check_status(response).await?).await?;

        let payload_id = latest_payload_id(states).ok_or_else(|| {
            OrcabusClientErr::NotFound(format!(
                "payload for workflow run {workflow_run_orcabus_id}"
            ))
        })?;

        let url = self.url(Service::Workflow, &format!("payload/{payload_id}"));
        let response = self.client.get(&url).send().await?;
        decode(check_status(response).await?).await
    }
}

fn latest_payload_id(states: Vec<State>) -> Option<String> {
    states
        .into_iter()
        .filter(|state| state.payload.is_some())
        .max_by_key(|state| state.timestamp)
        .and_then(|state| state.payload)
}

/// Mint a new portal run id: the current utc date followed by eight hex characters
pub fn create_portal_run_id() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}{}", Utc::now().format("%Y%m%d"), &suffix[..8])
}

/// The run naming convention shared by every automated workflow
pub fn create_workflow_run_name(
    workflow_name: &str,
    workflow_version: &str,
    portal_run_id: &str,
) -> String {
    let kebab = |s: &str| s.replace(['.', '_'], "-");
    format!(
        "umccr--automated--{}--{}--{}",
        kebab(workflow_name),
        kebab(workflow_version),
        portal_run_id
    )
}
