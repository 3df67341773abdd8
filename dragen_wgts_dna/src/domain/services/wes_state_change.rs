use serde_json::{Map, Value};

use crate::domain::{
    models::{
        DomainErr, DragenInputs, ReferenceGenome, SUCCEEDED, StateChangePayload,
        WesStateChangeEvent, WorkflowRunStateChange, as_directory,
    },
    ports::{TimeGetter, WorkflowRegistry},
};

/// Transcodes workflow execution state changes into workflow run state changes
#[derive(Debug, Clone)]
pub struct WesEventService<W, T> {
    registry: W,
    time: T,
}

impl<W, T> WesEventService<W, T>
where
    W: WorkflowRegistry,
    T: TimeGetter,
    anyhow::Error: From<W::Err>,
{
    /// create a new instance of self
    pub fn new(registry: W, time: T) -> Self {
        Self { registry, time }
    }

    /// Look up the run a state change belongs to and restate the change in
    /// the internal schema. A succeeded run gains the output locations dragen
    /// is known to write; any other status drops outputs entirely.
    #[tracing::instrument(err, skip(self))]
    pub async fn to_workflow_run_state_change(
        &self,
        event: WesStateChangeEvent,
    ) -> Result<WorkflowRunStateChange, DomainErr> {
        let portal_run_id = event
            .tags
            .portal_run_id
            .filter(|s| !s.is_empty())
            .ok_or(DomainErr::MissingInput("tags.portalRunId"))?;

        let run = self
            .registry
            .get_workflow_run_by_portal_run_id(&portal_run_id)
            .await
            .map_err(anyhow::Error::from)?;
        let payload = self
            .registry
            .get_latest_payload(&run.orcabus_id)
            .await
            .map_err(anyhow::Error::from)?;

        let mut data = payload.data;
        if event.status == SUCCEEDED {
            let output_uri = event
                .engine_parameters
                .output_uri
                .filter(|s| !s.is_empty())
                .ok_or(DomainErr::MissingInput("engineParameters.outputUri"))?;
            let inputs: DragenInputs = serde_json::from_value(Value::Object(data.inputs.clone()))
                .map_err(|e| DomainErr::InvalidInput {
                    field: "payload.data.inputs",
                    detail: e.to_string(),
                })?;

            data.outputs = Some(derive_outputs(&output_uri, &inputs));
        } else {
            data.outputs = None;
        }

        Ok(WorkflowRunStateChange {
            status: event.status,
            timestamp: self.time.now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            portal_run_id,
            workflow_name: run.workflow.workflow_name,
            workflow_version: run.workflow.workflow_version,
            workflow_run_name: run.workflow_run_name,
            linked_libraries: run.libraries,
            payload: StateChangePayload {
                version: payload.version,
                data,
            },
        })
    }
}

fn run_dir(output_uri: &str, prefix: &str, reference: &ReferenceGenome, stage: &str) -> String {
    format!(
        "{output_uri}{prefix}__{}__{}__dragen_{stage}/",
        reference.name, reference.structure
    )
}

/// The locations dragen writes to under `output_uri` for a run with `inputs`
pub fn derive_outputs(output_uri: &str, inputs: &DragenInputs) -> Map<String, Value> {
    let out = as_directory(output_uri);
    let normal = inputs.sample_name.as_str();
    let mut outputs = Map::new();
    let mut put = |key: &str, value: String| {
        outputs.insert(key.to_string(), Value::String(value));
    };

    let alignment = run_dir(&out, normal, &inputs.reference, "alignment");
    put("dragenGermlineAlignmentOutputBamUri", format!("{alignment}{normal}.bam"));
    put("dragenGermlineAlignmentOutputUri", alignment);

    let variant_calling = run_dir(&out, normal, &inputs.reference, "variant_calling");
    put(
        "dragenGermlineVariantCallingOutputSnvVcfUri",
        format!("{variant_calling}{normal}.hard-filtered.vcf.gz"),
    );
    put("dragenGermlineVariantCallingOutputUri", variant_calling);

    let multiqc_prefix = match inputs.tumor_sample_name.as_deref() {
        None => normal.to_string(),
        Some(tumor) => {
            if let Some(somatic_reference) = &inputs.somatic_reference {
                let alignment = run_dir(&out, normal, somatic_reference, "alignment");
                put(
                    "dragenGermlineAlignmentToSomaticReferenceOutputBamUri",
                    format!("{alignment}{normal}.bam"),
                );
                put("dragenGermlineAlignmentToSomaticReferenceOutputUri", alignment);
            }

            let somatic_reference = inputs.somatic_reference.as_ref().unwrap_or(&inputs.reference);

            let alignment = run_dir(&out, tumor, somatic_reference, "alignment");
            put("dragenSomaticAlignmentOutputBamUri", format!("{alignment}{tumor}.bam"));
            put("dragenSomaticAlignmentOutputUri", alignment);

            let variant_calling = run_dir(
                &out,
                &format!("{tumor}__{normal}"),
                somatic_reference,
                "variant_calling",
            );
            put(
                "dragenSomaticVariantCallingOutputSnvVcfUri",
                format!("{variant_calling}{tumor}.hard-filtered.vcf.gz"),
            );
            put("dragenSomaticVariantCallingOutputUri", variant_calling);

            format!("{tumor}_{normal}")
        }
    };

    let multiqc = format!("{out}{multiqc_prefix}_multiqc/");
    put(
        "multiQcHtmlReportUri",
        format!("{multiqc}{multiqc_prefix}_multiqc_report.html"),
    );
    put("multiQcOutputDir", multiqc);

    outputs
}

#[cfg(test)]
mod tests;
