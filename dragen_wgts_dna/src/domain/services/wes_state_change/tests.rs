use chrono::{DateTime, Utc};
use cool_asserts::assert_matches;
use serde_json::json;

use crate::domain::{
    models::{LinkedLibrary, Payload, PayloadData, Workflow, WorkflowRun},
    ports::{MockTimeGetter, MockWorkflowRegistry},
};

use super::*;

const OUT: &str = "s3://bucket/analysis/dragen-wgts-dna/20250606abcd1234/";

fn reference(structure: &str) -> ReferenceGenome {
    ReferenceGenome {
        name: "hg38".to_string(),
        structure: structure.to_string(),
    }
}

fn germline() -> DragenInputs {
    DragenInputs {
        sample_name: "L2301197".to_string(),
        tumor_sample_name: None,
        reference: reference("graph"),
        somatic_reference: None,
    }
}

fn outputs(pairs: &[(&str, &str)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

#[test]
fn it_derives_germline_outputs() {
    assert_eq!(
        derive_outputs(OUT, &germline()),
        outputs(&[
            (
                "dragenGermlineAlignmentOutputUri",
                "s3://bucket/analysis/dragen-wgts-dna/20250606abcd1234/L2301197__hg38__graph__dragen_alignment/"
            ),
            (
                "dragenGermlineAlignmentOutputBamUri",
                "s3://bucket/analysis/dragen-wgts-dna/20250606abcd1234/L2301197__hg38__graph__dragen_alignment/L2301197.bam"
            ),
            (
                "dragenGermlineVariantCallingOutputUri",
                "s3://bucket/analysis/dragen-wgts-dna/20250606abcd1234/L2301197__hg38__graph__dragen_variant_calling/"
            ),
            (
                "dragenGermlineVariantCallingOutputSnvVcfUri",
                "s3://bucket/analysis/dragen-wgts-dna/20250606abcd1234/L2301197__hg38__graph__dragen_variant_calling/L2301197.hard-filtered.vcf.gz"
            ),
            (
                "multiQcOutputDir",
                "s3://bucket/analysis/dragen-wgts-dna/20250606abcd1234/L2301197_multiqc/"
            ),
            (
                "multiQcHtmlReportUri",
                "s3://bucket/analysis/dragen-wgts-dna/20250606abcd1234/L2301197_multiqc/L2301197_multiqc_report.html"
            ),
        ])
    );
}

#[test]
fn it_derives_somatic_outputs() {
    let inputs = DragenInputs {
        tumor_sample_name: Some("L2301198".to_string()),
        somatic_reference: Some(reference("linear")),
        ..germline()
    };

    let derived = derive_outputs(OUT.trim_end_matches('/'), &inputs);

    assert_eq!(derived.len(), 12);
    assert_eq!(
        derived["dragenGermlineAlignmentToSomaticReferenceOutputUri"],
        json!(format!("{OUT}L2301197__hg38__linear__dragen_alignment/"))
    );
    assert_eq!(
        derived["dragenSomaticAlignmentOutputBamUri"],
        json!(format!("{OUT}L2301198__hg38__linear__dragen_alignment/L2301198.bam"))
    );
    assert_eq!(
        derived["dragenSomaticVariantCallingOutputSnvVcfUri"],
        json!(format!(
            "{OUT}L2301198__L2301197__hg38__linear__dragen_variant_calling/L2301198.hard-filtered.vcf.gz"
        ))
    );
    assert_eq!(
        derived["multiQcHtmlReportUri"],
        json!(format!("{OUT}L2301198_L2301197_multiqc/L2301198_L2301197_multiqc_report.html"))
    );
}

#[test]
fn it_calls_somatic_variants_against_the_germline_reference_by_default() {
    let inputs = DragenInputs {
        tumor_sample_name: Some("L2301198".to_string()),
        ..germline()
    };

    let derived = derive_outputs(OUT, &inputs);

    assert_eq!(derived.len(), 10);
    assert!(!derived.contains_key("dragenGermlineAlignmentToSomaticReferenceOutputUri"));
    assert_eq!(
        derived["dragenSomaticAlignmentOutputUri"],
        json!(format!("{OUT}L2301198__hg38__graph__dragen_alignment/"))
    );
}

fn registry() -> MockWorkflowRegistry {
    let mut registry = MockWorkflowRegistry::new();
    registry
        .expect_get_workflow_run_by_portal_run_id()
        .withf(|id| id.to_string() == "20250606abcd1234")
        .times(1)
        .returning(|_| {
            Box::pin(async move {
                Ok(WorkflowRun {
                    orcabus_id: "wfr.01JX".to_string(),
                    portal_run_id: "20250606abcd1234".to_string(),
                    workflow_run_name: "umccr--automated--dragen-wgts-dna--4-4-4--20250606abcd1234"
                        .to_string(),
                    workflow: Workflow {
                        workflow_name: "dragen-wgts-dna".to_string(),
                        workflow_version: "4.4.4".to_string(),
                    },
                    libraries: vec![LinkedLibrary {
                        orcabus_id: "lib.01".to_string(),
                        library_id: "L2301197".to_string(),
                    }],
                })
            })
        });
    registry
        .expect_get_latest_payload()
        .withf(|id| id.to_string() == "wfr.01JX")
        .times(1)
        .returning(|_| {
            Box::pin(async move {
                Ok(Payload {
                    ref_id: Some("pld.01".to_string()),
                    version: "2025.06.06".to_string(),
                    data: PayloadData {
                        inputs: json!({
                            "sampleName": "L2301197",
                            "reference": {"name": "hg38", "structure": "graph", "tarball": "s3://refs/ref.tar.gz"}
                        })
                        .as_object()
                        .cloned()
                        .unwrap_or_default(),
                        outputs: Some(outputs(&[("previousOutput", "s3://bucket/stale/")])),
                        ..Default::default()
                    },
                })
            })
        });
    registry
}

fn clock() -> MockTimeGetter {
    let now: DateTime<Utc> = "2025-06-06T04:39:31.123456Z".parse().unwrap();
    let mut time = MockTimeGetter::new();
    time.expect_now().return_const(now);
    time
}

fn event(status: &str) -> WesStateChangeEvent {
    serde_json::from_value(json!({
        "id": "wes.01",
        "name": "umccr--automated--dragen-wgts-dna--4-4-4--20250606abcd1234",
        "status": status,
        "engineParameters": {"outputUri": OUT},
        "tags": {"portalRunId": "20250606abcd1234"}
    }))
    .unwrap()
}

#[tokio::test]
async fn it_replaces_outputs_on_succeeded_runs() {
    let change = WesEventService::new(registry(), clock())
        .to_workflow_run_state_change(event("SUCCEEDED"))
        .await
        .unwrap();

    assert_eq!(change.status, "SUCCEEDED");
    assert_eq!(change.timestamp, "2025-06-06T04:39:31Z");
    assert_eq!(change.workflow_name, "dragen-wgts-dna");
    assert_eq!(change.linked_libraries.len(), 1);
    assert_eq!(change.payload.version, "2025.06.06");

    let outputs = change.payload.data.outputs.unwrap();
    assert_eq!(
        outputs.keys().map(String::as_str).collect::<Vec<_>>(),
        vec![
            "dragenGermlineAlignmentOutputBamUri",
            "dragenGermlineAlignmentOutputUri",
            "dragenGermlineVariantCallingOutputSnvVcfUri",
            "dragenGermlineVariantCallingOutputUri",
            "multiQcOutputDir",
        ]
    );
    assert_eq!(
        outputs["dragenGermlineAlignmentOutputBamUri"],
        json!(format!("{OUT}L2301197__hg38__graph__dragen_alignment/L2301197.bam"))
    );
}

#[tokio::test]
async fn it_strips_outputs_from_other_states() {
    let change = WesEventService::new(registry(), clock())
        .to_workflow_run_state_change(event("RUNNING"))
        .await
        .unwrap();

    assert_eq!(change.status, "RUNNING");
    assert_matches!(change.payload.data.outputs, None);

    let wire = serde_json::to_value(&change).unwrap();
    assert!(wire["payload"]["data"].get("outputs").is_none());
    assert_eq!(wire["portalRunId"], json!("20250606abcd1234"));
    assert_eq!(
        wire["linkedLibraries"],
        json!([{"orcabusId": "lib.01", "libraryId": "L2301197"}])
    );
}

#[tokio::test]
async fn it_requires_a_portal_run_id() {
    let mut event = event("RUNNING");
    event.tags.portal_run_id = None;

    let err = WesEventService::new(MockWorkflowRegistry::new(), MockTimeGetter::new())
        .to_workflow_run_state_change(event)
        .await
        .unwrap_err();

    assert_matches!(err, DomainErr::MissingInput("tags.portalRunId"));
}

#[tokio::test]
async fn it_requires_an_output_uri_on_success() {
    let mut event = event("SUCCEEDED");
    event.engine_parameters.output_uri = None;

    let err = WesEventService::new(registry(), MockTimeGetter::new())
        .to_workflow_run_state_change(event)
        .await
        .unwrap_err();

    assert_matches!(err, DomainErr::MissingInput("engineParameters.outputUri"));
}
