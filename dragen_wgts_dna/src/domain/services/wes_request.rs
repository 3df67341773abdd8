//! Turning a dragen wgts dna READY event into a workflow execution launch request.
//!
//! Workflow inputs arrive camelCased with bare uris. The workflow expects
//! snake_case keys and typed `{class, location}` objects for every file or
//! directory input, and its fastq list rows name reads `read_1` and `read_2`.

use serde_json::{Map, Value, json};

use crate::domain::models::{
    CwlClass, CwlLocation, DomainErr, EngineDefaults, PayloadData, ReadyEventDetail, WesRequest,
};

use super::casing::snake_case_keys;

/// Optional inputs holding a single location, by path and wire name
const OPTIONAL_LOCATIONS: [(&[&str], &str); 4] = [
    (&["oraReference"], "oraReference"),
    (
        &["somaticMsiOptions", "msiMicrosatellitesFile"],
        "somaticMsiOptions.msiMicrosatellitesFile",
    ),
    (
        &["nirvanaAnnotationOptions", "variantAnnotationData"],
        "nirvanaAnnotationOptions.variantAnnotationData",
    ),
    (
        &["somaticNirvanaAnnotationOptions", "variantAnnotationData"],
        "somaticNirvanaAnnotationOptions.variantAnnotationData",
    ),
];

const READS: [(&str, &str, &str); 2] = [
    ("read1FileUri", "read_1", "fastqListRows.read1FileUri"),
    ("read2FileUri", "read_2", "fastqListRows.read2FileUri"),
];

/// Build the launch request for a READY event
#[tracing::instrument(err, skip(detail), fields(portal_run_id = ?detail.portal_run_id))]
pub fn ready_to_wes_request(
    detail: ReadyEventDetail,
    defaults: &EngineDefaults,
) -> Result<WesRequest, DomainErr> {
    let portal_run_id = detail
        .portal_run_id
        .filter(|s| !s.is_empty())
        .ok_or(DomainErr::MissingInput("portalRunId"))?;
    let name = detail
        .workflow_run_name
        .filter(|s| !s.is_empty())
        .ok_or(DomainErr::MissingInput("workflowRunName"))?;

    let PayloadData {
        mut inputs,
        mut engine_parameters,
        mut tags,
        ..
    } = detail.payload.data;

    for key in ["sequenceData", "tumorSequenceData"] {
        if let Some(sequence_data) = inputs.get_mut(key) {
            rename_reads(sequence_data)?;
        }
    }

    let reference = location_at(&mut inputs, &["reference", "tarball"])
        .ok_or(DomainErr::MissingInput("reference.tarball"))?;
    wrap_location(reference, "reference.tarball")?;

    if inputs.contains_key("somaticReference") {
        let somatic = location_at(&mut inputs, &["somaticReference", "tarball"])
            .ok_or(DomainErr::MissingInput("somaticReference.tarball"))?;
        wrap_location(somatic, "somaticReference.tarball")?;
    }

    for (path, field) in OPTIONAL_LOCATIONS {
        if let Some(location) = location_at(&mut inputs, path).filter(|v| !v.is_null()) {
            wrap_location(location, field)?;
        }
    }

    for (key, default) in [
        ("projectId", &defaults.project_id),
        ("pipelineId", &defaults.pipeline_id),
    ] {
        if let Some(default) = default {
            engine_parameters
                .entry(key)
                .or_insert_with(|| Value::String(default.clone()));
        }
    }

    tags.insert("portalRunId".to_string(), Value::String(portal_run_id));

    Ok(WesRequest {
        name,
        inputs: snake_case_keys(Value::Object(inputs)),
        engine_parameters,
        tags,
    })
}

fn location_at<'a>(inputs: &'a mut Map<String, Value>, path: &[&str]) -> Option<&'a mut Value> {
    let (first, rest) = path.split_first()?;
    rest.iter()
        .try_fold(inputs.get_mut(*first)?, |node, key| node.get_mut(*key))
}

fn rename_reads(sequence_data: &mut Value) -> Result<(), DomainErr> {
    let Some(rows) = sequence_data
        .get_mut("fastqListRows")
        .and_then(Value::as_array_mut)
    else {
        return Ok(());
    };

    for row in rows.iter_mut().filter_map(Value::as_object_mut) {
        for (from, to, field) in READS {
            if let Some(mut uri) = row.remove(from).filter(|uri| !uri.is_null()) {
                wrap_location(&mut uri, field)?;
                row.insert(to.to_string(), uri);
            }
        }
    }
    Ok(())
}

/// Replace a bare uri with its typed form. Already typed locations are left as they are.
fn wrap_location(value: &mut Value, field: &'static str) -> Result<(), DomainErr> {
    match value {
        Value::String(uri) => {
            let location = CwlLocation::new(std::mem::take(uri));
            *value = json!({
                "class": location.class.to_string(),
                "location": location.location,
            });
            Ok(())
        }
        Value::Object(typed) if is_typed_location(&*typed) => Ok(()),
        Value::Null => Err(DomainErr::MissingInput(field)),
        other => Err(DomainErr::InvalidInput {
            field,
            detail: format!("expected a uri, got {other}"),
        }),
    }
}

fn is_typed_location(map: &Map<String, Value>) -> bool {
    map.get("class")
        .and_then(Value::as_str)
        .is_some_and(|class| class.parse::<CwlClass>().is_ok())
        && map.get("location").is_some_and(Value::is_string)
}
