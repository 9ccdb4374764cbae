//! Pure manifest mutations
//!
//! Each function takes the template by reference and returns a new
//! document set, so no iteration can observe another iteration's edits.

use crate::documents::ManifestDocuments;
use crate::error::{ManifestError, ManifestResult};
use serde_yaml::{Mapping, Value};

/// Kinds that carry the replica count
pub const WORKLOAD_KINDS: &[&str] = &["StatefulSet", "Deployment"];

pub const JOB_KINDS: &[&str] = &["Job"];

/// Copy of `documents` with `spec.replicas` set on the workload document
pub fn with_replica_count(
    documents: &ManifestDocuments,
    replicas: u32,
) -> ManifestResult<ManifestDocuments> {
    let mut updated = documents.clone();
    let workload = updated.find_kind_mut(WORKLOAD_KINDS)?;
    let kind = kind_of(workload);

    let spec = mapping_field(workload, "spec", &kind)?;
    spec.insert(Value::from("replicas"), Value::from(replicas));

    Ok(updated)
}

/// Copy of `documents` with the first container's command replaced on the Job
pub fn with_job_command(
    documents: &ManifestDocuments,
    command: &[String],
) -> ManifestResult<ManifestDocuments> {
    let mut updated = documents.clone();
    let job = updated.find_kind_mut(JOB_KINDS)?;
    let kind = kind_of(job);

    let spec = mapping_field(job, "spec", &kind)?;
    let template = mapping_field_in(spec, "template", &kind)?;
    let pod_spec = mapping_field_in(template, "spec", &kind)?;
    let container = pod_spec
        .get_mut("containers")
        .and_then(Value::as_sequence_mut)
        .and_then(|containers| containers.first_mut())
        .and_then(Value::as_mapping_mut)
        .ok_or_else(|| ManifestError::MissingField {
            kind: kind.clone(),
            field: "spec.template.spec.containers[0]",
        })?;

    let command = command.iter().map(|arg| Value::from(arg.as_str())).collect();
    container.insert(Value::from("command"), Value::Sequence(command));

    Ok(updated)
}

/// Current replica count of the workload document, if set
pub fn replica_count(documents: &ManifestDocuments) -> Option<u64> {
    documents
        .find_kind(WORKLOAD_KINDS)?
        .get("spec")?
        .get("replicas")?
        .as_u64()
}

fn kind_of(document: &Value) -> String {
    document
        .get("kind")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}

fn mapping_field<'a>(
    document: &'a mut Value,
    field: &'static str,
    kind: &str,
) -> ManifestResult<&'a mut Mapping> {
    document
        .get_mut(field)
        .and_then(Value::as_mapping_mut)
        .ok_or_else(|| ManifestError::MissingField {
            kind: kind.to_string(),
            field,
        })
}

fn mapping_field_in<'a>(
    mapping: &'a mut Mapping,
    field: &'static str,
    kind: &str,
) -> ManifestResult<&'a mut Mapping> {
    mapping
        .get_mut(field)
        .and_then(Value::as_mapping_mut)
        .ok_or_else(|| ManifestError::MissingField {
            kind: kind.to_string(),
            field,
        })
}
