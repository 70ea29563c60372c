use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A `batch/v1` Job as exchanged with the Kubernetes API.
///
/// Only the fields this tool reads or rewrites are modeled. Everything else
/// in the object is carried through the flattened `extra` maps untouched, so
/// a template read from YAML reaches the create call with its pod spec
/// intact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: JobSpec,

    /// Status as observed by the cluster; absent on templates.
    #[serde(default, skip_serializing_if = "JobStatus::is_unset")]
    pub status: JobStatus,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Job {
    /// Whether the cluster currently reports running pods for this job.
    pub fn is_active(&self) -> bool {
        self.status.active > 0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub labels: IndexMap<String, String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    #[serde(default)]
    pub template: PodTemplateSpec,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplateSpec {
    #[serde(default)]
    pub spec: PodSpec,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    /// References to registry credentials the pod may pull with.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_pull_secrets: Vec<LocalObjectReference>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalObjectReference {
    pub name: String,
}

/// Counter summary the cluster maintains for a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    /// Pods currently running.
    #[serde(default)]
    pub active: i32,

    /// Pods that finished successfully.
    #[serde(default)]
    pub succeeded: i32,

    /// Pods that ran to failure.
    #[serde(default)]
    pub failed: i32,

    /// When the job finished, if it has.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl JobStatus {
    fn is_unset(&self) -> bool {
        *self == JobStatus::default()
    }
}

/// Continuation metadata of a paginated list response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMeta {
    /// Opaque cursor for the next page; empty once the collection is
    /// exhausted.
    #[serde(default, rename = "continue")]
    pub continue_token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobList {
    #[serde(default)]
    pub metadata: ListMeta,

    #[serde(default)]
    pub items: Vec<Job>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Namespace {
    #[serde(default)]
    pub metadata: ObjectMeta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamespaceList {
    #[serde(default)]
    pub metadata: ListMeta,

    #[serde(default)]
    pub items: Vec<Namespace>,
}
