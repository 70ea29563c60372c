use indexmap::IndexMap;
use log::debug;

use crate::client::types::Job;

/// Label a Helm release stamps on the jobs it owns.
pub const RELEASE_NAME_LABEL: &str = "meta.helm.sh/release-name";
/// Fallback ownership label for charts that only set the standard set.
pub const INSTANCE_LABEL: &str = "app.kubernetes.io/instance";

/// Ownership identity of a job, derived from its labels.
pub fn release_key(job: &Job) -> Option<&str> {
    job.metadata
        .labels
        .get(RELEASE_NAME_LABEL)
        .filter(|value| !value.is_empty())
        .or_else(|| {
            job.metadata
                .labels
                .get(INSTANCE_LABEL)
                .filter(|value| !value.is_empty())
        })
        .map(String::as_str)
}

/// Partitions jobs by release.
///
/// A job whose labels yield no release key cannot be attributed to an owner,
/// so it is left out of every group, which also keeps it permanently out of
/// retention deletion.
pub fn group_by_release(jobs: Vec<Job>) -> IndexMap<String, Vec<Job>> {
    let mut groups: IndexMap<String, Vec<Job>> = IndexMap::new();
    let mut unattributed = 0usize;

    for job in jobs {
        let Some(key) = release_key(&job).map(str::to_owned) else {
            unattributed += 1;
            continue;
        };
        groups.entry(key).or_default().push(job);
    }

    if unattributed > 0 {
        debug!("{unattributed} job(s) carry no release label and were left out of retention");
    }

    groups
}
