use log::warn;

use crate::client::jobs::Propagation;
use crate::client::types::Job;
use crate::client::KubeClient;
use crate::config;

/// Completed runs kept per (release, outcome) pair; older ones are deleted.
pub const RETENTION_LIMIT: usize = 20;

/// Splits one release's records into succeeded and failed runs.
///
/// A job with running pods never qualifies, whatever its other counters say,
/// and a job without a completion timestamp has nothing to order on, so both
/// are left out. Each bucket comes back most recently completed first; the
/// sort is stable, so runs completing in the same instant keep their
/// discovery order.
pub fn partition_completed(jobs: Vec<Job>) -> (Vec<Job>, Vec<Job>) {
    let mut succeeded = Vec::new();
    let mut failed = Vec::new();

    for job in jobs {
        if job.is_active() {
            continue;
        }
        if job.status.succeeded > 0 && job.status.completion_time.is_some() {
            succeeded.push(job);
        } else if job.status.failed > 0 && job.status.completion_time.is_some() {
            failed.push(job);
        }
    }

    succeeded.sort_by(|a, b| b.status.completion_time.cmp(&a.status.completion_time));
    failed.sort_by(|a, b| b.status.completion_time.cmp(&a.status.completion_time));

    (succeeded, failed)
}

async fn prune_bucket(client: &KubeClient, bucket: &[Job]) {
    for job in bucket.iter().skip(RETENTION_LIMIT) {
        let namespace = config::namespace_or_default(&job.metadata.namespace);
        // A record that will not delete must not block the rest of the pass.
        if let Err(err) = client
            .delete_job(namespace, &job.metadata.name, Propagation::Default)
            .await
        {
            warn!("Could not delete job {namespace}/{}: {err}", job.metadata.name);
        }
    }
}

/// Deletes everything beyond the retention limit in one release's history,
/// oldest first to go.
pub async fn enforce_retention(client: &KubeClient, jobs: Vec<Job>) {
    let (succeeded, failed) = partition_completed(jobs);
    prune_bucket(client, &failed).await;
    prune_bucket(client, &succeeded).await;
}
