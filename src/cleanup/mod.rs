mod grouping;
mod retention;

pub use grouping::group_by_release;
pub use retention::enforce_retention;

use futures::future::join_all;
use log::{info, warn};

use crate::client::types::Job;
use crate::client::KubeClient;
use crate::retry::{with_retry, MAX_ATTEMPTS};

/// Collects every namespace name the API server will hand out.
///
/// Best effort: a page that keeps failing past its retries ends the walk
/// with whatever was gathered up to that point.
async fn collect_namespaces(client: &KubeClient) -> Vec<String> {
    let mut names = Vec::new();
    let mut continue_token = String::new();

    loop {
        let page = match with_retry(MAX_ATTEMPTS, || client.list_namespaces_page(&continue_token))
            .await
        {
            Ok(page) => page,
            Err(err) => {
                warn!("Could not enumerate namespaces: {err}");
                break;
            }
        };

        names.extend(page.items.into_iter().map(|ns| ns.metadata.name));

        if page.metadata.continue_token.is_empty() {
            break;
        }
        continue_token = page.metadata.continue_token;
    }

    names
}

/// Collects every job in one namespace, page by page in cursor order.
/// Best effort like namespace enumeration.
async fn collect_jobs(client: &KubeClient, namespace: &str) -> Vec<Job> {
    let mut jobs = Vec::new();
    let mut continue_token = String::new();

    loop {
        let page = match with_retry(MAX_ATTEMPTS, || {
            client.list_jobs_page(namespace, None, None, &continue_token)
        })
        .await
        {
            Ok(page) => page,
            Err(err) => {
                warn!("Could not enumerate jobs in {namespace}: {err}");
                break;
            }
        };

        jobs.extend(page.items);

        if page.metadata.continue_token.is_empty() {
            break;
        }
        continue_token = page.metadata.continue_token;
    }

    jobs
}

/// One full retention pass over the cluster.
///
/// Fans out one task per namespace to gather job records, merges the
/// per-task results, groups the merged collection by release and fans out
/// again, one task per release, deleting everything beyond the retention
/// limit. Enumeration failures shrink the pass instead of failing it; the
/// pass always runs to completion.
pub async fn cleanup_jobs(client: KubeClient) {
    info!("Deleting older job runs, if any");

    let namespaces = collect_namespaces(&client).await;

    let listings: Vec<_> = namespaces
        .into_iter()
        .map(|namespace| {
            let client = client.clone();
            tokio::spawn(async move { collect_jobs(&client, &namespace).await })
        })
        .collect();

    // Each task hands back its own collection; merging happens here,
    // sequentially, rather than under a shared lock.
    let mut jobs = Vec::new();
    for handle in join_all(listings).await {
        match handle {
            Ok(batch) => jobs.extend(batch),
            Err(err) => warn!("Job enumeration task failed: {err}"),
        }
    }

    let groups = group_by_release(jobs);

    let prunes: Vec<_> = groups
        .into_iter()
        .map(|(_, jobs)| {
            let client = client.clone();
            tokio::spawn(async move { enforce_retention(&client, jobs).await })
        })
        .collect();

    for handle in join_all(prunes).await {
        if let Err(err) = handle {
            warn!("Retention task failed: {err}");
        }
    }

    info!("Deleted older job runs, if any");
}
