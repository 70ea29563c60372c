use log::info;

use crate::client::jobs::Propagation;
use crate::client::KubeClient;
use crate::config::{self, RemoveAllOpts};
use crate::error::Result;

/// Deletes every job matching the selector in one namespace, dependents
/// removed in the background.
///
/// Plain bulk removal: no grouping, no retention counting, and the first
/// failure is surfaced, unlike the tolerant cleanup pass.
pub async fn remove_all_jobs(client: &KubeClient, opts: &RemoveAllOpts) -> Result<()> {
    let namespace = config::namespace_or_default(&opts.job_namespace);
    let mut continue_token = String::new();
    let mut removed = 0usize;

    loop {
        let page = client
            .list_jobs_page(namespace, Some(&opts.label_selector), None, &continue_token)
            .await?;

        for job in &page.items {
            client
                .delete_job(namespace, &job.metadata.name, Propagation::Background)
                .await?;
            removed += 1;
        }

        if page.metadata.continue_token.is_empty() {
            break;
        }
        continue_token = page.metadata.continue_token;
    }

    info!(
        "Removed {removed} job(s) matching {} in {namespace}",
        opts.label_selector
    );
    Ok(())
}
