use log::info;

use crate::client::types::{Job, LocalObjectReference};
use crate::client::KubeClient;
use crate::config::{self, CreateOpts};
use crate::error::Result;
use crate::retry::{with_retry, MAX_ATTEMPTS};
use crate::template;

/// Page size for the active-run scan. Small on purpose: the scan usually
/// short-circuits on the first page.
const GUARD_PAGE_SIZE: u32 = 25;

/// Returns true as soon as any job matching `label_selector` in `namespace`
/// reports running pods.
///
/// The collection is walked page by page in cursor order; a positive match
/// ends the walk early, a negative answer requires visiting every page.
/// Listing failures are surfaced: a create decision is about to be made on
/// this answer, so a best-effort result is not good enough here.
pub async fn has_active_run(
    client: &KubeClient,
    namespace: &str,
    label_selector: &str,
) -> Result<bool> {
    let mut continue_token = String::new();

    loop {
        let page = with_retry(MAX_ATTEMPTS, || {
            client.list_jobs_page(
                namespace,
                Some(label_selector),
                Some(GUARD_PAGE_SIZE),
                &continue_token,
            )
        })
        .await?;

        if page.items.iter().any(Job::is_active) {
            return Ok(true);
        }

        if page.metadata.continue_token.is_empty() {
            return Ok(false);
        }
        continue_token = page.metadata.continue_token;
    }
}

/// Loads the template, enforces the single-active-run rule and submits.
///
/// `Ok(None)` means an equivalent job is already running and nothing was
/// created; for a `create` invocation that is a normal outcome, not a
/// failure.
pub async fn submit(client: &KubeClient, opts: &CreateOpts) -> Result<Option<Job>> {
    let mut job = template::read_job_template(&opts.job_template_path)?;
    let namespace = config::namespace_or_default(&job.metadata.namespace).to_owned();

    if !opts.allow_concurrency
        && has_active_run(client, &namespace, &opts.label_selector).await?
    {
        info!("An equivalent job is already active in {namespace}, skipping submission");
        return Ok(None);
    }

    for secret in &opts.image_pull_secrets {
        job.spec
            .template
            .spec
            .image_pull_secrets
            .push(LocalObjectReference {
                name: secret.clone(),
            });
    }

    let created = client.create_job(&namespace, &job).await?;
    info!("Created job {namespace}/{}", created.metadata.name);
    Ok(Some(created))
}
