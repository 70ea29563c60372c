use anyhow::Result;
use clap::{Parser, Subcommand};
use log::warn;
use std::path::PathBuf;

use crate::client::KubeClient;
use crate::config::{CreateOpts, RemoveAllOpts};
use crate::{cleanup, dispatch, remove};

#[derive(Parser)]
#[command(name = "jobkeeper")]
#[command(author, version, about = "Creates, guards and prunes Kubernetes batch jobs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a job from a template unless an equivalent run is active,
    /// pruning old runs alongside.
    Create {
        /// Path to the Job manifest to submit.
        #[arg(long, env = "JOB_TEMPLATE_PATH")]
        template: PathBuf,

        /// Selector identifying equivalent runs of this job.
        #[arg(long, env = "LABEL_SELECTOR")]
        selector: String,

        /// Pull secret names appended to the template's pod spec.
        #[arg(long, env = "IMAGE_PULL_SECRETS", value_delimiter = ',')]
        image_pull_secrets: Vec<String>,

        /// Submit even while an equivalent run is active.
        #[arg(long, env = "ALLOW_CONCURRENCY", default_value_t = false)]
        allow_concurrency: bool,
    },

    /// Delete every job matching a selector in one namespace.
    RemoveAll {
        /// Selector identifying the jobs to remove.
        #[arg(long, env = "LABEL_SELECTOR")]
        selector: String,

        /// Namespace to remove them from (the cluster default if unset).
        #[arg(long, env = "JOB_NAMESPACE", default_value = "")]
        namespace: String,
    },
}

impl Cli {
    async fn execute_create(&self, opts: CreateOpts) -> Result<()> {
        let client = KubeClient::in_cluster()?;

        // The retention pass runs alongside the dispatch; one invocation
        // does both.
        let pruning = tokio::spawn(cleanup::cleanup_jobs(client.clone()));

        dispatch::submit(&client, &opts).await?;

        if let Err(err) = pruning.await {
            warn!("Cleanup task failed: {err}");
        }

        Ok(())
    }

    async fn execute_remove_all(&self, opts: RemoveAllOpts) -> Result<()> {
        let client = KubeClient::in_cluster()?;
        remove::remove_all_jobs(&client, &opts).await?;
        Ok(())
    }

    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Create {
                template,
                selector,
                image_pull_secrets,
                allow_concurrency,
            } => {
                let opts = CreateOpts {
                    image_pull_secrets: image_pull_secrets.clone(),
                    job_template_path: template.clone(),
                    label_selector: selector.clone(),
                    allow_concurrency: *allow_concurrency,
                };
                self.execute_create(opts).await
            }
            Commands::RemoveAll {
                selector,
                namespace,
            } => {
                let opts = RemoveAllOpts {
                    label_selector: selector.clone(),
                    job_namespace: namespace.clone(),
                };
                self.execute_remove_all(opts).await
            }
        }
    }
}
