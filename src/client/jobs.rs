use super::core::KubeClient;
use super::types::{Job, JobList};
use crate::error::{JobkeeperError, Result};

/// Deletion mode forwarded as the `propagationPolicy` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Let the API server apply its default for the resource.
    Default,
    /// Remove dependents in the background once the job itself is gone.
    Background,
}

impl KubeClient {
    /// Fetches one page of the jobs collection in `namespace`.
    ///
    /// An empty `continue_token` requests the first page; the returned list
    /// carries the token for the next one, empty again once the collection
    /// is exhausted.
    pub async fn list_jobs_page(
        &self,
        namespace: &str,
        label_selector: Option<&str>,
        limit: Option<u32>,
        continue_token: &str,
    ) -> Result<JobList> {
        let url = self.url(&format!("apis/batch/v1/namespaces/{namespace}/jobs"))?;

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(selector) = label_selector {
            params.push(("labelSelector", selector.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        if !continue_token.is_empty() {
            params.push(("continue", continue_token.to_string()));
        }

        let response = self.execute(self.client.get(url).query(&params)).await?;
        Ok(response.json().await?)
    }

    /// Submits a job and returns the object the cluster stored.
    pub async fn create_job(&self, namespace: &str, job: &Job) -> Result<Job> {
        let url = self.url(&format!("apis/batch/v1/namespaces/{namespace}/jobs"))?;
        let response = self.execute(self.client.post(url).json(job)).await?;
        Ok(response.json().await?)
    }

    /// Deletes one job. A job that is already gone counts as deleted, since
    /// jobs complete and vanish on their own between listing and deletion.
    pub async fn delete_job(
        &self,
        namespace: &str,
        name: &str,
        propagation: Propagation,
    ) -> Result<()> {
        let url = self.url(&format!("apis/batch/v1/namespaces/{namespace}/jobs/{name}"))?;

        let mut request = self.client.delete(url);
        if propagation == Propagation::Background {
            request = request.query(&[("propagationPolicy", "Background")]);
        }

        match self.execute(request).await {
            Ok(_) => Ok(()),
            Err(JobkeeperError::Api { status: 404, .. }) => Ok(()),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::types::ObjectMeta;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_forwards_selector_limit_and_cursor() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/apis/batch/v1/namespaces/apps/jobs")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("labelSelector".into(), "app=sync".into()),
                Matcher::UrlEncoded("limit".into(), "25".into()),
                Matcher::UrlEncoded("continue".into(), "page-2".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "metadata": {"continue": ""},
                    "items": [{"metadata": {"name": "sync-7", "namespace": "apps"}}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = KubeClient::new(&server.url(), None).unwrap();
        let page = client
            .list_jobs_page("apps", Some("app=sync"), Some(25), "page-2")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].metadata.name, "sync-7");
        assert!(page.metadata.continue_token.is_empty());
    }

    #[tokio::test]
    async fn test_create_posts_the_manifest() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/apis/batch/v1/namespaces/default/jobs")
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(json!({
                "metadata": {"name": "nightly"}
            })))
            .with_status(201)
            .with_body(
                json!({"metadata": {"name": "nightly", "namespace": "default"}}).to_string(),
            )
            .create_async()
            .await;

        let job = Job {
            metadata: ObjectMeta {
                name: "nightly".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let client = KubeClient::new(&server.url(), None).unwrap();
        let created = client.create_job("default", &job).await.unwrap();

        mock.assert_async().await;
        assert_eq!(created.metadata.namespace, "default");
    }

    #[tokio::test]
    async fn test_delete_tolerates_missing_jobs() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/apis/batch/v1/namespaces/apps/jobs/gone")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"kind": "Status", "reason": "NotFound"}"#)
            .create_async()
            .await;

        let client = KubeClient::new(&server.url(), None).unwrap();
        let result = client.delete_job("apps", "gone", Propagation::Default).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_surfaces_other_failures() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/apis/batch/v1/namespaces/apps/jobs/locked")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let client = KubeClient::new(&server.url(), None).unwrap();
        let err = client
            .delete_job("apps", "locked", Propagation::Default)
            .await
            .unwrap_err();
        assert!(matches!(err, JobkeeperError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_background_propagation_is_requested() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/apis/batch/v1/namespaces/apps/jobs/stale")
            .match_query(Matcher::UrlEncoded(
                "propagationPolicy".into(),
                "Background".into(),
            ))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = KubeClient::new(&server.url(), None).unwrap();
        client
            .delete_job("apps", "stale", Propagation::Background)
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
