use super::core::KubeClient;
use super::types::NamespaceList;
use crate::error::Result;

impl KubeClient {
    /// Fetches one page of the cluster's namespace collection.
    pub async fn list_namespaces_page(&self, continue_token: &str) -> Result<NamespaceList> {
        let url = self.url("api/v1/namespaces")?;

        let mut params: Vec<(&str, String)> = Vec::new();
        if !continue_token.is_empty() {
            params.push(("continue", continue_token.to_string()));
        }

        let response = self.execute(self.client.get(url).query(&params)).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_namespace_names_and_cursor_are_read() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/namespaces")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!({
                    "metadata": {"continue": "more"},
                    "items": [
                        {"metadata": {"name": "default"}},
                        {"metadata": {"name": "apps"}}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = KubeClient::new(&server.url(), None).unwrap();
        let page = client.list_namespaces_page("").await.unwrap();

        assert_eq!(page.metadata.continue_token, "more");
        let names: Vec<&str> = page.items.iter().map(|ns| ns.metadata.name.as_str()).collect();
        assert_eq!(names, vec!["default", "apps"]);
    }
}
