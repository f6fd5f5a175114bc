//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use failure_lines_shared::TestFailureLine;
use opensearch::{
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesRefreshParts},
    BulkParts, CountParts, OpenSearch,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::get_index_settings;

/// OpenSearch provider implementation.
///
/// # Example
///
/// ```ignore
/// use failure_lines_repository::{OpenSearchProvider, SearchIndexProvider};
///
/// let provider = OpenSearchProvider::new("http://localhost:9200").await?;
/// if !provider.index_exists("failure-lines_v0").await? {
///     provider.create_index("failure-lines_v0").await?;
/// }
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or transport setup fails
    pub async fn new(url: &str) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch provider");

        Ok(Self { client })
    }

    /// Build the newline-delimited bulk body: one `index` action line
    /// followed by the document source, per document.
    fn bulk_body(documents: &[TestFailureLine]) -> Result<Vec<JsonBody<Value>>, SearchIndexError> {
        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);
        for document in documents {
            let source = serde_json::to_value(document)
                .map_err(|e| SearchIndexError::serialization(e.to_string()))?;
            body.push(json!({ "index": { "_id": document.document_id() } }).into());
            body.push(source.into());
        }
        Ok(body)
    }

    /// Collapse a bulk response into a single outcome.
    ///
    /// Any failed item fails the batch; the error reports how many items
    /// failed and the first reason given.
    fn summarize_bulk_response(response: &Value, submitted: usize) -> Result<usize, SearchIndexError> {
        if !response["errors"].as_bool().unwrap_or(false) {
            return Ok(submitted);
        }

        let failures: Vec<&Value> = response["items"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("index"))
                    .filter(|result| result.get("error").is_some())
                    .collect()
            })
            .unwrap_or_default();

        let first_reason = failures
            .first()
            .map(|result| {
                format!(
                    "document {}: {}",
                    result["_id"].as_str().unwrap_or("?"),
                    result["error"]["reason"]
                        .as_str()
                        .unwrap_or("unknown reason")
                )
            })
            .unwrap_or_else(|| "no item error reported".to_string());

        Err(SearchIndexError::bulk_index(format!(
            "{} of {} documents failed; first failure: {}",
            failures.len(),
            submitted,
            first_reason
        )))
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::index_lookup(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(SearchIndexError::index_lookup(format!(
                "Exists check for {} returned status {}",
                index, status
            ))),
        }
    }

    async fn create_index(&self, index: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %index, status = %status, body = %error_body, "Create index request failed");
            return Err(SearchIndexError::index_creation(format!(
                "Create {} failed with status {}: {}",
                index, status, error_body
            )));
        }

        info!(index = %index, "Index created");
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::index_deletion(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - the index may not exist
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %index, status = %status, body = %error_body, "Delete index request failed");
            return Err(SearchIndexError::index_deletion(format!(
                "Delete {} failed with status {}: {}",
                index, status, error_body
            )));
        }

        debug!(index = %index, existed = status.is_success(), "Index deleted");
        Ok(())
    }

    #[instrument(skip(self, documents), fields(document_count = documents.len()))]
    async fn bulk_index_documents(
        &self,
        index: &str,
        documents: &[TestFailureLine],
    ) -> Result<usize, SearchIndexError> {
        if documents.is_empty() {
            return Ok(0);
        }

        let body = Self::bulk_body(documents)?;

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk_index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchIndexError::bulk_index(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body = response
            .json::<Value>()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        let written = Self::summarize_bulk_response(&response_body, documents.len())?;
        debug!(written = written, "Bulk request completed");
        Ok(written)
    }

    async fn count_documents(&self, index: &str) -> Result<u64, SearchIndexError> {
        // Make the last bulk writes visible before counting
        let refresh = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::count(e.to_string()))?;
        if !refresh.status_code().is_success() {
            debug!(index = %index, status = %refresh.status_code(), "Refresh before count failed");
        }

        let response = self
            .client
            .count(CountParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::count(e.to_string()))?;

        let status = response.status_code();

        // An absent index holds no documents
        if status.as_u16() == 404 {
            debug!(index = %index, "Index absent, counting zero documents");
            return Ok(0);
        }

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SearchIndexError::count(format!(
                "Count on {} failed with status {}: {}",
                index, status, error_body
            )));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        body["count"]
            .as_u64()
            .ok_or_else(|| SearchIndexError::parse(format!("Count response has no count: {}", body)))
    }
}
