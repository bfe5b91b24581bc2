use async_trait::async_trait;
use reqwest::{Method, Request, Url};
use tracing::debug;

use crate::error::{Result, TransportError};
use crate::fetch::HttpClient;
use crate::services::dataset_api::DatasetApi;
use crate::table::{Table, Value};

/// Rows requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 50_000;

/// [`DatasetApi`] backed by a Socrata SODA resource endpoint.
///
/// Results are paged with `$limit`/`$offset` in `:id` order until a short
/// page arrives or `max_rows` rows have been read.
pub struct SocrataClient<C> {
    http: C,
    base_url: String,
    page_size: usize,
    max_rows: Option<usize>,
}

impl<C: HttpClient> SocrataClient<C> {
    pub fn new(http: C, domain: &str) -> Self {
        Self {
            http,
            base_url: format!("https://{domain}"),
            page_size: DEFAULT_PAGE_SIZE,
            max_rows: None,
        }
    }

    /// Sets the rows requested per page. Zero is rejected by
    /// [`crate::config::Config::validate`].
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_rows(mut self, max_rows: Option<usize>) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Builds the resource URL for one page. An empty filter sends no
    /// `$where` at all.
    pub fn resource_url(
        &self,
        dataset_id: &str,
        filter: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/resource/{}.json", self.base_url, dataset_id))
            .map_err(|e| TransportError::InvalidRequest(format!("{dataset_id}: {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            if !filter.is_empty() {
                query.append_pair("$where", filter);
            }
            query
                .append_pair("$limit", &limit.to_string())
                .append_pair("$offset", &offset.to_string())
                .append_pair("$order", ":id");
        }
        Ok(url)
    }

    async fn fetch_page(&self, url: Url) -> Result<Vec<serde_json::Value>> {
        let req = Request::new(Method::GET, url);
        let response = self
            .http
            .execute(req)
            .await
            .map_err(TransportError::from)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body }.into());
        }

        let records = response.json().await.map_err(TransportError::from)?;
        Ok(records)
    }
}

#[async_trait]
impl<C: HttpClient> DatasetApi for SocrataClient<C> {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn query(&self, dataset_id: &str, filter: &str) -> Result<Table> {
        let mut table = Table::default();
        let mut offset = 0;

        loop {
            let limit = match self.max_rows {
                Some(max) => self.page_size.min(max.saturating_sub(offset)),
                None => self.page_size,
            };
            if limit == 0 {
                break;
            }

            let url = self.resource_url(dataset_id, filter, limit, offset)?;
            let records = self.fetch_page(url).await?;
            let received = records.len();
            append_records(&mut table, records)?;
            debug!(offset, received, "Page received");

            offset += received;
            if received < limit {
                break;
            }
        }

        Ok(table)
    }
}

/// Appends JSON objects to `table`, widening its schema as new keys appear.
/// The service omits keys whose value is null, so absent keys read as `Null`.
pub fn append_records(table: &mut Table, records: Vec<serde_json::Value>) -> Result<()> {
    for record in records {
        match record {
            serde_json::Value::Object(fields) => {
                table.push_record(
                    fields
                        .into_iter()
                        .map(|(name, value)| (name, Value::from_json(value))),
                );
            }
            other => {
                return Err(TransportError::MalformedResponse(format!(
                    "expected a JSON object per record, got {other}"
                ))
                .into());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::fetch::BasicClient;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves `total` numbered records, honouring `$limit`/`$offset`, and
    /// records every URL it was asked for.
    struct PagedHttp {
        total: usize,
        urls: Mutex<Vec<Url>>,
    }

    impl PagedHttp {
        fn new(total: usize) -> Self {
            Self {
                total,
                urls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.urls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl HttpClient for PagedHttp {
        async fn execute(&self, req: Request) -> reqwest::Result<reqwest::Response> {
            let query = query_map(req.url());
            let limit: usize = query["$limit"].parse().unwrap();
            let offset: usize = query["$offset"].parse().unwrap();
            self.urls.lock().unwrap().push(req.url().clone());

            let end = (offset + limit).min(self.total);
            let records: Vec<_> = (offset.min(end)..end).map(|i| json!({ "row": i })).collect();
            let body = serde_json::to_string(&records).unwrap();
            Ok(reqwest::Response::from(http::Response::new(body)))
        }
    }

    async fn run_paged(
        total: usize,
        page_size: usize,
        max_rows: Option<usize>,
    ) -> (Table, usize) {
        let client = SocrataClient::new(PagedHttp::new(total), "health.data.ny.gov")
            .with_page_size(page_size)
            .with_max_rows(max_rows);
        let table = client.query("s8d9-z734", "").await.unwrap();
        let calls = client.http.calls();
        (table, calls)
    }

    fn assert_in_order(table: &Table) {
        for (i, value) in table.column("row").into_iter().flatten().enumerate() {
            assert_eq!(*value, Value::Int(i as i64));
        }
    }

    fn client() -> SocrataClient<BasicClient> {
        SocrataClient::new(BasicClient::new().unwrap(), "health.data.ny.gov")
    }

    fn query_map(url: &Url) -> HashMap<String, String> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_resource_url_passes_filter_unmodified() {
        let filter = "(ccs_diagnosis_code='100') AND (apr_drg_code='194')";
        let url = client().resource_url("y93g-4rqn", filter, 10, 20).unwrap();

        assert_eq!(url.path(), "/resource/y93g-4rqn.json");
        let query = query_map(&url);
        assert_eq!(query["$where"], filter);
        assert_eq!(query["$limit"], "10");
        assert_eq!(query["$offset"], "20");
        assert_eq!(query["$order"], ":id");
    }

    #[test]
    fn test_resource_url_omits_empty_filter() {
        let url = client().resource_url("s8d9-z734", "", 5, 0).unwrap();
        assert!(!query_map(&url).contains_key("$where"));
    }

    #[test]
    fn test_append_records_unions_keys() {
        let mut table = Table::default();
        append_records(
            &mut table,
            vec![
                json!({"age": "70 or Older", "total_costs": "100.5"}),
                json!({"age": "50 to 69", "sex": "F", "length_of_stay": 3}),
            ],
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.columns(),
            &["age", "total_costs", "length_of_stay", "sex"]
        );
        assert_eq!(table.get(0, "sex"), Some(&Value::Null));
        assert_eq!(table.get(1, "total_costs"), Some(&Value::Null));
        assert_eq!(table.get(1, "length_of_stay"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_append_records_rejects_non_objects() {
        let mut table = Table::default();
        let err = append_records(&mut table, vec![json!([1, 2])]).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Transport(TransportError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_query_pages_exact_multiple() {
        let (table, calls) = run_paged(9, 3, None).await;
        assert_eq!(table.len(), 9);
        // The fourth, empty page ends the loop.
        assert_eq!(calls, 4);
        assert_in_order(&table);
    }

    #[tokio::test]
    async fn test_query_stops_on_short_page() {
        let (table, calls) = run_paged(10, 3, None).await;
        assert_eq!(table.len(), 10);
        assert_eq!(calls, 4);
        assert_in_order(&table);
    }

    #[tokio::test]
    async fn test_query_caps_rows_mid_page() {
        let (table, calls) = run_paged(10, 3, Some(7)).await;
        assert_eq!(table.len(), 7);
        assert_eq!(calls, 3);
        assert_in_order(&table);
    }

    #[tokio::test]
    async fn test_query_last_page_requests_remaining_cap() {
        let client = SocrataClient::new(PagedHttp::new(10), "health.data.ny.gov")
            .with_page_size(3)
            .with_max_rows(Some(7));
        client.query("s8d9-z734", "").await.unwrap();

        let urls = client.http.urls.lock().unwrap();
        let last = query_map(urls.last().unwrap());
        assert_eq!(last["$limit"], "1");
        assert_eq!(last["$offset"], "6");
    }

    #[tokio::test]
    async fn test_query_empty_dataset() {
        let (table, calls) = run_paged(0, 3, None).await;
        assert!(table.is_empty());
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_query_zero_cap_sends_nothing() {
        let (table, calls) = run_paged(10, 3, Some(0)).await;
        assert!(table.is_empty());
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_query_reports_error_status() {
        struct Failing;

        #[async_trait]
        impl HttpClient for Failing {
            async fn execute(&self, _req: Request) -> reqwest::Result<reqwest::Response> {
                let response = http::Response::builder()
                    .status(503)
                    .body("busy".to_string())
                    .unwrap();
                Ok(reqwest::Response::from(response))
            }
        }

        let client = SocrataClient::new(Failing, "health.data.ny.gov");
        let err = client.query("s8d9-z734", "").await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Transport(TransportError::Status { status: 503, ref body }) if body == "busy"
        ));
    }
}
