use crate::domain::model::{BusinessRecord, NewBusiness, ScopeRow};
use crate::domain::ports::{BusinessFilter, BusinessSource};
use crate::utils::error::{DirectoryError, Result};
use reqwest::header::CONTENT_RANGE;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

const BUSINESSES_PATH: &str = "/rest/v1/businesses";

/// Hosted Supabase's default `max-rows`.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// PostgREST client for the hosted store.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
    page_size: usize,
}

impl SupabaseClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    pub fn with_client(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    fn businesses_url(&self) -> String {
        format!("{}{}", self.base_url, BUSINESSES_PATH)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Reads every matching row, one `limit`/`offset` page at a time.
    ///
    /// The server may cap a page below `page_size` (`max-rows`), so the
    /// offset advances by what actually came back, and the exact count from
    /// `Content-Range` decides when the table is exhausted.
    async fn get_rows<T: DeserializeOwned>(&self, query: &[(&str, String)]) -> Result<Vec<T>> {
        let url = self.businesses_url();
        let mut rows: Vec<T> = Vec::new();

        loop {
            let offset = rows.len();
            tracing::debug!("GET {} {:?} offset={}", url, query, offset);

            let response = self
                .authorized(self.client.get(&url))
                .header("Prefer", "count=exact")
                .query(query)
                .query(&[("limit", self.page_size), ("offset", offset)])
                .send()
                .await?;
            let response = ensure_success(response).await?;
            let total = response
                .headers()
                .get(CONTENT_RANGE)
                .and_then(|value| value.to_str().ok())
                .and_then(content_range_total);

            let page: Vec<T> = response.json().await?;
            let page_len = page.len();
            rows.extend(page);

            let done = match total {
                Some(total) => rows.len() >= total || page_len == 0,
                None => page_len < self.page_size,
            };
            if done {
                break;
            }
        }

        tracing::debug!("Store returned {} rows", rows.len());
        Ok(rows)
    }
}

/// Total from a PostgREST `Content-Range` value such as `0-999/1500`.
/// `*` (count not requested) yields `None`.
fn content_range_total(value: &str) -> Option<usize> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(DirectoryError::UpstreamError {
        status: status.as_u16(),
        message,
    })
}

impl BusinessSource for SupabaseClient {
    async fn fetch_scope_rows(&self) -> Result<Vec<ScopeRow>> {
        self.get_rows(&[
            ("select", "city,service,updated_at".to_string()),
            ("order", "id.asc".to_string()),
        ])
        .await
    }

    async fn fetch_businesses(&self, filter: &BusinessFilter) -> Result<Vec<BusinessRecord>> {
        let mut query = vec![
            ("select", "*".to_string()),
            ("city", format!("eq.{}", filter.city)),
        ];
        if let Some(service) = &filter.service {
            query.push(("service", format!("eq.{}", service)));
        }
        query.push(("order", "pin_rank.asc.nullslast,name.asc".to_string()));

        self.get_rows(&query).await
    }

    async fn insert_business(&self, business: &NewBusiness) -> Result<()> {
        let response = self
            .authorized(self.client.post(self.businesses_url()))
            .header("Prefer", "return=representation")
            .json(business)
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::CREATED {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(DirectoryError::UpstreamError { status, message });
        }
        Ok(())
    }
}
