//! Typed GET requests against the record endpoints.
//!
//! [`Fetcher`] turns an [`Endpoint`] and optional page into a request through
//! an [`ApiClient`], checks the status, and parses the [`PageEnvelope`].
//! Rendering the result is the dashboard's job.

pub mod client;
pub mod pagination;

pub use client::{ApiClient, HttpApiClient, HttpReply};
pub use pagination::{Direction, PageCounters, PaginationControls};

use serde_json::Value;
use std::sync::Arc;

use crate::error::FetchError;
use crate::records::{Endpoint, PageEnvelope};

#[derive(Clone)]
pub struct Fetcher {
    client: Arc<dyn ApiClient>,
    per_page: u32,
}

impl Fetcher {
    pub fn new(client: Arc<dyn ApiClient>, per_page: u32) -> Self {
        Self {
            client,
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// `GET /api/{endpoint}?page=N&per_page=M`
    pub async fn fetch_page(&self, endpoint: Endpoint, page: u32) -> Result<PageEnvelope, FetchError> {
        let page = page.max(1);
        let query = [
            ("page", page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        tracing::info!(endpoint = %endpoint, page, per_page = self.per_page, "fetching page");
        let reply = self.client.get(&endpoint.path(), &query).await?;
        parse_envelope(endpoint, reply)
    }

    /// `GET /api/{endpoint}` with no pagination parameters.
    pub async fn fetch_all(&self, endpoint: Endpoint) -> Result<PageEnvelope, FetchError> {
        tracing::info!(endpoint = %endpoint, "fetching all records");
        let reply = self.client.get(&endpoint.path(), &[]).await?;
        parse_envelope(endpoint, reply)
    }
}

fn parse_envelope(endpoint: Endpoint, reply: HttpReply) -> Result<PageEnvelope, FetchError> {
    if !reply.is_success() {
        return Err(FetchError::status(reply.status, &reply.body));
    }
    let value: Value =
        serde_json::from_str(&reply.body).map_err(|e| FetchError::Decode(e.to_string()))?;
    let envelope = PageEnvelope::from_value(endpoint, value).map_err(FetchError::Decode)?;
    tracing::debug!(
        endpoint = %endpoint,
        items = envelope.items.len(),
        page = envelope.page,
        total_pages = envelope.total_pages,
        "envelope parsed"
    );
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, body: &str) -> HttpReply {
        HttpReply {
            status,
            body: body.into(),
        }
    }

    #[test]
    fn non_success_status_is_an_error() {
        let err = parse_envelope(Endpoint::Facts, reply(502, "bad gateway")).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 502, .. }));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = parse_envelope(Endpoint::Facts, reply(200, "<html>")).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn parses_envelope() {
        let env = parse_envelope(
            Endpoint::Todos,
            reply(200, r#"{"todos": [{"Task": "a"}, {"Task": "b"}], "page": 1, "total_pages": 2}"#),
        )
        .unwrap();
        assert_eq!(env.items.len(), 2);
        assert_eq!(env.total_pages, 2);
    }
}
