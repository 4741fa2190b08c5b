#![allow(dead_code)]

use async_trait::async_trait;
use lifejournal::config::JournalConfig;
use lifejournal::dashboard::Dashboard;
use lifejournal::error::FetchError;
use lifejournal::fetcher::{ApiClient, HttpReply};
use lifejournal::records::Endpoint;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// One request seen by [`MockClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

type Handler = dyn Fn(&Request) -> Result<HttpReply, FetchError> + Send + Sync;

/// Records every request and answers with a caller-supplied handler.
pub struct MockClient {
    handler: Box<Handler>,
    requests: Mutex<Vec<Request>>,
}

impl MockClient {
    pub fn new(
        handler: impl Fn(&Request) -> Result<HttpReply, FetchError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<Request> {
        self.requests.lock().unwrap().last().cloned()
    }

    fn answer(&self, request: Request) -> Result<HttpReply, FetchError> {
        let reply = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);
        reply
    }
}

#[async_trait]
impl ApiClient for MockClient {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<HttpReply, FetchError> {
        self.answer(Request {
            method: "GET",
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            body: None,
        })
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<HttpReply, FetchError> {
        self.answer(Request {
            method: "POST",
            path: path.to_string(),
            query: Vec::new(),
            body: Some(body.clone()),
        })
    }
}

pub fn reply(status: u16, body: Value) -> Result<HttpReply, FetchError> {
    Ok(HttpReply {
        status,
        body: body.to_string(),
    })
}

/// A paginated envelope with `count` generic items for `endpoint`.
pub fn envelope(endpoint: Endpoint, count: usize, page: u32, total_pages: u32) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| match endpoint {
            Endpoint::Conversations => json!({"Title": format!("Conversation {i}")}),
            Endpoint::Facts => json!({"Text": format!("Fact {i}"), "Confirmed": "Yes"}),
            Endpoint::Todos => json!({"Task": format!("Task {i}"), "Completed": "No"}),
            Endpoint::Lifelogs => json!({"Title": format!("Log {i}"), "Tags": ["a", "b"]}),
        })
        .collect();
    let mut body = serde_json::Map::new();
    body.insert(endpoint.as_str().to_string(), Value::Array(items));
    body.insert("page".into(), json!(page));
    body.insert("total_pages".into(), json!(total_pages));
    Value::Object(body)
}

/// Serves `total_pages` pages of two records each for every endpoint,
/// echoing back the requested page.
pub fn paged_backend(total_pages: u32) -> Arc<MockClient> {
    MockClient::new(move |req| {
        let endpoint: Endpoint = req
            .path
            .trim_start_matches("/api/")
            .parse()
            .map_err(FetchError::Decode)?;
        let page = req
            .query_value("page")
            .and_then(|p| p.parse().ok())
            .unwrap_or(1);
        reply(200, envelope(endpoint, 2, page, total_pages))
    })
}

pub fn dashboard(client: Arc<MockClient>) -> Dashboard {
    Dashboard::new(client, &JournalConfig::default())
}
