//! Code submission to the execution endpoint.
//!
//! [`CodeRunner`] POSTs editor text as `{"code": ...}` to `/execute` and turns
//! the reply into a [`RunOutcome`]: what belongs in the `output`, `error` and
//! `api-response` regions of the page.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::FetchError;
use crate::fetcher::{ApiClient, HttpReply};
use crate::records::{ExecuteRequest, ExecuteResponse};

pub const EXECUTE_PATH: &str = "/execute";

/// The code editor widget: a text source with free-form options.
pub trait Editor: Send {
    fn value(&self) -> String;

    fn set_option(&mut self, key: &str, value: Value);
}

/// Plain in-memory [`Editor`].
#[derive(Debug, Clone, Default)]
pub struct TextEditor {
    text: String,
    options: HashMap<String, Value>,
}

impl TextEditor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: HashMap::new(),
        }
    }

    pub fn set_value(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}

impl Editor for TextEditor {
    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_option(&mut self, key: &str, value: Value) {
        self.options.insert(key.to_string(), value);
    }
}

/// A keyboard chord as delivered by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    pub ctrl: bool,
    pub meta: bool,
    pub key: String,
}

impl KeyChord {
    /// Ctrl+Enter or Cmd+Enter.
    pub fn is_run_shortcut(&self) -> bool {
        (self.ctrl || self.meta) && self.key.eq_ignore_ascii_case("enter")
    }
}

/// Contents for the three result regions after a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub output: String,
    pub error: String,
    /// Pretty-printed server response, empty when there was none.
    pub response: String,
}

impl RunOutcome {
    fn failed(message: String) -> Self {
        Self {
            error: format!("Error: {message}"),
            ..Default::default()
        }
    }
}

#[derive(Clone)]
pub struct CodeRunner {
    client: Arc<dyn ApiClient>,
}

impl CodeRunner {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    /// Submit `code` and describe the result. Never fails: transport and
    /// decode problems become an error message in the outcome.
    pub async fn run(&self, code: &str) -> RunOutcome {
        tracing::info!(code_len = code.len(), "submitting code");
        let body = match serde_json::to_value(ExecuteRequest {
            code: code.to_string(),
        }) {
            Ok(body) => body,
            Err(e) => return RunOutcome::failed(e.to_string()),
        };
        match self.client.post_json(EXECUTE_PATH, &body).await {
            Ok(reply) => interpret_reply(reply),
            Err(e) => {
                tracing::warn!(error = %e, "execute request failed");
                RunOutcome::failed(e.to_string())
            }
        }
    }
}

/// The body is read even on non-2xx statuses: the server reports execution
/// failures as `{success: false, error}` alongside an error status.
fn interpret_reply(reply: HttpReply) -> RunOutcome {
    let value: Value = match serde_json::from_str(&reply.body) {
        Ok(v) => v,
        Err(e) => {
            let err = if reply.is_success() {
                FetchError::Decode(e.to_string())
            } else {
                FetchError::status(reply.status, &reply.body)
            };
            tracing::warn!(status = reply.status, error = %err, "unreadable execute response");
            return RunOutcome::failed(err.to_string());
        }
    };
    let response = serde_json::to_string_pretty(&value).unwrap_or_else(|_| reply.body.clone());

    let parsed: ExecuteResponse = match serde_json::from_value(value) {
        Ok(parsed) => parsed,
        Err(e) => {
            let mut outcome = RunOutcome::failed(FetchError::Decode(e.to_string()).to_string());
            outcome.response = response;
            return outcome;
        }
    };

    if parsed.success && reply.is_success() {
        tracing::info!(status = reply.status, "code ran successfully");
        RunOutcome {
            output: parsed.output.unwrap_or_default(),
            error: String::new(),
            response,
        }
    } else {
        let error = parsed
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| "Unknown error".to_string());
        tracing::info!(status = reply.status, "code run reported an error");
        RunOutcome {
            output: String::new(),
            error,
            response,
        }
    }
}
