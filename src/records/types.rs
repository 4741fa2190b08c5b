//! Record and envelope type definitions.
//!
//! Defines [`Endpoint`] (the four record categories), the per-category record
//! structs, [`Record`] (a record tagged with its category), and the wire shapes
//! the backend returns: [`PageEnvelope`], [`StatsSummary`], [`InitialData`] and
//! [`ExecuteResponse`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The fixed record categories exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Conversations,
    Facts,
    Todos,
    Lifelogs,
}

impl Endpoint {
    /// All endpoints, in dashboard display order.
    pub const ALL: [Endpoint; 4] = [
        Self::Conversations,
        Self::Facts,
        Self::Todos,
        Self::Lifelogs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conversations => "conversations",
            Self::Facts => "facts",
            Self::Todos => "todos",
            Self::Lifelogs => "lifelogs",
        }
    }

    /// API path, e.g. `/api/facts`.
    pub fn path(&self) -> String {
        format!("/api/{}", self.as_str())
    }

    /// ID of the container holding this endpoint's cards.
    pub fn cards_id(&self) -> String {
        format!("{}-cards", self.as_str())
    }

    /// ID of the section wrapping this endpoint's cards.
    pub fn section_id(&self) -> String {
        format!("{}-section", self.as_str())
    }

    /// ID of the button that (re)loads this endpoint from page 1.
    pub fn load_button_id(&self) -> String {
        format!("load-{}", self.as_str())
    }

    /// Human heading for the section.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Conversations => "Conversations",
            Self::Facts => "Facts",
            Self::Todos => "Todos",
            Self::Lifelogs => "Lifelogs",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conversations" => Ok(Self::Conversations),
            "facts" => Ok(Self::Facts),
            "todos" => Ok(Self::Todos),
            "lifelogs" => Ok(Self::Lifelogs),
            _ => Err(format!("unknown endpoint: {s}")),
        }
    }
}

/// Text of a JSON scalar. `null`, blank strings, arrays and objects have none.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if b { "Yes" } else { "No" }.to_string()),
        _ => None,
    }
}

/// Accept a string, number or bool as text. `null` and blank strings become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_text))
}

/// Tags as a scalar or a list of scalars. Non-scalar list entries are dropped;
/// any other shape means no tags.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Option<Tags>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(Tags::List(
            items.into_iter().filter_map(scalar_text).collect(),
        )),
        Some(other) => scalar_text(other).map(Tags::Text),
        None => None,
    })
}

/// Counters are whole numbers; `null`, negatives and non-numbers read as 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        _ => 0,
    })
}

/// `Yes`/`No` style flags. Anything other than a case-insensitive "yes",
/// "true" or "1" counts as no.
fn is_yes(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("yes" | "true" | "1")
    )
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(rename = "Title", default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(rename = "Summary", default, deserialize_with = "lenient_string")]
    pub summary: Option<String>,
    #[serde(rename = "Created At", default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    #[serde(rename = "Text", default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(rename = "Created At", default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
    #[serde(rename = "Confirmed", default, deserialize_with = "lenient_string")]
    pub confirmed: Option<String>,
}

impl Fact {
    pub fn is_confirmed(&self) -> bool {
        is_yes(self.confirmed.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "Task", default, deserialize_with = "lenient_string")]
    pub task: Option<String>,
    #[serde(rename = "Completed", default, deserialize_with = "lenient_string")]
    pub completed: Option<String>,
    #[serde(rename = "Created At", default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
}

impl Todo {
    pub fn is_completed(&self) -> bool {
        is_yes(self.completed.as_deref())
    }
}

/// Lifelog tags arrive either as a preformatted string or as a JSON list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tags {
    Text(String),
    List(Vec<String>),
}

impl Tags {
    /// Joined display text, or `None` when there is nothing to show.
    pub fn display(&self) -> Option<String> {
        let joined = match self {
            Self::Text(s) => s.trim().to_string(),
            Self::List(items) => items
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        };
        (!joined.is_empty()).then_some(joined)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lifelog {
    #[serde(rename = "Title", default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(rename = "Description", default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(rename = "Tags", default, deserialize_with = "lenient_tags")]
    pub tags: Option<Tags>,
    #[serde(rename = "Created At", default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
}

/// A record tagged with its category.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Conversation(Conversation),
    Fact(Fact),
    Todo(Todo),
    Lifelog(Lifelog),
}

impl Record {
    /// Decode one raw item as a record of the given category.
    pub fn decode(endpoint: Endpoint, item: Value) -> serde_json::Result<Self> {
        Ok(match endpoint {
            Endpoint::Conversations => Self::Conversation(serde_json::from_value(item)?),
            Endpoint::Facts => Self::Fact(serde_json::from_value(item)?),
            Endpoint::Todos => Self::Todo(serde_json::from_value(item)?),
            Endpoint::Lifelogs => Self::Lifelog(serde_json::from_value(item)?),
        })
    }

    /// Decode a list of raw items, skipping (and logging) items that are not objects.
    pub fn decode_all(endpoint: Endpoint, items: Vec<Value>) -> Vec<Self> {
        items
            .into_iter()
            .filter_map(|item| match Self::decode(endpoint, item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(endpoint = %endpoint, error = %e, "skipping malformed record");
                    None
                }
            })
            .collect()
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Conversation(_) => Endpoint::Conversations,
            Self::Fact(_) => Endpoint::Facts,
            Self::Todo(_) => Endpoint::Todos,
            Self::Lifelog(_) => Endpoint::Lifelogs,
        }
    }
}

/// One page of records from `GET /api/{endpoint}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageEnvelope {
    pub items: Vec<Value>,
    pub page: u32,
    pub total_pages: u32,
}

impl PageEnvelope {
    /// Parse a response body. The items live under the endpoint's own key;
    /// a bare JSON array is treated as a single unpaginated page.
    pub fn from_value(endpoint: Endpoint, value: Value) -> Result<Self, String> {
        match value {
            Value::Array(items) => Ok(Self {
                items,
                page: 1,
                total_pages: 1,
            }),
            Value::Object(mut map) => {
                let items = match map.remove(endpoint.as_str()) {
                    Some(Value::Array(items)) => items,
                    Some(Value::Null) | None => Vec::new(),
                    Some(other) => {
                        return Err(format!(
                            "expected a list under \"{endpoint}\", got {}",
                            json_kind(&other)
                        ))
                    }
                };
                let page = map.get("page").and_then(Value::as_u64).unwrap_or(1).max(1);
                let total_pages = map
                    .get("total_pages")
                    .and_then(Value::as_u64)
                    .unwrap_or(1)
                    .max(1);
                Ok(Self {
                    items,
                    page: clamp_u32(page),
                    total_pages: clamp_u32(total_pages),
                })
            }
            other => Err(format!("expected a JSON object, got {}", json_kind(&other))),
        }
    }

    pub fn records(&self, endpoint: Endpoint) -> Vec<Record> {
        Record::decode_all(endpoint, self.items.clone())
    }
}

fn clamp_u32(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Ingestion counters for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryStats {
    #[serde(deserialize_with = "lenient_count")]
    pub processed: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub added: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub skipped: u64,
}

/// Per-category ingestion counters reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSummary {
    pub conversations: Option<CategoryStats>,
    pub facts: Option<CategoryStats>,
    pub todos: Option<CategoryStats>,
    pub lifelogs: Option<CategoryStats>,
}

/// Server-rendered payload consumed once on page load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialData {
    pub conversations: Option<Vec<Value>>,
    pub facts: Option<Vec<Value>>,
    pub todos: Option<Vec<Value>>,
    pub lifelogs: Option<Vec<Value>>,
    pub db_stats: Option<StatsSummary>,
    pub error: Option<String>,
}

impl InitialData {
    /// Raw items provided for `endpoint`, if any.
    pub fn items(&self, endpoint: Endpoint) -> Option<&Vec<Value>> {
        match endpoint {
            Endpoint::Conversations => self.conversations.as_ref(),
            Endpoint::Facts => self.facts.as_ref(),
            Endpoint::Todos => self.todos.as_ref(),
            Endpoint::Lifelogs => self.lifelogs.as_ref(),
        }
    }
}

/// Request body for `POST /execute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub code: String,
}

/// Response body from `POST /execute`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecuteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
