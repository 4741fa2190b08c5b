pub mod types;

pub use types::{
    CategoryStats, Conversation, Endpoint, ExecuteRequest, ExecuteResponse, Fact, InitialData,
    Lifelog, PageEnvelope, Record, StatsSummary, Tags, Todo,
};
