pub mod fetch;
pub mod render;
pub mod run;

use anyhow::Result;
use std::sync::Arc;

use lifejournal::config::JournalConfig;
use lifejournal::dashboard::Dashboard;
use lifejournal::fetcher::HttpApiClient;

/// A dashboard talking to the configured backend.
fn dashboard(config: &JournalConfig) -> Result<Dashboard> {
    let client = HttpApiClient::new(&config.api)?;
    Ok(Dashboard::new(Arc::new(client), config))
}
