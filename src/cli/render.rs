//! CLI `render` command: render a saved initial-data payload as a full page.

use anyhow::{Context, Result};
use std::path::Path;

use lifejournal::config::JournalConfig;
use lifejournal::records::InitialData;

pub fn render(config: &JournalConfig, payload: &Path) -> Result<()> {
    let contents = std::fs::read_to_string(payload)
        .with_context(|| format!("failed to read {}", payload.display()))?;
    let data: InitialData =
        serde_json::from_str(&contents).context("failed to parse initial data JSON")?;

    let mut dashboard = super::dashboard(config)?;
    dashboard.load_initial(&data);
    print!("{}", dashboard.to_html());

    Ok(())
}
