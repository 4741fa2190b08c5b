//! CLI `run` command: submit a source file to the execution endpoint.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use lifejournal::config::JournalConfig;
use lifejournal::fetcher::HttpApiClient;
use lifejournal::runner::CodeRunner;

/// Run the file's contents remotely. Output goes to stdout, errors to stderr;
/// a reported error makes the command fail.
pub async fn run(config: &JournalConfig, file: &Path, show_response: bool) -> Result<()> {
    let code = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let client = HttpApiClient::new(&config.api)?;
    let runner = CodeRunner::new(Arc::new(client));
    let outcome = runner.run(&code).await;

    if !outcome.output.is_empty() {
        print!("{}", outcome.output);
    }
    if show_response && !outcome.response.is_empty() {
        eprintln!("{}", outcome.response);
    }
    anyhow::ensure!(outcome.error.is_empty(), "{}", outcome.error);

    Ok(())
}
