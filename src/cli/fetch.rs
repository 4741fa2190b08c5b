//! CLI `fetch` command: load one endpoint and print its cards.

use anyhow::Result;

use lifejournal::config::JournalConfig;
use lifejournal::document::PAGINATION_CONTROLS;
use lifejournal::records::Endpoint;

/// Print the cards fragment for `endpoint`, followed by the pagination
/// controls when a single page was requested.
pub async fn fetch(config: &JournalConfig, endpoint: Endpoint, page: u32, all: bool) -> Result<()> {
    let mut dashboard = super::dashboard(config)?;
    if all {
        dashboard.fetch_all(endpoint).await;
    } else {
        dashboard.fetch_page(endpoint, page).await;
    }

    let doc = dashboard.document();
    println!("{}", doc.html(&endpoint.cards_id()));

    if let Some(controls) = dashboard.pagination() {
        println!("{}", doc.html(PAGINATION_CONTROLS));
        eprintln!(
            "{endpoint}: page {} of {} ({} per page)",
            controls.page, controls.total_pages, config.api.per_page
        );
    }

    Ok(())
}
