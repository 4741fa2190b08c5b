use crate::records::{CategoryStats, StatsSummary};

fn stats_card(title: &str, stats: &CategoryStats) -> String {
    format!(
        "<div class=\"stats-card\"><h4>{title}</h4>\
         <p>Total processed: {}</p>\
         <p>Added to database: {}</p>\
         <p>Already existed: {}</p></div>",
        stats.processed, stats.added, stats.skipped
    )
}

/// Ingestion stats, grouped by source: Bee (conversations, facts, todos) and
/// Limitless (lifelogs). Absent Bee categories are omitted; absent lifelogs
/// get a "No data available" card.
pub(crate) fn render_stats(stats: &StatsSummary) -> String {
    let mut html = String::from("<div class=\"stats-cards\">");

    html.push_str("<div class=\"stats-row\"><h4>Bee API</h4>");
    for (title, category) in [
        ("Conversations", &stats.conversations),
        ("Facts", &stats.facts),
        ("Todos", &stats.todos),
    ] {
        if let Some(category) = category {
            html.push_str(&stats_card(title, category));
        }
    }
    html.push_str("</div>");

    html.push_str("<div class=\"stats-row\"><h4>Limitless API</h4>");
    match &stats.lifelogs {
        Some(lifelogs) => html.push_str(&stats_card("Lifelogs", lifelogs)),
        None => html.push_str(
            "<div class=\"stats-card\"><h4>Lifelogs</h4><p>No data available</p></div>",
        ),
    }
    html.push_str("</div></div>");
    html
}
