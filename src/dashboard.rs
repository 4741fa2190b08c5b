//! Event dispatch for the dashboard page.
//!
//! A [`Dashboard`] owns the [`Document`], the code editor, and the shared page
//! counters. Each [`UiEvent`] is handled to completion before the next one;
//! every failure is rendered into the document, so none of the handlers
//! return errors.

use serde_json::Value;
use std::sync::Arc;

use crate::config::JournalConfig;
use crate::document::{
    Document, API_RESPONSE, CLEAR_BUTTON, ERROR, NEXT_PAGE, OUTPUT, PAGINATION_CONTROLS,
    PREV_PAGE, REFRESH_BUTTON, RUN_BUTTON,
};
use crate::fetcher::{ApiClient, Direction, Fetcher, PageCounters, PaginationControls};
use crate::records::{Endpoint, InitialData, Record};
use crate::render::Renderer;
use crate::runner::{CodeRunner, Editor, KeyChord, RunOutcome, TextEditor};

/// Something the user did on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A click on the element with this ID.
    Click(String),
    /// A key press inside the editor.
    Key(KeyChord),
}

impl UiEvent {
    pub fn click(id: impl Into<String>) -> Self {
        Self::Click(id.into())
    }
}

pub struct Dashboard {
    doc: Document,
    renderer: Renderer,
    fetcher: Fetcher,
    runner: CodeRunner,
    editor: Box<dyn Editor>,
    counters: PageCounters,
    controls: Option<PaginationControls>,
}

impl Dashboard {
    pub fn new(client: Arc<dyn ApiClient>, config: &JournalConfig) -> Self {
        Self::with_editor(client, config, Box::new(TextEditor::default()))
    }

    pub fn with_editor(
        client: Arc<dyn ApiClient>,
        config: &JournalConfig,
        mut editor: Box<dyn Editor>,
    ) -> Self {
        editor.set_option("mode", Value::String(config.editor.language.clone()));
        Self {
            doc: Document::dashboard(),
            renderer: Renderer::new(&config.display),
            fetcher: Fetcher::new(Arc::clone(&client), config.api.per_page),
            runner: CodeRunner::new(client),
            editor,
            counters: PageCounters::default(),
            controls: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn editor(&self) -> &dyn Editor {
        &*self.editor
    }

    pub fn editor_mut(&mut self) -> &mut dyn Editor {
        &mut *self.editor
    }

    pub fn current_page(&self, endpoint: Endpoint) -> u32 {
        self.counters.get(endpoint)
    }

    pub fn pagination(&self) -> Option<&PaginationControls> {
        self.controls.as_ref()
    }

    /// Full page markup, with the editor's current text.
    pub fn to_html(&self) -> String {
        self.doc.to_html(&self.editor.value())
    }

    /// Render the server-provided payload. A payload carrying `error` replaces
    /// the data area with that error and nothing else is rendered.
    pub fn load_initial(&mut self, data: &InitialData) {
        if let Some(error) = data.error.as_deref() {
            tracing::warn!(error = %error, "initial data carries an error");
            self.renderer.display_error(&mut self.doc, error);
            return;
        }

        for endpoint in Endpoint::ALL {
            if let Some(items) = data.items(endpoint) {
                let records = Record::decode_all(endpoint, items.clone());
                self.renderer
                    .display_cards(&mut self.doc, Some(records.as_slice()), endpoint);
            }
        }

        if let Some(stats) = &data.db_stats {
            self.renderer.display_stats(&mut self.doc, stats);
        }
    }

    /// Fetch one page, render its cards, and rebuild the pagination controls.
    /// The page counter only moves when the page was actually shown.
    pub async fn fetch_page(&mut self, endpoint: Endpoint, page: u32) {
        match self.fetcher.fetch_page(endpoint, page).await {
            Ok(envelope) => {
                let records = envelope.records(endpoint);
                self.renderer
                    .display_cards(&mut self.doc, Some(records.as_slice()), endpoint);

                self.counters.set(endpoint, envelope.page);
                let controls =
                    PaginationControls::new(endpoint, envelope.page, envelope.total_pages);
                self.doc.set_html(PAGINATION_CONTROLS, controls.render());
                self.controls = Some(controls);
            }
            Err(e) => {
                tracing::warn!(endpoint = %endpoint, page, error = %e, "fetch failed");
                self.renderer
                    .display_fetch_error(&mut self.doc, endpoint, &e.to_string());
                self.clear_pagination();
            }
        }
    }

    /// Fetch every record of an endpoint in one request. Pagination controls
    /// are removed since there is nothing to page through.
    pub async fn fetch_all(&mut self, endpoint: Endpoint) {
        match self.fetcher.fetch_all(endpoint).await {
            Ok(envelope) => {
                let records = envelope.records(endpoint);
                self.renderer
                    .display_cards(&mut self.doc, Some(records.as_slice()), endpoint);
            }
            Err(e) => {
                tracing::warn!(endpoint = %endpoint, error = %e, "fetch failed");
                self.renderer
                    .display_fetch_error(&mut self.doc, endpoint, &e.to_string());
            }
        }
        self.clear_pagination();
    }

    /// Step the counter of the endpoint the controls belong to and re-fetch.
    /// A click on a disabled control does nothing.
    pub async fn change_page(&mut self, direction: Direction) {
        let Some(controls) = self.controls else {
            tracing::debug!("page change without pagination controls");
            return;
        };
        let Some(target) = controls.target(direction) else {
            tracing::debug!(endpoint = %controls.endpoint, ?direction, "control disabled");
            return;
        };
        self.fetch_page(controls.endpoint, target).await;
    }

    /// Forget every page counter and load page 1 of every endpoint.
    pub async fn refresh(&mut self) {
        tracing::info!("refreshing dashboard");
        self.counters.reset();
        self.doc.restore_sections();
        for endpoint in Endpoint::ALL {
            self.fetch_page(endpoint, 1).await;
        }
    }

    /// Submit the editor contents and show the result.
    pub async fn run_code(&mut self) {
        let code = self.editor.value();
        let outcome = self.runner.run(&code).await;
        self.show_outcome(&outcome);
    }

    pub fn clear_output(&mut self) {
        for id in [OUTPUT, ERROR, API_RESPONSE] {
            self.doc.clear(id);
        }
    }

    pub async fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Key(chord) if chord.is_run_shortcut() => self.run_code().await,
            UiEvent::Key(_) => {}
            UiEvent::Click(id) => match id.as_str() {
                RUN_BUTTON => self.run_code().await,
                CLEAR_BUTTON => self.clear_output(),
                REFRESH_BUTTON => self.refresh().await,
                PREV_PAGE => self.change_page(Direction::Previous).await,
                NEXT_PAGE => self.change_page(Direction::Next).await,
                other => match load_button_endpoint(other) {
                    Some(endpoint) => self.fetch_page(endpoint, 1).await,
                    None => tracing::debug!(id = %other, "click on unbound element"),
                },
            },
        }
    }

    fn show_outcome(&mut self, outcome: &RunOutcome) {
        self.doc.set_html(OUTPUT, crate::render::escape_html(&outcome.output));
        self.doc.set_html(ERROR, crate::render::escape_html(&outcome.error));
        self.doc
            .set_html(API_RESPONSE, crate::render::escape_html(&outcome.response));
    }

    fn clear_pagination(&mut self) {
        self.doc.clear(PAGINATION_CONTROLS);
        self.controls = None;
    }
}

fn load_button_endpoint(id: &str) -> Option<Endpoint> {
    id.strip_prefix("load-")?.parse().ok()
}
