//! Grid controller: search, filter, pagination and the rendered card set.
//!
//! The controller owns the [`QueryState`] and the cards currently shown. Each
//! query cycle computes the cache key, short-circuits on a fresh response
//! cache entry, and otherwise fetches through the relay transport, writes both
//! cache tiers and renders the result.
//!
//! # Query cycle
//! 1. **Cache**: `filter_search_page` hit renders immediately
//! 2. **Begin**: a fresh load clears the grid to a loader; load-more keeps it
//! 3. **Fetch**: search text wins over the filter when picking the endpoint
//! 4. **Complete**: results replace or append; `>= 20` items shows pagination
//!
//! Every request carries a generation ticket. A completion whose ticket has
//! been superseded by a newer query still feeds the caches but is not
//! rendered, so a slow earlier search cannot overwrite a later one.

use crate::core::api;
use crate::core::catalog::Catalog;
use crate::core::debounce::Debouncer;
use crate::core::error::TransportError;
use crate::core::filter::ScriptFilter;
use crate::core::state::{GridSnapshot, QueryState, ScriptSummary};
use serde_json::Value;
use std::time::{Duration, Instant};

pub const LOADING_MESSAGE: &str = "Loading scripts...";
pub const NO_RESULTS_MESSAGE: &str = "No scripts found.";
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load scripts. (CORS or API Error)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Fresh search, filter change or first load
    Replace,
    /// "Load more": add the next page after the existing cards
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStatus {
    Idle,
    Loading,
    Loaded,
    NoResults,
    Failed,
}

impl GridStatus {
    /// Inline message shown in place of cards, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            GridStatus::Loading => Some(LOADING_MESSAGE),
            GridStatus::NoResults => Some(NO_RESULTS_MESSAGE),
            GridStatus::Failed => Some(LOAD_ERROR_MESSAGE),
            GridStatus::Idle | GridStatus::Loaded => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
    pub query: QueryState,
    pub mode: LoadMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    Cached { count: usize },
    Fetched { count: usize },
    Failed,
    Superseded,
    /// Load more after a short page; nothing was requested
    Exhausted,
}

pub struct GridController {
    query: QueryState,
    cards: Vec<ScriptSummary>,
    status: GridStatus,
    pagination_visible: bool,
    loading_more: bool,
    generation: u64,
    search_input: Debouncer<String>,
}

impl GridController {
    pub fn new(debounce: Duration) -> Self {
        Self {
            query: QueryState::new("", ScriptFilter::All, 1),
            cards: Vec::new(),
            status: GridStatus::Idle,
            pagination_visible: false,
            loading_more: false,
            generation: 0,
            search_input: Debouncer::new(debounce),
        }
    }

    pub fn from_snapshot(snapshot: GridSnapshot, debounce: Duration) -> Self {
        let status = if snapshot.cards.is_empty() {
            GridStatus::Idle
        } else {
            GridStatus::Loaded
        };
        Self {
            query: snapshot.query,
            cards: snapshot.cards,
            status,
            pagination_visible: snapshot.pagination_visible,
            ..Self::new(debounce)
        }
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::new(self.query.clone(), &self.cards, self.pagination_visible)
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn cards(&self) -> &[ScriptSummary] {
        &self.cards
    }

    pub fn status(&self) -> GridStatus {
        self.status
    }

    pub fn pagination_visible(&self) -> bool {
        self.pagination_visible
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    /// Forget everything and return to the initial state.
    pub fn reset(&mut self) {
        *self = Self::new(self.search_input.delay());
    }

    /// Run the current query from page 1.
    pub fn refresh(&mut self, catalog: &mut Catalog) -> QueryOutcome {
        let query = QueryState::new(self.query.search_text.clone(), self.query.filter, 1);
        self.load(catalog, query, LoadMode::Replace)
    }

    /// New search text under the current filter, from page 1.
    pub fn search(&mut self, catalog: &mut Catalog, text: &str) -> QueryOutcome {
        self.search_input.cancel();
        let query = QueryState::new(text, self.query.filter, 1);
        self.load(catalog, query, LoadMode::Replace)
    }

    /// Switch filter. Clears the search text and goes back to page 1.
    pub fn select_filter(&mut self, catalog: &mut Catalog, filter: ScriptFilter) -> QueryOutcome {
        self.search_input.cancel();
        let query = QueryState::new("", filter, 1);
        self.load(catalog, query, LoadMode::Replace)
    }

    /// Next page, appended. Only offered after a full page.
    pub fn load_more(&mut self, catalog: &mut Catalog) -> QueryOutcome {
        if !self.pagination_visible {
            log::debug!("No further pages after {}", self.query.cache_key());
            return QueryOutcome::Exhausted;
        }
        let next = self.query.next_page();
        self.load(catalog, next, LoadMode::Append)
    }

    /// Record a keystroke's worth of search text; nothing is fetched until
    /// [`GridController::poll_search`] sees the input has gone quiet.
    pub fn input_search(&mut self, text: impl Into<String>, now: Instant) {
        self.search_input.push(text.into(), now);
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search_input.deadline()
    }

    pub fn poll_search(&mut self, catalog: &mut Catalog, now: Instant) -> Option<QueryOutcome> {
        let text = self.search_input.take_due(now)?;
        Some(self.search(catalog, &text))
    }

    /// One full query cycle: cache, then relays.
    pub fn load(&mut self, catalog: &mut Catalog, query: QueryState, mode: LoadMode) -> QueryOutcome {
        let key = query.cache_key();

        if let Some(cached) = catalog.responses.get(&key) {
            self.generation += 1;
            let count = cached.len();
            self.apply(catalog.page_size_threshold, query, mode, cached, count);
            return QueryOutcome::Cached { count };
        }

        let ticket = self.begin(query, mode);
        let url = catalog.api.listing_url(&ticket.query);
        let outcome = catalog.transport.fetch_json(&url);
        self.complete(catalog, &ticket, outcome)
    }

    pub fn begin(&mut self, query: QueryState, mode: LoadMode) -> QueryTicket {
        self.generation += 1;
        log::debug!("Query {} started: {}", self.generation, query.cache_key());

        match mode {
            LoadMode::Replace => {
                self.query = query.clone();
                self.cards.clear();
                self.status = GridStatus::Loading;
                self.pagination_visible = false;
            }
            LoadMode::Append => self.loading_more = true,
        }

        QueryTicket {
            generation: self.generation,
            query,
            mode,
        }
    }

    pub fn complete(
        &mut self,
        catalog: &mut Catalog,
        ticket: &QueryTicket,
        outcome: Result<Value, TransportError>,
    ) -> QueryOutcome {
        let current = ticket.generation == self.generation;

        match outcome {
            Ok(payload) => {
                let api::Listing { scripts, returned } = api::extract_listing(&payload);
                catalog.bodies.absorb(&scripts);
                if !scripts.is_empty() {
                    catalog.responses.set(&ticket.query.cache_key(), &scripts);
                }

                if !current {
                    log::debug!("Discarding superseded results for {}", ticket.query.cache_key());
                    return QueryOutcome::Superseded;
                }

                let count = scripts.len();
                self.apply(
                    catalog.page_size_threshold,
                    ticket.query.clone(),
                    ticket.mode,
                    scripts,
                    returned,
                );
                QueryOutcome::Fetched { count }
            }
            Err(e) => {
                if !current {
                    return QueryOutcome::Superseded;
                }

                log::error!("Listing {} failed: {e}", ticket.query.cache_key());
                self.loading_more = false;
                if ticket.mode == LoadMode::Replace {
                    self.cards.clear();
                    self.status = GridStatus::Failed;
                }
                QueryOutcome::Failed
            }
        }
    }

    fn apply(
        &mut self,
        threshold: usize,
        query: QueryState,
        mode: LoadMode,
        scripts: Vec<ScriptSummary>,
        returned: usize,
    ) {
        self.loading_more = false;

        if mode == LoadMode::Replace {
            self.query = query.clone();
        }

        if scripts.is_empty() {
            self.pagination_visible = false;
            if mode == LoadMode::Replace {
                self.cards.clear();
                self.status = GridStatus::NoResults;
            }
            return;
        }

        // Page size is not reported by the API; a full page suggests more.
        // Skipped items still count towards a full page.
        self.pagination_visible = returned >= threshold;
        self.query.page = query.page;
        match mode {
            LoadMode::Replace => self.cards = scripts,
            LoadMode::Append => self.cards.extend(scripts),
        }
        self.status = GridStatus::Loaded;
    }
}
