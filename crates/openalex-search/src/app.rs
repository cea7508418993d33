//! Search orchestrator.
//!
//! Owns the state the result list renders: the current page of works, total
//! count, loading flag and error message. Every search takes a new
//! [`Generation`]; a response is applied only if its generation is still the
//! latest, so a slow earlier search never overwrites a faster later one.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::client::CatalogApi;
use crate::config::api;
use crate::generation::{Generation, GenerationCounter};
use crate::models::{SearchFilters, Work};
use crate::query::SearchParams;
use crate::view::Pagination;

/// Renderable search state.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Works on the current page.
    pub works: Vec<Work>,

    /// Total matching works.
    pub total_count: u64,

    /// Whether the latest search is still in flight.
    pub loading: bool,

    /// User-visible error message of the latest search.
    pub error: Option<String>,

    /// Current page (1-based).
    pub current_page: u32,

    /// Page size.
    pub per_page: u32,

    /// Filters of the latest submitted search.
    pub last_filters: Option<SearchFilters>,
}

impl SearchState {
    /// Pagination of the current page.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.total_count, self.current_page, self.per_page)
    }
}

/// Outcome of one [`App::search`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results were applied to the state.
    Applied,
    /// The search failed and the error was applied to the state.
    Failed,
    /// A newer search was issued meanwhile; nothing was applied.
    Superseded,
}

/// Search orchestrator.
pub struct App<A> {
    api: Arc<A>,
    state: Mutex<SearchState>,
    generations: GenerationCounter,
}

impl<A> App<A>
where
    A: CatalogApi,
{
    /// Create an orchestrator with the default page size.
    #[must_use]
    pub fn new(api: Arc<A>) -> Self {
        Self::with_per_page(api, api::DEFAULT_PER_PAGE)
    }

    /// Create an orchestrator with a custom page size, clamped to the API's range.
    #[must_use]
    pub fn with_per_page(api: Arc<A>, per_page: u32) -> Self {
        let state = SearchState {
            current_page: 1,
            per_page: per_page.clamp(1, api::MAX_PER_PAGE),
            ..Default::default()
        };
        Self {
            api,
            state: Mutex::new(state),
            generations: GenerationCounter::new(),
        }
    }

    /// The catalog client.
    #[must_use]
    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Run a search for `filters` at `page`.
    ///
    /// Failures are converted into state; this never returns an error.
    pub async fn search(&self, filters: SearchFilters, page: u32) -> SearchOutcome {
        let (generation, params) = {
            let mut state = self.state.lock().await;
            // Issued under the lock so generation order matches state-write order.
            let generation = self.generations.next();
            state.loading = true;
            state.error = None;
            let params = SearchParams::from_filters(&filters, page, state.per_page);
            state.last_filters = Some(filters);
            (generation, params)
        };

        tracing::info!(
            generation = generation.value(),
            page = params.effective_page(),
            query = params.search_term().unwrap_or_default(),
            "Starting search"
        );

        let result = self.api.search(&params).await;

        let mut state = self.state.lock().await;
        if !self.generations.is_current(generation) {
            tracing::debug!(
                generation = generation.value(),
                "Discarding superseded search response"
            );
            return SearchOutcome::Superseded;
        }

        state.loading = false;
        match result {
            Ok(response) => {
                state.total_count = response.meta.count;
                state.works = response.results;
                state.current_page = params.effective_page();
                state.per_page = params.effective_per_page();
                SearchOutcome::Applied
            }
            Err(e) => {
                tracing::error!(error = %e, "Search failed");
                state.error = Some(format!("Error: {}. Please try again.", e.to_user_message()));
                state.works.clear();
                state.total_count = 0;
                SearchOutcome::Failed
            }
        }
    }

    /// Re-run the latest search at another page.
    ///
    /// Returns `None` when no search has been submitted yet.
    pub async fn change_page(&self, page: u32) -> Option<SearchOutcome> {
        let filters = self.state.lock().await.last_filters.clone()?;
        Some(self.search(filters, page).await)
    }

    /// Copy of the current state for rendering.
    pub async fn snapshot(&self) -> SearchState {
        self.state.lock().await.clone()
    }

    /// Generation of the most recently issued search.
    #[must_use]
    pub fn latest_generation(&self) -> Generation {
        self.generations.latest()
    }
}

impl<A> std::fmt::Debug for App<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("latest_generation", &self.generations.latest())
            .finish()
    }
}
