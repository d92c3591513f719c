//! What list of movies the listing screen shows.
//!
//! Two independent tracks feed the screen: trending and search. Exactly one of them is
//! the active display source. Each track runs `Idle -> Loading -> Success | Error` and
//! can be re-entered from either terminal state. Filters are applied on read, over the
//! active track's full list.
//!
//! Operations never do I/O themselves. They return the [`FetchRequest`]s to run and
//! the matching [`FetchOutcome`]s are fed back through [`Listing::apply`]. Outcomes
//! whose ticket no longer matches their track are dropped.

use crate::app::error::GatewayError;
use crate::app::filters::FilterState;
use crate::app::models::{Genre, MovieSummary, SearchPage};
use crate::app::store::{LAST_QUERY_KEY, PreferenceStore};
use crate::app::tmdb::TrendingWindow;
use crate::app::worker::{FetchOutcome, FetchRequest, Ticket};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// A message for the user, with the severity it should be rendered at.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySource {
    Trending,
    Search,
}

#[derive(Debug, Default)]
pub struct TrendingTrack {
    pub movies: Vec<MovieSummary>,
    pub state: LoadState,
    ticket: Ticket,
}

#[derive(Debug)]
pub struct SearchSession {
    pub query: String,
    pub current_page: u32,
    pub total_pages: u32,
    pub results: Vec<MovieSummary>,
    pub state: LoadState,
    /// Set while a `load_more` page is in flight.
    pub appending: bool,
    /// Error from the last failed `load_more`; the accumulated results are kept.
    pub append_error: Option<String>,
    ticket: Ticket,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            query: String::new(),
            current_page: 1,
            total_pages: 0,
            results: Vec::new(),
            state: LoadState::Idle,
            appending: false,
            append_error: None,
            ticket: 0,
        }
    }
}

#[derive(Debug)]
pub struct Listing {
    store: PreferenceStore,
    window: TrendingWindow,
    source: DisplaySource,
    trending: TrendingTrack,
    search: SearchSession,
    filters: FilterState,
    genres: Vec<Genre>,
    last_ticket: Ticket,
}

impl Listing {
    pub fn new(store: PreferenceStore, window: TrendingWindow) -> Self {
        Self {
            store,
            window,
            source: DisplaySource::Trending,
            trending: TrendingTrack::default(),
            search: SearchSession::default(),
            filters: FilterState::default(),
            genres: Vec::new(),
            last_ticket: 0,
        }
    }

    fn next_ticket(&mut self) -> Ticket {
        self.last_ticket += 1;
        self.last_ticket
    }

    /// Restores the last persisted query, or falls back to trending.
    pub fn mount(&mut self) -> Vec<FetchRequest> {
        let mut requests = vec![FetchRequest::Genres];

        let restored = self
            .store
            .get_string(LAST_QUERY_KEY)
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        match restored {
            Some(query) => {
                tracing::info!(query = %query, "Restoring last search");
                requests.push(self.start_search(query));
            }
            None => requests.push(self.start_trending()),
        }
        requests
    }

    /// Submits a new query. An empty (after trim) query clears the search track and
    /// falls back to trending.
    pub fn submit_query(&mut self, raw: &str) -> Option<FetchRequest> {
        let query = raw.trim();
        if query.is_empty() {
            self.clear_search();
            return Some(self.start_trending());
        }

        self.store.set_string(LAST_QUERY_KEY, query);
        Some(self.start_search(query.to_string()))
    }

    fn clear_search(&mut self) {
        tracing::debug!("Clearing search");
        self.search = SearchSession {
            ticket: self.next_ticket(),
            ..SearchSession::default()
        };
        self.store.remove_key(LAST_QUERY_KEY);
        self.source = DisplaySource::Trending;
    }

    fn start_search(&mut self, query: String) -> FetchRequest {
        let ticket = self.next_ticket();
        self.search = SearchSession {
            query: query.clone(),
            state: LoadState::Loading,
            ticket,
            ..SearchSession::default()
        };
        self.source = DisplaySource::Search;

        FetchRequest::Search {
            ticket,
            query,
            page: 1,
        }
    }

    fn start_trending(&mut self) -> FetchRequest {
        let ticket = self.next_ticket();
        self.trending.ticket = ticket;
        self.trending.movies.clear();
        self.trending.state = LoadState::Loading;

        FetchRequest::Trending {
            ticket,
            window: self.window,
        }
    }

    pub fn can_load_more(&self) -> bool {
        self.source == DisplaySource::Search
            && self.search.state == LoadState::Success
            && !self.search.appending
            && self.search.current_page < self.search.total_pages
    }

    /// Requests the next search page. A no-op unless [`Listing::can_load_more`].
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        if !self.can_load_more() {
            return None;
        }
        self.search.appending = true;
        self.search.append_error = None;

        Some(FetchRequest::Search {
            ticket: self.search.ticket,
            query: self.search.query.clone(),
            page: self.search.current_page + 1,
        })
    }

    /// Re-runs the active track from scratch.
    pub fn reload(&mut self) -> Option<FetchRequest> {
        match self.source {
            DisplaySource::Trending => Some(self.start_trending()),
            DisplaySource::Search => {
                let query = self.search.query.clone();
                self.submit_query(&query)
            }
        }
    }

    /// Switches between the daily and weekly trending list and refetches it.
    pub fn toggle_window(&mut self) -> FetchRequest {
        self.window = self.window.toggled();
        self.start_trending()
    }

    /// Feeds a finished fetch back in. Returns false when the outcome was not for the
    /// listing or was stale.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        match outcome {
            FetchOutcome::Trending { ticket, result } => self.apply_trending(ticket, result),
            FetchOutcome::Search {
                ticket,
                page,
                result,
            } => self.apply_search(ticket, page, result),
            FetchOutcome::Genres { result } => {
                match result {
                    Ok(genres) => self.genres = genres,
                    Err(e) => tracing::warn!("Could not load genres: {}", e),
                }
                true
            }
            FetchOutcome::Details { .. } | FetchOutcome::Poster { .. } => false,
        }
    }

    fn apply_trending(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<MovieSummary>, GatewayError>,
    ) -> bool {
        if ticket != self.trending.ticket {
            tracing::debug!(
                ticket,
                current = self.trending.ticket,
                "Dropping stale trending response"
            );
            return false;
        }
        match result {
            Ok(movies) => {
                tracing::info!(count = movies.len(), window = %self.window, "Trending loaded");
                self.trending.movies = movies;
                self.trending.state = LoadState::Success;
            }
            Err(e) => {
                tracing::warn!("Trending fetch failed: {}", e);
                self.trending.state = LoadState::Error(e.to_string());
            }
        }
        true
    }

    fn apply_search(
        &mut self,
        ticket: Ticket,
        page: u32,
        result: Result<SearchPage, GatewayError>,
    ) -> bool {
        if ticket != self.search.ticket {
            tracing::debug!(
                ticket,
                current = self.search.ticket,
                "Dropping stale search response"
            );
            return false;
        }

        if self.search.appending {
            if page != self.search.current_page + 1 {
                tracing::debug!(page, "Dropping out-of-order search page");
                return false;
            }
            self.search.appending = false;
            match result {
                Ok(next) => {
                    self.search.results.extend(next.results);
                    self.search.current_page = page;
                    self.search.total_pages = next.total_pages;
                }
                Err(e) => {
                    tracing::warn!(page, "Load more failed: {}", e);
                    self.search.append_error = Some(e.to_string());
                }
            }
            return true;
        }

        if page != 1 || !self.search.state.is_loading() {
            return false;
        }
        match result {
            Ok(first) => {
                tracing::info!(
                    query = %self.search.query,
                    results = first.results.len(),
                    total_pages = first.total_pages,
                    "Search loaded"
                );
                self.search.results = first.results;
                self.search.current_page = 1;
                self.search.total_pages = first.total_pages;
                self.search.state = LoadState::Success;
            }
            Err(e) => {
                tracing::warn!(query = %self.search.query, "Search failed: {}", e);
                self.search.state = LoadState::Error(e.to_string());
            }
        }
        true
    }

    pub fn source(&self) -> DisplaySource {
        self.source
    }

    pub fn window(&self) -> TrendingWindow {
        self.window
    }

    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn genre_name(&self, genre_id: u32) -> Option<&str> {
        self.genres
            .iter()
            .find(|g| g.id == genre_id)
            .map(|g| g.name.as_str())
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    /// Load state of the active track.
    pub fn state(&self) -> &LoadState {
        match self.source {
            DisplaySource::Trending => &self.trending.state,
            DisplaySource::Search => &self.search.state,
        }
    }

    /// Full, unfiltered list of the active track.
    pub fn base(&self) -> &[MovieSummary] {
        match self.source {
            DisplaySource::Trending => &self.trending.movies,
            DisplaySource::Search => &self.search.results,
        }
    }

    /// The active track's list with the current filters applied.
    pub fn visible(&self) -> Vec<MovieSummary> {
        self.filters.apply(self.base())
    }

    pub fn notice(&self) -> Option<Notice> {
        if let LoadState::Error(message) = self.state() {
            return Some(Notice::Error(message.clone()));
        }
        if *self.state() != LoadState::Success {
            return None;
        }
        if self.source == DisplaySource::Search {
            if let Some(message) = &self.search.append_error {
                return Some(Notice::Error(message.clone()));
            }
        }

        if self.base().is_empty() {
            let text = match self.source {
                DisplaySource::Search => {
                    format!("No movies found for \"{}\".", self.search.query)
                }
                DisplaySource::Trending => "No trending movies right now.".to_string(),
            };
            return Some(Notice::Info(text));
        }
        if self.visible().is_empty() {
            return Some(Notice::Info(
                "No movies match the current filters.".to_string(),
            ));
        }
        None
    }
}
