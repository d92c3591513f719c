use std::sync::Arc;
use std::sync::mpsc;

use ratatui::widgets::ListState;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use throbber_widgets_tui::ThrobberState;

use crate::app::detail::DetailView;
use crate::app::favorites::Favorites;
use crate::app::filters::FilterState;
use crate::app::listing::{DisplaySource, Listing};
use crate::app::models::MovieSummary;
use crate::app::store::PreferenceStore;
use crate::app::theme::ThemeRegistry;
use crate::app::tmdb::{MovieApi, TrendingWindow};
use crate::app::worker::{FetchOutcome, FetchRequest, Worker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentScreen {
    Listing,
    Detail,
    Favorites,
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Year,
}

pub struct App {
    pub current_screen: CurrentScreen,
    /// Where `back` from the detail screen returns to.
    pub detail_return: CurrentScreen,
    /// Where cancelling the exit prompt returns to.
    pub exit_return: CurrentScreen,
    pub input_mode: InputMode,
    pub input: String,
    pub listing: Listing,
    pub detail: DetailView,
    pub favorites: Favorites,
    pub theme: ThemeRegistry,
    pub list_state: ListState,
    pub favorites_state: ListState,
    pub api_configured: bool,
    pub picker: Option<Picker>,
    pub poster_protocol: Option<StatefulProtocol>,
    pub loading_poster: bool,
    pub throbber_state: ThrobberState,
    /// One-line feedback shown in the footer until the next action.
    pub status_message: Option<String>,
    pub receiver: Option<mpsc::Receiver<FetchOutcome>>,
    worker: Option<Worker>,
}

impl App {
    /// `api` is `None` when no credential is configured; nothing is fetched then.
    pub fn new(
        api: Option<Arc<dyn MovieApi>>,
        store: PreferenceStore,
        window: TrendingWindow,
    ) -> Self {
        let (worker, receiver) = match api {
            Some(api) => {
                let (worker, receiver) = Worker::new(api);
                (Some(worker), Some(receiver))
            }
            None => (None, None),
        };

        let mut list_state = ListState::default();
        list_state.select(Some(0));
        let mut favorites_state = ListState::default();
        favorites_state.select(Some(0));

        Self {
            current_screen: CurrentScreen::Listing,
            detail_return: CurrentScreen::Listing,
            exit_return: CurrentScreen::Listing,
            input_mode: InputMode::Normal,
            input: String::new(),
            listing: Listing::new(store.clone(), window),
            detail: DetailView::default(),
            favorites: Favorites::load(store.clone()),
            theme: ThemeRegistry::load(store),
            list_state,
            favorites_state,
            api_configured: worker.is_some(),
            picker: None,
            poster_protocol: None,
            loading_poster: false,
            throbber_state: ThrobberState::default(),
            status_message: None,
            receiver,
            worker,
        }
    }

    fn dispatch(&self, requests: impl IntoIterator<Item = FetchRequest>) {
        match &self.worker {
            Some(worker) => worker.dispatch_all(requests),
            None => tracing::debug!("No API key configured, skipping fetch"),
        }
    }

    pub fn mount(&mut self) {
        let requests = self.listing.mount();
        self.dispatch(requests);
    }

    /// Drains every finished fetch without blocking.
    pub fn poll_outcomes(&mut self) {
        let mut outcomes = Vec::new();
        if let Some(receiver) = &self.receiver {
            while let Ok(outcome) = receiver.try_recv() {
                outcomes.push(outcome);
            }
        }
        for outcome in outcomes {
            self.handle_outcome(outcome);
        }
    }

    pub fn handle_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            outcome @ FetchOutcome::Details { .. } => {
                if let Some(poster) = self.detail.apply(outcome) {
                    self.loading_poster = true;
                    self.dispatch(Some(poster));
                }
            }
            FetchOutcome::Poster { ticket, result } => {
                if ticket != self.detail.ticket() {
                    return;
                }
                self.loading_poster = false;
                match (result, &mut self.picker) {
                    (Ok(image), Some(picker)) => {
                        self.poster_protocol = Some(picker.new_resize_protocol(image));
                    }
                    (Ok(_), None) => {
                        tracing::debug!("Terminal cannot render images, skipping poster")
                    }
                    (Err(e), _) => tracing::debug!("Poster unavailable: {}", e),
                }
            }
            outcome => {
                if self.listing.apply(outcome) {
                    self.clamp_selection();
                }
            }
        }
    }

    pub fn tick(&mut self) {
        self.throbber_state.calc_next();
    }

    // Listing

    pub fn begin_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.input.clear();
        self.status_message = None;
    }

    pub fn begin_year_input(&mut self) {
        self.input_mode = InputMode::Year;
        self.input = self.listing.filters().year().unwrap_or_default().to_string();
        self.status_message = None;
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
    }

    pub fn submit_input(&mut self) {
        let input = std::mem::take(&mut self.input);
        match self.input_mode {
            InputMode::Search => {
                let request = self.listing.submit_query(&input);
                self.dispatch(request);
                self.reset_selection();
            }
            InputMode::Year => {
                if self.listing.filters_mut().set_year(&input) {
                    self.reset_selection();
                } else {
                    self.status_message =
                        Some("Year must be four digits, e.g. 1999".to_string());
                }
            }
            InputMode::Normal => {}
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn load_more(&mut self) {
        let request = self.listing.load_more();
        self.dispatch(request);
    }

    pub fn reload(&mut self) {
        let request = self.listing.reload();
        self.dispatch(request);
        self.reset_selection();
    }

    /// Only meaningful while trending is on screen.
    pub fn toggle_window(&mut self) {
        if self.listing.source() != DisplaySource::Trending {
            return;
        }
        let request = self.listing.toggle_window();
        self.dispatch(Some(request));
        self.reset_selection();
    }

    pub fn cycle_genre(&mut self) {
        let genres = self.listing.genres().to_vec();
        self.listing.filters_mut().cycle_genre(&genres);
        self.reset_selection();
    }

    pub fn adjust_rating(&mut self, change: impl FnOnce(&mut FilterState) -> bool) {
        if change(self.listing.filters_mut()) {
            self.clamp_selection();
        }
    }

    pub fn clear_filters(&mut self) {
        self.listing.filters_mut().clear();
        self.reset_selection();
    }

    pub fn selected_movie(&self) -> Option<MovieSummary> {
        let index = self.list_state.selected()?;
        self.listing.visible().into_iter().nth(index)
    }

    pub fn next_movie(&mut self) {
        let count = self.listing.visible().len();
        step(&mut self.list_state, count, true);
    }

    pub fn previous_movie(&mut self) {
        let count = self.listing.visible().len();
        step(&mut self.list_state, count, false);
    }

    fn reset_selection(&mut self) {
        self.list_state.select(Some(0));
    }

    fn clamp_selection(&mut self) {
        let count = self.listing.visible().len();
        let index = self.list_state.selected().unwrap_or(0);
        self.list_state
            .select(Some(index.min(count.saturating_sub(1))));
    }

    // Favorites

    pub fn toggle_selected_favorite(&mut self) {
        if let Some(movie) = self.selected_movie() {
            self.toggle_favorite(movie);
        }
    }

    pub fn toggle_detail_favorite(&mut self) {
        if let Some(movie) = self.detail.detail().map(|d| d.summary()) {
            self.toggle_favorite(movie);
        }
    }

    fn toggle_favorite(&mut self, movie: MovieSummary) {
        let title = movie.title.clone();
        let added = self.favorites.toggle(movie);
        self.status_message = Some(if added {
            format!("Added \"{}\" to favorites", title)
        } else {
            format!("Removed \"{}\" from favorites", title)
        });
    }

    pub fn show_favorites(&mut self) {
        self.current_screen = CurrentScreen::Favorites;
        self.favorites_state.select(Some(0));
        self.status_message = None;
    }

    pub fn selected_favorite(&self) -> Option<&MovieSummary> {
        self.favorites.list().get(self.favorites_state.selected()?)
    }

    pub fn next_favorite(&mut self) {
        step(&mut self.favorites_state, self.favorites.len(), true);
    }

    pub fn previous_favorite(&mut self) {
        step(&mut self.favorites_state, self.favorites.len(), false);
    }

    pub fn remove_selected_favorite(&mut self) {
        if let Some(id) = self.selected_favorite().map(|m| m.id) {
            self.favorites.remove(id);
            let index = self.favorites_state.selected().unwrap_or(0);
            self.favorites_state
                .select(Some(index.min(self.favorites.len().saturating_sub(1))));
        }
    }

    // Detail

    pub fn open_detail(&mut self, movie: &MovieSummary) {
        if self.current_screen != CurrentScreen::Detail {
            self.detail_return = self.current_screen;
        }
        self.current_screen = CurrentScreen::Detail;
        self.poster_protocol = None;
        self.loading_poster = false;
        self.status_message = None;
        let request = self.detail.open(movie.id);
        self.dispatch(Some(request));
    }

    pub fn open_selected_detail(&mut self) {
        let movie = match self.current_screen {
            CurrentScreen::Favorites => self.selected_favorite().cloned(),
            _ => self.selected_movie(),
        };
        if let Some(movie) = movie {
            self.open_detail(&movie);
        }
    }

    pub fn close_detail(&mut self) {
        self.detail.close();
        self.poster_protocol = None;
        self.loading_poster = false;
        self.current_screen = self.detail_return;
    }

    // Misc

    pub fn toggle_theme(&mut self) {
        self.theme.toggle();
    }

    pub fn request_exit(&mut self) {
        if self.current_screen != CurrentScreen::Exiting {
            self.exit_return = self.current_screen;
            self.current_screen = CurrentScreen::Exiting;
        }
    }

    pub fn cancel_exit(&mut self) {
        self.current_screen = self.exit_return;
    }

    pub fn go_back(&mut self) {
        match self.current_screen {
            CurrentScreen::Detail => self.close_detail(),
            CurrentScreen::Favorites => self.current_screen = CurrentScreen::Listing,
            CurrentScreen::Exiting => self.cancel_exit(),
            CurrentScreen::Listing => {}
        }
    }
}

/// Moves a list selection one row, wrapping at both ends.
fn step(state: &mut ListState, count: usize, forward: bool) {
    if count == 0 {
        return;
    }
    let current = state.selected().unwrap_or(0).min(count - 1);
    let next = if forward {
        (current + 1) % count
    } else if current == 0 {
        count - 1
    } else {
        current - 1
    };
    state.select(Some(next));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::worker::execute;
    use crate::app::worker::fake::{FakeApi, page, summary};
    use std::time::Duration;

    fn app_with(dir: &tempfile::TempDir) -> App {
        App::new(None, PreferenceStore::open(dir.path()), TrendingWindow::Day)
    }

    /// Feeds listing requests through the fake synchronously.
    fn load(
        app: &mut App,
        api: &FakeApi,
        requests: impl IntoIterator<Item = FetchRequest>,
    ) {
        for request in requests {
            app.handle_outcome(execute(api, request));
        }
    }

    #[test]
    fn without_api_key_nothing_is_dispatched() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(&dir);
        assert!(!app.api_configured);
        app.mount();
        assert!(app.receiver.is_none());
    }

    #[test]
    fn favorite_toggle_from_listing_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let api = FakeApi {
            trending: vec![summary(1), summary(2)],
            ..FakeApi::default()
        };
        let mut app = app_with(&dir);
        let requests = app.listing.mount();
        load(&mut app, &api, requests);

        app.next_movie();
        app.toggle_selected_favorite();
        assert!(app.favorites.is_favorite(2));
        assert!(app.status_message.as_deref().unwrap().starts_with("Added"));

        let reloaded = Favorites::load(PreferenceStore::open(dir.path()));
        assert!(reloaded.is_favorite(2));
    }

    #[test]
    fn selection_wraps_and_is_clamped_after_filtering() {
        let dir = tempfile::tempdir().unwrap();
        let mut drama = summary(3);
        drama.genre_ids = vec![18];
        let api = FakeApi {
            trending: vec![summary(1), summary(2), drama],
            ..FakeApi::default()
        };
        let mut app = app_with(&dir);
        let requests = app.listing.mount();
        load(&mut app, &api, requests);

        app.previous_movie();
        assert_eq!(app.list_state.selected(), Some(2));
        app.next_movie();
        assert_eq!(app.list_state.selected(), Some(0));

        app.previous_movie();
        app.adjust_rating(|f| f.set_rating_range(7.0, 10.0));
        assert!(app.listing.visible().is_empty());
        assert_eq!(app.list_state.selected(), Some(0));
        assert_eq!(app.selected_movie(), None);
    }

    #[test]
    fn detail_back_returns_to_the_opening_screen() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(&dir);
        app.favorites.add(summary(10));

        app.show_favorites();
        app.open_selected_detail();
        assert_eq!(app.current_screen, CurrentScreen::Detail);
        assert_eq!(app.detail.movie_id(), Some(10));

        app.go_back();
        assert_eq!(app.current_screen, CurrentScreen::Favorites);
        assert_eq!(app.detail.movie_id(), None);
    }

    #[test]
    fn search_input_submits_query() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = FakeApi::default();
        api.pages.insert(("alien".to_string(), 1), page(1, 2, 0));
        let api: Arc<dyn MovieApi> = Arc::new(api);
        let mut app = App::new(
            Some(api),
            PreferenceStore::open(dir.path()),
            TrendingWindow::Day,
        );

        app.begin_search();
        app.input.push_str("alien");
        app.submit_input();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.listing.search().query, "alien");
        assert!(app.listing.state().is_loading());

        let outcome = app
            .receiver
            .as_ref()
            .unwrap()
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        app.handle_outcome(outcome);
        assert_eq!(app.listing.visible().len(), 20);
        assert!(app.listing.can_load_more());
    }

    #[test]
    fn invalid_year_keeps_filter_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(&dir);

        app.begin_year_input();
        app.input.push_str("99");
        app.submit_input();
        assert_eq!(app.listing.filters().year(), None);
        assert!(app.status_message.is_some());

        app.begin_year_input();
        app.input.push_str("1999");
        app.submit_input();
        assert_eq!(app.listing.filters().year(), Some("1999"));
    }

    #[test]
    fn exit_prompt_over_detail_does_not_break_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(&dir);
        app.favorites.add(summary(4));
        app.show_favorites();
        app.open_selected_detail();

        app.request_exit();
        app.cancel_exit();
        assert_eq!(app.current_screen, CurrentScreen::Detail);
        app.go_back();
        assert_eq!(app.current_screen, CurrentScreen::Favorites);
    }

    #[test]
    fn exit_can_be_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(&dir);
        app.show_favorites();
        app.request_exit();
        assert_eq!(app.current_screen, CurrentScreen::Exiting);
        app.cancel_exit();
        assert_eq!(app.current_screen, CurrentScreen::Favorites);
    }
}
