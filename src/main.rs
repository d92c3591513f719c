mod app;
use app::App;

mod ui;

use std::fs::OpenOptions;
use std::io::{self, Stderr};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use ratatui::Terminal;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use ratatui_image::picker::Picker;
use tracing_subscriber::EnvFilter;

use crate::app::config::Config;
use crate::app::filters::FilterState;
use crate::app::store::PreferenceStore;
use crate::app::tmdb::{MovieApi, TmdbClient};
use crate::app::{CurrentScreen, InputMode};

const LOG_FILE_NAME: &str = "movie_explorer.log";

/// Logs go to a file; stderr belongs to the terminal UI.
fn init_tracing(path: Option<PathBuf>) {
    let Some(path) = path else {
        return;
    };
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Could not open log file {}: {}", path.display(), e);
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let config = Config::from_env();

    let store = match &config.data_dir {
        Some(dir) => PreferenceStore::open(dir),
        None => PreferenceStore::default_location(),
    };
    let log_path = config
        .log_file
        .clone()
        .or_else(|| store.root().map(|root| root.join(LOG_FILE_NAME)));
    init_tracing(log_path);

    match dotenv {
        Ok(path) => tracing::info!("Loaded environment from {:?}", path),
        Err(e) => tracing::debug!("No .env file loaded ({}), relying on environment", e),
    }
    tracing::info!(?config, "Starting movie explorer");

    let api: Option<Arc<dyn MovieApi>> = match &config.api_key {
        Some(key) => {
            let client: Arc<dyn MovieApi> = Arc::new(TmdbClient::with_base_urls(
                key.clone(),
                config.base_url.clone(),
                config.image_base_url.clone(),
            ));
            Some(client)
        }
        None => {
            tracing::warn!("TMDB_API_KEY is not set, remote data is disabled");
            None
        }
    };

    // setup terminal
    enable_raw_mode()?;
    let mut stderr = io::stderr(); // This is a special case. Normally using stdout is fine
    execute!(stderr, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    // create app and run it
    let mut app = App::new(api, store, config.trending_window);
    app.picker = match Picker::from_query_stdio() {
        Ok(picker) => Some(picker),
        Err(e) => {
            tracing::info!("Terminal image query failed, posters disabled: {}", e);
            None
        }
    };
    app.mount();

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("Exited with error: {:#}", e);
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stderr>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        app.poll_outcomes();
        app.tick();

        // Poll for events with a timeout to allow UI updates
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == event::KeyEventKind::Release {
            // Skip events that are not KeyEventKind::Press
            continue;
        }

        if app.input_mode != InputMode::Normal {
            handle_input_key(app, key);
            continue;
        }

        // Any key press clears the previous one-shot message
        if key.code != KeyCode::Char('q') {
            app.status_message = None;
        }

        match app.current_screen {
            CurrentScreen::Listing => handle_listing_key(app, key),
            CurrentScreen::Detail => match key.code {
                KeyCode::Char('a') => app.toggle_detail_favorite(),
                KeyCode::Esc | KeyCode::Char('b') => app.go_back(),
                KeyCode::Char('t') => app.toggle_theme(),
                KeyCode::Char('q') => app.request_exit(),
                _ => {}
            },
            CurrentScreen::Favorites => match key.code {
                KeyCode::Down | KeyCode::Char('j') => app.next_favorite(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_favorite(),
                KeyCode::Enter => app.open_selected_detail(),
                KeyCode::Char('d') => app.remove_selected_favorite(),
                KeyCode::Esc | KeyCode::Char('b') => app.go_back(),
                KeyCode::Char('t') => app.toggle_theme(),
                KeyCode::Char('q') => app.request_exit(),
                _ => {}
            },
            CurrentScreen::Exiting => match key.code {
                KeyCode::Char('y') => return Ok(()),
                KeyCode::Char('n') | KeyCode::Esc => app.cancel_exit(),
                _ => {}
            },
        }
    }
}

fn handle_input_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Enter => app.submit_input(),
        KeyCode::Esc => app.cancel_input(),
        _ => {}
    }
}

fn handle_listing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.request_exit(),
        KeyCode::Char('/') => app.begin_search(),
        KeyCode::Down | KeyCode::Char('j') => app.next_movie(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_movie(),
        KeyCode::Enter => app.open_selected_detail(),
        KeyCode::Char('n') => app.load_more(),
        KeyCode::Char('a') => app.toggle_selected_favorite(),
        KeyCode::Char('f') => app.cycle_genre(),
        KeyCode::Char('y') => app.begin_year_input(),
        KeyCode::Char('[') => app.adjust_rating(FilterState::lower_min),
        KeyCode::Char(']') => app.adjust_rating(FilterState::raise_min),
        KeyCode::Char('{') => app.adjust_rating(FilterState::lower_max),
        KeyCode::Char('}') => app.adjust_rating(FilterState::raise_max),
        KeyCode::Char('c') => app.clear_filters(),
        KeyCode::Char('w') => app.toggle_window(),
        KeyCode::Char('v') => app.show_favorites(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('r') => app.reload(),
        _ => {}
    }
}
