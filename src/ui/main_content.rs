use crate::app::App;
use crate::app::listing::{DisplaySource, Notice};
use crate::app::models::MovieSummary;
use crate::ui::api_key::render_missing_api_key;
use crate::ui::loading::render_loading;
use crate::ui::palette::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

/// Renders the listing screen: filter bar on top, then the movie list or its state
pub fn render_main_content(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    if !app.api_configured {
        render_missing_api_key(frame, palette, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filters
            Constraint::Min(1),    // Movies
        ])
        .split(area);

    render_filter_bar(frame, app, palette, chunks[0]);

    if app.listing.state().is_loading() {
        let label = match app.listing.source() {
            DisplaySource::Search => {
                format!("Searching for \"{}\"...", app.listing.search().query)
            }
            DisplaySource::Trending => {
                format!("Loading trending movies ({})...", app.listing.window())
            }
        };
        render_loading(frame, app, palette, chunks[1], label);
        return;
    }

    let movies = app.listing.visible();
    if movies.is_empty() {
        render_notice(frame, app.listing.notice(), palette, chunks[1]);
        return;
    }

    // A failed load_more keeps the results, so its error sits under the list
    let (list_area, notice_area) = match app.listing.notice() {
        Some(notice) => {
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(3)])
                .split(chunks[1]);
            (split[0], Some((split[1], notice)))
        }
        None => (chunks[1], None),
    };

    let title = list_title(app, movies.len());
    let items: Vec<ListItem> = movies
        .iter()
        .map(|movie| movie_item(app, palette, movie))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .style(palette.base()),
        )
        .highlight_style(palette.highlight())
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, list_area, &mut app.list_state);

    if let Some((area, notice)) = notice_area {
        render_notice(frame, Some(notice), palette, area);
    }
}

fn list_title(app: &App, shown: usize) -> String {
    let listing = &app.listing;
    let mut title = match listing.source() {
        DisplaySource::Search => {
            let search = listing.search();
            format!(
                "Results for \"{}\" ({} shown, page {} of {})",
                search.query,
                shown,
                search.current_page,
                search.total_pages.max(1)
            )
        }
        DisplaySource::Trending => {
            format!("Trending by {} ({} shown)", listing.window(), shown)
        }
    };
    if listing.filters().is_active() {
        title.push_str(&format!(" of {}", listing.base().len()));
    }
    if listing.search().appending && listing.source() == DisplaySource::Search {
        title.push_str(" - Loading more...");
    }
    title
}

fn movie_item<'a>(app: &App, palette: &Palette, movie: &'a MovieSummary) -> ListItem<'a> {
    let year = movie
        .release_year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "----".to_string());

    let rating = match movie.vote_average {
        Some(score) => format!("★ {:.1}", score),
        None => "★ n/a".to_string(),
    };

    let genres = movie
        .genre_ids
        .iter()
        .filter_map(|id| app.listing.genre_name(*id))
        .collect::<Vec<_>>()
        .join(", ");

    let marker = if app.favorites.is_favorite(movie.id) {
        Span::styled("♥ ", Style::default().fg(palette.error))
    } else {
        Span::raw("  ")
    };

    let content = vec![
        Line::from(vec![
            marker,
            Span::styled(
                movie.title.as_str(),
                palette.text().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" ({})", year), palette.muted()),
        ]),
        Line::from(vec![
            Span::raw("    "),
            Span::styled(
                rating,
                Style::default().fg(palette.rating(movie.vote_average)),
            ),
            Span::styled(format!(" ({} votes)", movie.vote_count), palette.muted()),
            Span::raw("  "),
            Span::styled(genres, palette.muted()),
        ]),
    ];

    ListItem::new(content)
}

/// One line describing each active filter
fn render_filter_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let filters = app.listing.filters();
    let genre = filters
        .genre_id()
        .map(|id| {
            app.listing
                .genre_name(id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", id))
        })
        .unwrap_or_else(|| "Any".to_string());
    let year = filters.year().unwrap_or("Any").to_string();
    let (min, max) = filters.rating_range();

    let mut spans = vec![
        Span::styled("Genre: ", palette.muted()),
        Span::styled(genre, palette.text()),
        Span::raw(" | "),
        Span::styled("Year: ", palette.muted()),
        Span::styled(year, palette.text()),
        Span::raw(" | "),
        Span::styled("Rating: ", palette.muted()),
        Span::styled(format!("{:.1} - {:.1}", min, max), palette.text()),
    ];
    if app.listing.source() == DisplaySource::Trending {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Window: ", palette.muted()));
        spans.push(Span::styled(app.listing.window().to_string(), palette.text()));
    }

    let title = if filters.is_active() {
        "Filters (active)"
    } else {
        "Filters"
    };

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .style(palette.base()),
    );
    frame.render_widget(bar, area);
}

fn render_notice(frame: &mut Frame, notice: Option<Notice>, palette: &Palette, area: Rect) {
    let (style, title) = match &notice {
        Some(Notice::Error(_)) => (
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD),
            "Error",
        ),
        Some(Notice::Info(_)) => (Style::default().fg(palette.info), "Movies"),
        None => (palette.muted(), "Movies"),
    };
    let text = notice
        .as_ref()
        .map(Notice::text)
        .unwrap_or("Nothing to show yet. Press (r) to reload.");

    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(text, style))])
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .style(palette.base()),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
