use crate::app::App;
use crate::app::detail::{DetailState, TrailerSelection};
use crate::app::models::MovieDetail;
use crate::ui::api_key::render_missing_api_key;
use crate::ui::loading::render_loading;
use crate::ui::palette::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use ratatui_image::{Resize, StatefulImage, protocol::StatefulProtocol};

const TOP_CAST: usize = 8;

/// Renders the movie detail screen
pub fn render_movie_detail(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    if !app.api_configured {
        render_missing_api_key(frame, palette, area);
        return;
    }

    match app.detail.state() {
        DetailState::Loading => {
            render_loading(
                frame,
                app,
                palette,
                area,
                "Fetching movie details...".to_string(),
            );
        }
        DetailState::Failed(error) => {
            let error = error.clone();
            render_error_state(frame, palette, area, &error);
        }
        DetailState::Loaded(_) => render_movie_info(frame, app, palette, area),
        DetailState::Idle => render_empty_state(frame, palette, area),
    }
}

/// Renders error state
fn render_error_state(frame: &mut Frame, palette: &Palette, area: Rect, error: &str) {
    let error_block = Block::default()
        .title("Error")
        .borders(Borders::ALL)
        .style(palette.base());

    let error_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Failed to fetch movie details",
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(error, Style::default().fg(palette.error))),
        Line::from(""),
        Line::from(Span::styled(
            "Press (Esc) or (b) to go back",
            palette.muted(),
        )),
    ];

    let error_paragraph = Paragraph::new(error_text)
        .block(error_block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}

/// Renders the poster section
fn render_poster_section(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let poster_block = Block::default()
        .borders(Borders::ALL)
        .title("Poster")
        .style(palette.base());

    if let Some(protocol) = &mut app.poster_protocol {
        let image = StatefulImage::<StatefulProtocol>::default().resize(Resize::Fit(None));
        let inner_area = poster_block.inner(area);
        frame.render_widget(poster_block, area);
        frame.render_stateful_widget(image, inner_area, protocol);
        return;
    }

    let message = if app.loading_poster {
        "Downloading poster..."
    } else if app.picker.is_none() {
        "Poster preview not supported by this terminal"
    } else {
        "No poster available"
    };

    let placeholder = Paragraph::new(vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(message, palette.muted())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(poster_block);

    frame.render_widget(placeholder, area);
}

/// Renders movie information
fn render_movie_info(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let Some(title) = app.detail.detail().map(|m| m.title.clone()) else {
        return;
    };

    let outer_block = Block::default()
        .title(format!("Movie Details - {}", title))
        .borders(Borders::ALL)
        .style(palette.base());

    let inner_area = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(inner_area);

    render_poster_section(frame, app, palette, columns[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title info
            Constraint::Min(5),    // Content
        ])
        .split(columns[1]);

    let Some(movie) = app.detail.detail() else {
        return;
    };
    let is_favorite = app.favorites.is_favorite(movie.id);

    render_title_section(frame, palette, rows[0], movie, is_favorite);

    let trailer = app.detail.trailer();
    render_content_section(frame, palette, rows[1], movie, trailer);
}

/// Renders the title section with basic info
fn render_title_section(
    frame: &mut Frame,
    palette: &Palette,
    area: Rect,
    movie: &MovieDetail,
    is_favorite: bool,
) {
    let year = movie
        .release_year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "----".to_string());

    let rating = match movie.vote_average {
        Some(score) => format!("{:.1}/10", score),
        None => "Not rated".to_string(),
    };

    let runtime = movie
        .runtime
        .filter(|minutes| *minutes > 0)
        .map(|minutes| format!("{}h {}m", minutes / 60, minutes % 60))
        .unwrap_or_else(|| "Unknown".to_string());

    let status = movie
        .status
        .as_ref()
        .map(|s| s.label())
        .unwrap_or("Unknown");

    let genres = movie
        .genres
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let favorite = if is_favorite {
        Span::styled("♥ In favorites", Style::default().fg(palette.error))
    } else {
        Span::styled("Press (a) to add to favorites", palette.muted())
    };

    let title_info = vec![
        Line::from(vec![
            Span::styled(movie.title.as_str(), palette.heading()),
            Span::raw(" "),
            Span::styled(format!("({})", year), palette.muted()),
        ]),
        Line::from(vec![
            Span::styled("Rating: ", palette.muted()),
            Span::styled(
                rating,
                Style::default()
                    .fg(palette.rating(movie.vote_average))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" ({} votes)", movie.vote_count), palette.muted()),
            Span::raw(" | "),
            Span::styled("Runtime: ", palette.muted()),
            Span::styled(runtime, palette.text()),
            Span::raw(" | "),
            Span::styled("Status: ", palette.muted()),
            Span::styled(status, palette.text()),
        ]),
        Line::from(vec![
            Span::styled("Genre: ", palette.muted()),
            Span::styled(genres, palette.text()),
        ]),
        Line::from(favorite),
    ];

    frame.render_widget(Paragraph::new(title_info), area);
}

/// Renders the main content section
fn render_content_section(
    frame: &mut Frame,
    palette: &Palette,
    area: Rect,
    movie: &MovieDetail,
    trailer: Option<TrailerSelection<'_>>,
) {
    let mut content = vec![];

    if let Some(tagline) = movie.tagline.as_deref().filter(|t| !t.is_empty()) {
        content.push(Line::from(Span::styled(
            format!("\"{}\"", tagline),
            palette.muted().add_modifier(Modifier::ITALIC),
        )));
        content.push(Line::from(""));
    }

    content.push(Line::from(Span::styled("Overview:", palette.heading())));
    let overview = movie
        .overview
        .as_deref()
        .filter(|o| !o.is_empty())
        .unwrap_or("No overview available.");
    content.push(Line::from(Span::styled(overview, palette.text())));
    content.push(Line::from(""));

    content.push(Line::from(Span::styled("Top cast:", palette.heading())));
    if movie.credits.cast.is_empty() {
        content.push(Line::from(Span::styled(
            "  No cast information.",
            palette.muted(),
        )));
    }
    for member in movie.credits.cast.iter().take(TOP_CAST) {
        let mut line = vec![
            Span::raw("  "),
            Span::styled(member.name.as_str(), palette.text()),
        ];
        if let Some(character) = member.character.as_deref().filter(|c| !c.is_empty()) {
            line.push(Span::styled(format!(" as {}", character), palette.muted()));
        }
        content.push(Line::from(line));
    }
    content.push(Line::from(""));

    content.push(Line::from(Span::styled("Trailer:", palette.heading())));
    match &trailer {
        Some(TrailerSelection::Trailer(video)) => {
            let url = video.watch_url().unwrap_or_default();
            let name = video.name.clone().unwrap_or_else(|| "Trailer".to_string());
            content.push(Line::from(vec![
                Span::styled(format!("  {}: ", name), palette.text()),
                Span::styled(
                    url,
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
        Some(selection) => {
            let message = selection.message().unwrap_or_default();
            content.push(Line::from(Span::styled(
                format!("  {}", message),
                Style::default().fg(palette.info),
            )));
        }
        None => {}
    }

    let content_paragraph = Paragraph::new(content).wrap(Wrap { trim: true });

    frame.render_widget(content_paragraph, area);
}

/// Renders empty state
fn render_empty_state(frame: &mut Frame, palette: &Palette, area: Rect) {
    let empty_block = Block::default()
        .title("Movie Details")
        .borders(Borders::ALL)
        .style(palette.base());

    let empty_text = vec![
        Line::from(""),
        Line::from(Span::styled("No movie details available", palette.muted())),
        Line::from(""),
        Line::from(Span::styled(
            "Press (Esc) or (b) to go back",
            palette.muted(),
        )),
    ];

    let empty_paragraph = Paragraph::new(empty_text)
        .block(empty_block)
        .alignment(Alignment::Center);

    frame.render_widget(empty_paragraph, area);
}
