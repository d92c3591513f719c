use crate::app::App;
use crate::ui::palette::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

/// Renders the saved favorites, in the order they were added
pub fn render_favorites(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .title(format!("Favorites ({})", app.favorites.len()))
        .borders(Borders::ALL)
        .style(palette.base());

    if app.favorites.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "You haven't added any movies to your favorites yet. Start exploring and add some!",
                Style::default().fg(palette.info),
            )),
        ])
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .favorites
        .list()
        .iter()
        .map(|movie| {
            let year = movie
                .release_year()
                .map(|y| format!(" ({})", y))
                .unwrap_or_default();
            let rating = movie
                .vote_average
                .map(|score| format!("★ {:.1}", score))
                .unwrap_or_else(|| "★ n/a".to_string());

            ListItem::new(Line::from(vec![
                Span::styled("♥ ", Style::default().fg(palette.error)),
                Span::styled(
                    movie.title.clone(),
                    palette.text().add_modifier(Modifier::BOLD),
                ),
                Span::styled(year, palette.muted()),
                Span::raw("  "),
                Span::styled(
                    rating,
                    Style::default().fg(palette.rating(movie.vote_average)),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(palette.highlight())
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.favorites_state);
}
