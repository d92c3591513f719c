use crate::app::listing::DisplaySource;
use crate::app::{App, CurrentScreen, InputMode};
use crate::ui::palette::Palette;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Returns the appropriate instruction text based on app state
fn get_instruction_text(app: &App) -> String {
    match app.input_mode {
        InputMode::Search => return "(Enter) search, empty to clear, (Esc) cancel".to_string(),
        InputMode::Year => return "(Enter) apply year, empty to clear, (Esc) cancel".to_string(),
        InputMode::Normal => {}
    }

    match app.current_screen {
        CurrentScreen::Listing => {
            let mut text = String::from("(/) search, (↑↓/jk) move, (Enter) details, (a) favorite");
            if app.listing.can_load_more() {
                text.push_str(", (n) load more");
            }
            if app.listing.source() == DisplaySource::Trending {
                text.push_str(", (w) day/week");
            }
            text.push_str(
                ", (f) genre, (y) year, ([ ]) min, ({ }) max, (c) clear, (v) favorites, (t) theme, (r) reload, (q) quit",
            );
            text
        }
        CurrentScreen::Detail => "(a) favorite, (Esc/b) back, (t) theme, (q) quit".to_string(),
        CurrentScreen::Favorites => {
            "(↑↓/jk) move, (Enter) details, (d) remove, (Esc/b) back, (t) theme, (q) quit"
                .to_string()
        }
        CurrentScreen::Exiting => "(y) to confirm, (n) to cancel".to_string(),
    }
}

/// Renders the footer: the input prompt while typing, otherwise key hints and the
/// latest status message
pub fn render_footer(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let bottom_block = Block::default()
        .borders(Borders::ALL)
        .style(palette.base());

    let first = match app.input_mode {
        InputMode::Search => Line::from(vec![
            Span::styled("Search: ", palette.heading()),
            Span::styled(format!("{}_", app.input), palette.text()),
        ]),
        InputMode::Year => Line::from(vec![
            Span::styled("Year: ", palette.heading()),
            Span::styled(format!("{}_", app.input), palette.text()),
        ]),
        InputMode::Normal => match &app.status_message {
            Some(message) => Line::from(Span::styled(message.clone(), palette.heading())),
            None => Line::from(Span::styled(get_instruction_text(app), palette.muted())),
        },
    };

    let lines = match (app.input_mode, &app.status_message) {
        (InputMode::Normal, None) => vec![first],
        _ => vec![
            first,
            Line::from(Span::styled(get_instruction_text(app), palette.muted())),
        ],
    };

    frame.render_widget(Paragraph::new(lines).block(bottom_block), area);
}
