use crate::app::{App, CurrentScreen};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::favorites::render_favorites;
use super::footer::render_footer;
use super::header::render_header;
use super::main_content::render_main_content;
use super::movie_detail::render_movie_detail;
use super::palette::Palette;

/// Main UI rendering function that orchestrates all UI components
pub fn ui(frame: &mut Frame, app: &mut App) {
    let palette = Palette::for_mode(app.theme.current());
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    // Create the main layout: header, content area, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(4), // Footer
        ])
        .split(frame.area());

    render_header(frame, app, &palette, chunks[0]);

    // The exit prompt is drawn over whatever screen it was raised from
    let screen = match app.current_screen {
        CurrentScreen::Exiting => app.exit_return,
        screen => screen,
    };
    match screen {
        CurrentScreen::Detail => render_movie_detail(frame, app, &palette, chunks[1]),
        CurrentScreen::Favorites => render_favorites(frame, app, &palette, chunks[1]),
        _ => render_main_content(frame, app, &palette, chunks[1]),
    }

    render_footer(frame, app, &palette, chunks[2]);

    if app.current_screen == CurrentScreen::Exiting {
        render_exit_popup(frame, &palette);
    }
}

fn render_exit_popup(frame: &mut Frame, palette: &Palette) {
    let area = centered_rect(frame.area(), 40, 5);
    let popup = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Quit? ", palette.heading()),
            Span::styled("(y) yes  (n) no", palette.text()),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title("Exit")
            .borders(Borders::ALL)
            .style(palette.base()),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
