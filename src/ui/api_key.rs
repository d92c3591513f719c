use crate::app::config::API_KEY_VAR;
use crate::ui::palette::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_big_text::{BigText, PixelSize};

/// Renders missing API key error with big text
pub fn render_missing_api_key(frame: &mut Frame, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Big text
            Constraint::Min(5),    // Instructions
        ])
        .split(area);

    let big_text = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(palette.error).add_modifier(Modifier::BOLD))
        .lines(vec!["API KEY".into(), "REQUIRED!".into()])
        .alignment(Alignment::Center)
        .build();

    frame.render_widget(big_text, chunks[0]);

    let instructions = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Please set your TMDB API key to browse movies",
            Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "1. Get a free key at: https://www.themoviedb.org/settings/api",
            palette.text(),
        )),
        Line::from(Span::styled(
            format!(
                "2. Set it in the environment or a .env file: {}=your_key_here",
                API_KEY_VAR
            ),
            palette.text(),
        )),
        Line::from(Span::styled("3. Restart the application", palette.text())),
        Line::from(""),
        Line::from(Span::styled(
            "Favorites still work offline: press (v)",
            palette.muted(),
        )),
    ];

    let instructions_block = Block::default()
        .borders(Borders::ALL)
        .style(palette.base());

    let instructions_paragraph = Paragraph::new(instructions)
        .block(instructions_block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(instructions_paragraph, chunks[1]);
}
