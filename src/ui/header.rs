use crate::app::{App, CurrentScreen};
use crate::ui::palette::Palette;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the title bar with the screen tabs and the current theme
pub fn render_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let title_block = Block::default()
        .borders(Borders::ALL)
        .style(palette.base());

    let active = match app.current_screen {
        CurrentScreen::Exiting => app.exit_return,
        CurrentScreen::Detail => app.detail_return,
        screen => screen,
    };

    let tab = |label: String, screen: CurrentScreen| {
        if active == screen {
            Span::styled(format!(" {} ", label), palette.highlight())
        } else {
            Span::styled(format!(" {} ", label), palette.muted())
        }
    };

    let line = Line::from(vec![
        Span::styled("Movie Explorer", palette.heading()),
        Span::raw("  "),
        tab("Home".to_string(), CurrentScreen::Listing),
        tab(
            format!("Favorites ({})", app.favorites.len()),
            CurrentScreen::Favorites,
        ),
        Span::raw("  "),
        Span::styled(format!("[{} mode]", app.theme.current()), palette.muted()),
    ]);

    frame.render_widget(Paragraph::new(line).block(title_block), area);
}
