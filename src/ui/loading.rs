use crate::app::App;
use crate::ui::palette::Palette;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
};
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, WhichUse};

/// Renders a bordered loading panel with an animated spinner and a label
pub fn render_loading(
    frame: &mut Frame,
    app: &mut App,
    palette: &Palette,
    area: Rect,
    label: String,
) {
    let loading_block = Block::default()
        .title("Loading")
        .borders(Borders::ALL)
        .style(palette.base());

    let inner = loading_block.inner(area);
    frame.render_widget(loading_block, area);

    // Keep the spinner on one line near the top of the panel
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let throbber = Throbber::default()
        .label(label)
        .style(palette.text())
        .throbber_style(palette.heading())
        .throbber_set(BRAILLE_SIX)
        .use_type(WhichUse::Spin);

    frame.render_stateful_widget(throbber, rows[1], &mut app.throbber_state);
}
