use super::Frame;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the placeholder shown until saved records have been read.
///
pub fn loading(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            "FRC Scouting Form",
            styling::active_block_title_style(),
        ))
        .border_style(styling::normal_block_border_style(theme));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let text = Line::from(vec![
        Span::styled(
            spinner::frame(state.get_spinner_index()),
            styling::banner_style(theme),
        ),
        Span::styled(
            " Loading your scouting data...",
            styling::normal_text_style(theme),
        ),
    ]);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), rows[1]);
}
