use super::Frame;
use crate::config::{build_footer_text, HotkeyAction};
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the dialog asking whether the open form should be deleted.
///
pub fn delete_confirmation(frame: &mut Frame, size: Rect, state: &State) {
    let popup_area = centered_rect(60, 30, size);
    frame.render_widget(Clear, popup_area);

    let theme = state.get_theme();
    let keys = build_footer_text(
        &state.get_hotkeys().delete_confirmation,
        &[
            (HotkeyAction::DeleteConfirm, "delete", None),
            (HotkeyAction::Cancel, "cancel", None),
        ],
    );
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Are you sure you want to delete this form?",
            Style::default()
                .fg(theme.text.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This action cannot be undone.",
            Style::default()
                .fg(theme.warning.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            keys.trim().to_string(),
            styling::muted_text_style(theme),
        )),
    ];

    let error_style = Style::default()
        .fg(theme.error.to_color())
        .add_modifier(Modifier::BOLD);
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled("Confirm Deletion", error_style))
                .border_style(error_style),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

/// Render the QR code of the selected record, dark modules on a light
/// background so phone cameras can read it. A code that does not fit the
/// terminal is replaced by a message naming the size it needs.
///
pub fn qr_popup(frame: &mut Frame, size: Rect, state: &State) {
    let popup = match state.qr_popup() {
        Some(popup) => popup,
        None => return,
    };
    let theme = state.get_theme();
    let keys = build_footer_text(
        &state.get_hotkeys().qr_popup,
        &[
            (HotkeyAction::CopyPayload, "copy data", None),
            (HotkeyAction::Cancel, "close", None),
        ],
    );
    let code_lines = popup.image.lines();
    let (wanted_width, wanted_height) = qr_popup_size(&code_lines, &popup.title);
    if wanted_width > usize::from(size.width) || wanted_height > usize::from(size.height) {
        qr_too_small(frame, size, state, (wanted_width, wanted_height), &keys);
        return;
    }

    let popup_area = centered_fixed(wanted_width as u16, wanted_height as u16, size);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            popup.title.clone(),
            styling::active_block_title_style(),
        ))
        .border_style(styling::active_block_border_style(theme));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let code_style = Style::default().fg(Color::Black).bg(Color::White);
    let code: Vec<Line> = code_lines
        .into_iter()
        .map(|line| Line::from(Span::styled(line, code_style)))
        .collect();
    frame.render_widget(Paragraph::new(code).alignment(Alignment::Center), rows[0]);

    frame.render_widget(
        Paragraph::new(Span::styled(
            keys.trim().to_string(),
            styling::muted_text_style(theme),
        ))
        .alignment(Alignment::Center),
        rows[1],
    );
}

/// Columns and rows the QR popup needs: borders, the hint line and one
/// blank row around the code.
///
fn qr_popup_size(code_lines: &[String], title: &str) -> (usize, usize) {
    let code_width = code_lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let width = (code_width + 4).max(title.chars().count() + 4);
    (width, code_lines.len() + 5)
}

fn qr_too_small(
    frame: &mut Frame,
    size: Rect,
    state: &State,
    (needed_width, needed_height): (usize, usize),
    keys: &str,
) {
    let popup = match state.qr_popup() {
        Some(popup) => popup,
        None => return,
    };
    let theme = state.get_theme();
    let width = size.width.min(60);
    let height = size.height.min(10);
    let popup_area = centered_fixed(width, height, size);
    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(Span::styled(
            "Terminal too small for this QR code",
            Style::default()
                .fg(theme.warning.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Needs {}x{}, have {}x{}",
            needed_width, needed_height, size.width, size.height
        )),
        Line::from(""),
        Line::from("Enlarge the window or run"),
        Line::from(Span::styled(
            format!("frc-scout export {}", popup.record_id),
            styling::active_block_title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            keys.trim().to_string(),
            styling::muted_text_style(theme),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    popup.title.clone(),
                    styling::active_block_title_style(),
                ))
                .border_style(styling::active_block_border_style(theme)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

/// Return a rectangle of the given size centered in `r`, shrunk to fit.
///
fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

/// Return a rectangle centered in `r` covering the given percentages.
///
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
