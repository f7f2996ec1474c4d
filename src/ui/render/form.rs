use super::Frame;
use crate::config::{format_hotkey_display, HotkeyAction};
use crate::schema::FieldKind;
use crate::state::{FieldEntry, SessionMode, State};
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the scouting form.
///
pub fn form(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let session = state.session();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(1),    // Fields
            Constraint::Length(3), // Actions
        ])
        .split(size);

    let title_block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("FRC Scouting Form", styling::banner_style(theme)))
        .border_style(styling::normal_block_border_style(theme));
    let title = Paragraph::new(Span::styled(
        session.title(),
        styling::active_block_title_style(),
    ))
    .block(title_block)
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let mut lines = Vec::new();
    let mut focused_line = 0;
    for section in session.sections() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            section.title.to_string(),
            styling::label_style(theme),
        )));
        for entry in &section.fields {
            if entry.focused {
                focused_line = lines.len();
            }
            field_lines(&mut lines, entry, theme);
        }
    }

    let fields_block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme));
    let visible = fields_block.inner(chunks[1]).height as usize;
    // Keep the focused field and the line below it in view.
    let scroll = (focused_line + 2).saturating_sub(visible);
    let fields = Paragraph::new(lines)
        .block(fields_block)
        .scroll((scroll.try_into().unwrap_or(u16::MAX), 0));
    frame.render_widget(fields, chunks[1]);

    frame.render_widget(actions(state, theme), chunks[2]);
}

fn field_lines(lines: &mut Vec<Line<'static>>, entry: &FieldEntry, theme: &Theme) {
    let marker = if entry.focused { "▶ " } else { "  " };
    let label_style = if entry.focused {
        styling::highlighted_item_style(theme)
    } else {
        styling::normal_text_style(theme)
    };
    match (&entry.definition.kind, entry.value) {
        (FieldKind::Boolean, value) => {
            let checked = value.as_flag().unwrap_or(false);
            let check_style = if checked {
                Style::default().fg(theme.success.to_color())
            } else {
                styling::muted_text_style(theme)
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(if checked { "[x] " } else { "[ ] " }, check_style),
                Span::styled(entry.definition.label.clone(), label_style),
            ]));
        }
        (FieldKind::Text { placeholder, .. }, value) => {
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(entry.definition.label.clone(), label_style),
            ]));
            let text = value.as_text().unwrap_or_default();
            let mut input = vec![Span::raw("    ")];
            if text.is_empty() {
                if let Some(placeholder) = placeholder {
                    input.push(Span::styled(
                        placeholder.clone(),
                        styling::muted_text_style(theme),
                    ));
                }
            } else {
                input.push(Span::styled(
                    text.to_string(),
                    styling::normal_text_style(theme),
                ));
            }
            if entry.focused {
                input.push(Span::styled("▏", styling::banner_style(theme)));
            }
            lines.push(Line::from(input));
            if entry.focused {
                lines.push(Line::from(Span::styled(
                    format!(
                        "    Current {}: {}",
                        entry.definition.short_label(),
                        value.display()
                    ),
                    styling::muted_text_style(theme),
                )));
            }
        }
    }
}

fn actions(state: &State, theme: &Theme) -> Paragraph<'static> {
    let session = state.session();
    let form_keys = &state.get_hotkeys().form;
    let key_for = |action: HotkeyAction| {
        form_keys
            .get(&action)
            .map(format_hotkey_display)
            .unwrap_or_default()
    };

    let mut spans = vec![Span::styled(
        format!(
            "[ {} ] {}",
            session.submit_label(),
            key_for(HotkeyAction::SubmitForm)
        ),
        styling::button_style(theme.success.to_color()),
    )];
    if session.mode() == SessionMode::Editing {
        spans.push(Span::raw("    "));
        spans.push(Span::styled(
            format!("[ Delete ] {}", key_for(HotkeyAction::DeleteRecord)),
            styling::button_style(theme.error.to_color()),
        ));
        spans.push(Span::raw("    "));
        spans.push(Span::styled(
            format!("[ Cancel ] {}", key_for(HotkeyAction::Cancel)),
            styling::muted_text_style(theme),
        ));
    }

    Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::normal_block_border_style(theme)),
        )
        .alignment(Alignment::Center)
}
