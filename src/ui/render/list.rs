use super::Frame;
use crate::config::{format_hotkey_display, Hotkey, HotkeyAction};
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use std::collections::HashMap;

/// Hint shown under each record, naming the key bound to open it.
///
fn edit_hint(hotkeys: &HashMap<HotkeyAction, Hotkey>) -> String {
    match hotkeys.get(&HotkeyAction::EditRecord) {
        Some(hotkey) => format!("{} to View/Edit", format_hotkey_display(hotkey)),
        None => "View/Edit".to_string(),
    }
}

/// Render the list of submitted forms.
///
pub fn list(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!("Submitted Forms ({})", state.records().len()),
            styling::active_block_title_style(),
        ))
        .border_style(styling::active_block_border_style(&theme));

    if state.records().is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No forms submitted yet. Go fill one out!",
                styling::muted_text_style(&theme),
            )),
        ])
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(empty, size);
        return;
    }

    let hint = edit_hint(&state.get_hotkeys().list);
    let schema = state.schema();
    let items: Vec<ListItem> = state
        .records()
        .iter()
        .map(|record| {
            let mut lines = vec![Line::from(Span::styled(
                format!("Team: {}", schema.summary_title(record)),
                styling::label_style(&theme),
            ))];
            if let Some((label, value)) = schema.summary_detail(record) {
                lines.push(Line::from(Span::styled(
                    format!("{}: {}", label, value),
                    styling::normal_text_style(&theme),
                )));
            }
            lines.push(Line::from(Span::styled(
                hint.clone(),
                styling::muted_text_style(&theme),
            )));
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(styling::highlighted_item_style(&theme))
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, size, state.get_records_list_state());
}
