use super::Frame;
use crate::config::{build_footer_text, HotkeyAction};
use crate::state::{SessionMode, State, View};
use crate::ui::ColorSpec;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Return the footer mode label, its color, and the hotkey hints for what
/// currently has the keyboard.
///
fn controls(state: &State) -> (&'static str, ColorSpec, String) {
    let hotkeys = state.get_hotkeys();
    let theme = state.get_theme();
    if state.qr_popup().is_some() {
        return (
            "QR:",
            theme.footer_qr,
            build_footer_text(
                &hotkeys.qr_popup,
                &[
                    (HotkeyAction::CopyPayload, "copy data", None),
                    (HotkeyAction::Cancel, "close", None),
                ],
            ),
        );
    }
    if state.has_delete_confirmation() {
        return (
            "DELETE:",
            theme.footer_delete,
            build_footer_text(
                &hotkeys.delete_confirmation,
                &[
                    (HotkeyAction::DeleteConfirm, "confirm delete", None),
                    (HotkeyAction::Cancel, "cancel", None),
                ],
            ),
        );
    }
    match state.current_view() {
        View::Loading => (
            "LOADING:",
            theme.footer_list,
            build_footer_text(&hotkeys.list, &[(HotkeyAction::Quit, "quit", None)]),
        ),
        View::Form => {
            let back = match state.session().mode() {
                SessionMode::New => "list",
                SessionMode::Editing => "cancel",
            };
            let mut actions = vec![
                (
                    HotkeyAction::NextField,
                    "navigate fields",
                    Some(HotkeyAction::PreviousField),
                ),
                (HotkeyAction::ActivateField, "toggle/next", None),
                (
                    HotkeyAction::SubmitForm,
                    state.session().submit_label(),
                    None,
                ),
            ];
            if state.session().mode() == SessionMode::Editing {
                actions.push((HotkeyAction::DeleteRecord, "delete", None));
            }
            actions.push((HotkeyAction::ToggleLog, "log", None));
            actions.push((HotkeyAction::Cancel, back, None));
            (
                "FORM:",
                theme.footer_form,
                build_footer_text(&hotkeys.form, &actions),
            )
        }
        View::List => (
            "LIST:",
            theme.footer_list,
            build_footer_text(
                &hotkeys.list,
                &[
                    (
                        HotkeyAction::NextRecord,
                        "navigate",
                        Some(HotkeyAction::PreviousRecord),
                    ),
                    (HotkeyAction::EditRecord, "view/edit", None),
                    (HotkeyAction::ShowQr, "QR code", None),
                    (HotkeyAction::NewForm, "new form", None),
                    (HotkeyAction::ToggleLog, "log", None),
                    (HotkeyAction::Quit, "quit", None),
                ],
            ),
        ),
    }
}

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let (mode, mode_color, controls_text) = controls(state);
    let controls_content = Line::from(vec![
        Span::styled(
            mode,
            Style::default()
                .fg(theme.text.to_color())
                .bg(mode_color.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(controls_text, Style::default().fg(theme.warning.to_color())),
    ]);
    let controls_widget = Paragraph::new(controls_content).alignment(Alignment::Left);

    // Latest status message, otherwise the version number.
    let right_content = match state.status_message() {
        Some(message) => Line::from(Span::styled(
            format!(" {} ", message),
            Style::default()
                .fg(theme.success.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            format!(" {}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.secondary.to_color()),
        )),
    };
    let right_content_width = right_content.width();
    let right_widget = Paragraph::new(right_content).alignment(Alignment::Right);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(right_content_width.try_into().unwrap_or(0)),
        ])
        .split(size);

    frame.render_widget(controls_widget, columns[0]);
    frame.render_widget(right_widget, columns[1]);
}
