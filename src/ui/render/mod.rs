mod footer;
mod form;
mod list;
mod loading;
mod log_panel;
mod modals;

use super::Frame;
use crate::state::{State, View};
use footer::footer;
use form::form;
use list::list;
use loading::loading;
use log_panel::log_panel;
use ratatui::layout::{Constraint, Direction, Layout};

/// Height of the log panel when it is open.
///
const LOG_PANEL_HEIGHT: u16 = 10;

/// Render the whole screen according to state.
///
pub fn render(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    let constraints = if state.is_log_panel_open() {
        vec![
            Constraint::Min(1),
            Constraint::Length(LOG_PANEL_HEIGHT),
            Constraint::Length(1),
        ]
    } else {
        vec![Constraint::Min(1), Constraint::Length(1)]
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    match state.current_view() {
        View::Loading => loading(frame, rows[0], state),
        View::Form => form(frame, rows[0], state),
        View::List => list(frame, rows[0], state),
    }

    if state.is_log_panel_open() {
        log_panel(frame, rows[1], state);
    }
    footer(frame, rows[rows.len() - 1], state);

    // Popups go on top of everything.
    if state.has_delete_confirmation() {
        modals::delete_confirmation(frame, size, state);
    }
    if state.qr_popup().is_some() {
        modals::qr_popup(frame, size, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSchema;
    use crate::store::{FieldValue, RecordList};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn draw(state: &mut State, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    fn loaded_state() -> State {
        let mut state = State::detached(Arc::new(FieldSchema::season_2025().unwrap()));
        state.set_records_loaded(RecordList::new());
        state
    }

    #[test]
    fn loading_screen_shows_message() {
        let mut state = State::detached(Arc::new(FieldSchema::season_2025().unwrap()));
        let screen = draw(&mut state, 80, 20);
        assert!(screen.contains("Loading your scouting data..."));
    }

    #[test]
    fn form_shows_title_and_first_section() {
        let mut state = loaded_state();
        let screen = draw(&mut state, 80, 30);
        assert!(screen.contains("FRC Scouting Form"));
        assert!(screen.contains("New Form Entry"));
        assert!(screen.contains("Team Information"));
    }

    #[test]
    fn empty_list_prompts_for_a_form() {
        let mut state = loaded_state();
        state.go_to_list();
        let screen = draw(&mut state, 80, 20);
        assert!(screen.contains("No forms submitted yet. Go fill one out!"));
    }

    #[test]
    fn list_shows_saved_team() {
        let mut state = loaded_state();
        state
            .form_set_value("teamNumber", FieldValue::Text("1678".into()))
            .unwrap();
        state.submit_form();
        let screen = draw(&mut state, 80, 20);
        assert!(screen.contains("Team: 1678"));
        assert!(screen.contains("Enter to View/Edit"));
    }

    #[test]
    fn delete_confirmation_is_drawn_over_the_form() {
        let mut state = loaded_state();
        state
            .form_set_value("teamNumber", FieldValue::Text("33".into()))
            .unwrap();
        state.submit_form();
        state.edit_selected_record();
        state.confirm_delete();
        let screen = draw(&mut state, 100, 30);
        assert!(screen.contains("Confirm Deletion"));
        assert!(screen.contains("Are you sure you want to delete this form?"));
    }

    fn state_with_qr_popup(team: &str) -> State {
        let mut state = loaded_state();
        state
            .form_set_value("teamNumber", FieldValue::Text(team.into()))
            .unwrap();
        state.submit_form();
        state.show_qr_for_selected();
        assert!(state.qr_popup().is_some());
        state
    }

    #[test]
    fn qr_popup_draws_the_whole_code_when_it_fits() {
        let mut state = state_with_qr_popup("254");
        let lines = state.qr_popup().unwrap().image.lines();
        let screen = draw(&mut state, 200, 80);
        assert!(screen.contains("QR Code for Team: 254"));
        assert!(!screen.contains("Terminal too small"));
        for line in &lines {
            assert!(screen.contains(line.as_str()));
        }
    }

    #[test]
    fn qr_popup_asks_for_a_bigger_terminal() {
        let mut state = state_with_qr_popup("254");
        let id = state.qr_popup().unwrap().record_id.clone();
        let screen = draw(&mut state, 80, 24);
        assert!(screen.contains("Terminal too small for this QR code"));
        assert!(screen.contains("have 80x24"));
        assert!(screen.contains(&format!("frc-scout export {}", id)));
    }

    #[test]
    fn log_panel_takes_its_own_row() {
        let mut state = loaded_state();
        state.toggle_log_panel();
        let screen = draw(&mut state, 80, 30);
        assert!(screen.contains("Log"));
    }
}
