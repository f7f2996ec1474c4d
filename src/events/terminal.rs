use crate::config::{
    get_action_for_event, get_action_for_special_mode, matches_hotkey, HotkeyAction, SpecialMode,
};
use crate::state::{SessionMode, State, View};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => {
                        if let Ok(CrosstermEvent::Key(key)) = event::read() {
                            if tx_clone.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(e) => {
                        error!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(event) => Ok(handle_key(state, event)),
            Event::Tick => {
                state.advance_spinner_index();
                Ok(true)
            }
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

/// Apply one key press to the state. Returns false if exit was requested.
///
pub fn handle_key(state: &mut State, event: KeyEvent) -> bool {
    if event.kind != KeyEventKind::Press {
        return true;
    }
    if event.code == KeyCode::Char('c') && event.modifiers == KeyModifiers::CONTROL {
        debug!("Processing exit terminal event '{:?}'...", event);
        return false;
    }

    if state.is_loading() {
        let quit = state
            .get_hotkeys()
            .list
            .get(&HotkeyAction::Quit)
            .map_or(false, |hotkey| matches_hotkey(&event, hotkey));
        return !quit;
    }

    if state.qr_popup().is_some() {
        handle_qr_popup(state, &event);
        return true;
    }

    if state.has_delete_confirmation() {
        handle_delete_confirmation(state, &event);
        return true;
    }

    match state.current_view() {
        View::Loading => true,
        View::Form => {
            handle_form(state, &event);
            true
        }
        View::List => handle_list(state, &event),
    }
}

fn handle_qr_popup(state: &mut State, event: &KeyEvent) {
    let action = get_action_for_special_mode(event, SpecialMode::QrPopup, state.get_hotkeys());
    match action {
        Some(HotkeyAction::CopyPayload) => {
            debug!("Processing copy payload event '{:?}'...", event);
            state.copy_qr_payload();
        }
        Some(HotkeyAction::Cancel) => {
            state.hide_qr();
        }
        _ if event.code == KeyCode::Esc => {
            state.hide_qr();
        }
        _ => {}
    }
}

fn handle_delete_confirmation(state: &mut State, event: &KeyEvent) {
    let action =
        get_action_for_special_mode(event, SpecialMode::DeleteConfirmation, state.get_hotkeys());
    match (action, event.code) {
        (Some(HotkeyAction::DeleteConfirm), _) | (None, KeyCode::Enter) => {
            debug!("Processing confirm delete event '{:?}'...", event);
            state.delete_confirmed();
        }
        (Some(HotkeyAction::Cancel), _) | (None, KeyCode::Esc) => {
            debug!("Processing cancel delete confirmation event '{:?}'...", event);
            state.delete_cancelled();
        }
        _ => {}
    }
}

fn handle_form(state: &mut State, event: &KeyEvent) {
    match get_action_for_event(event, &View::Form, state.get_hotkeys()) {
        Some(HotkeyAction::NextField) => {
            state.form_next_field();
        }
        Some(HotkeyAction::PreviousField) => {
            state.form_previous_field();
        }
        Some(HotkeyAction::ActivateField) => {
            state.form_activate_field();
        }
        Some(HotkeyAction::SubmitForm) => {
            debug!("Processing submit form event '{:?}'...", event);
            state.submit_form();
        }
        Some(HotkeyAction::DeleteRecord) => {
            debug!("Processing delete form event '{:?}'...", event);
            state.confirm_delete();
        }
        Some(HotkeyAction::ToggleLog) => {
            state.toggle_log_panel();
        }
        Some(HotkeyAction::Cancel) => match state.session().mode() {
            SessionMode::Editing => {
                state.cancel_edit();
            }
            SessionMode::New => {
                state.go_to_list();
            }
        },
        Some(_) => {}
        None => match event.code {
            KeyCode::Tab => {
                state.form_next_field();
            }
            KeyCode::BackTab => {
                state.form_previous_field();
            }
            KeyCode::Backspace => {
                state.form_backspace();
            }
            KeyCode::Char(c)
                if event.modifiers == KeyModifiers::NONE
                    || event.modifiers == KeyModifiers::SHIFT =>
            {
                state.form_input_char(c);
            }
            _ => {}
        },
    }
}

fn handle_list(state: &mut State, event: &KeyEvent) -> bool {
    match get_action_for_event(event, &View::List, state.get_hotkeys()) {
        Some(HotkeyAction::NextRecord) => {
            state.next_record();
        }
        Some(HotkeyAction::PreviousRecord) => {
            state.previous_record();
        }
        Some(HotkeyAction::EditRecord) => {
            debug!("Processing edit form event '{:?}'...", event);
            state.edit_selected_record();
        }
        Some(HotkeyAction::NewForm) => {
            state.go_to_form();
        }
        Some(HotkeyAction::ShowQr) => {
            debug!("Processing show QR event '{:?}'...", event);
            state.show_qr_for_selected();
        }
        Some(HotkeyAction::ToggleLog) => {
            state.toggle_log_panel();
        }
        Some(HotkeyAction::Quit) => {
            debug!("Processing exit terminal event '{:?}'...", event);
            return false;
        }
        Some(_) => {}
        None => match event.code {
            KeyCode::Down => {
                state.next_record();
            }
            KeyCode::Up => {
                state.previous_record();
            }
            _ => {}
        },
    }
    true
}
