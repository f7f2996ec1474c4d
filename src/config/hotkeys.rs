//! Hotkey configuration management.
//!
//! This module defines the hotkey system for the application, including action types,
//! hotkey bindings, and default configurations per view.

use crate::state::View;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// Represents all possible actions that can be bound to hotkeys.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyAction {
    // Form view actions
    NextField,
    PreviousField,
    ActivateField,
    SubmitForm,
    DeleteRecord,

    // List view actions
    NextRecord,
    PreviousRecord,
    EditRecord,
    NewForm,
    ShowQr,
    Quit,

    // Shared and modal actions
    Cancel,
    ToggleLog,
    DeleteConfirm,
    CopyPayload,
}

/// Represents a key combination (KeyCode + modifiers).
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Hotkey {
    /// A key pressed on its own.
    ///
    pub fn plain(code: KeyCode) -> Self {
        Hotkey {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }

    /// A character pressed with Ctrl held.
    ///
    pub fn ctrl(c: char) -> Self {
        Hotkey {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }
}

/// Custom serialization for Hotkey.
///
impl Serialize for Hotkey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Hotkey", 3)?;
        state.serialize_field("code", &KeyCodeSerde::from(self.code))?;
        if let KeyCode::Char(c) = self.code {
            state.serialize_field("char", &c)?;
        }
        state.serialize_field("modifiers", &KeyModifiersSerde::from(self.modifiers))?;
        state.end()
    }
}

/// Custom deserialization for Hotkey.
///
impl<'de> Deserialize<'de> for Hotkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct HotkeyHelper {
            code: KeyCodeSerde,
            #[serde(default)]
            char: Option<char>,
            #[serde(default)]
            modifiers: KeyModifiersSerde,
        }

        let helper = HotkeyHelper::deserialize(deserializer)?;
        let code = match helper.code {
            KeyCodeSerde::Char => match helper.char {
                Some(c) => KeyCode::Char(c),
                None => {
                    return Err(serde::de::Error::custom(
                        "Char key code requires 'char' field",
                    ))
                }
            },
            KeyCodeSerde::Esc => KeyCode::Esc,
            KeyCodeSerde::Enter => KeyCode::Enter,
            KeyCodeSerde::Backspace => KeyCode::Backspace,
            KeyCodeSerde::Tab => KeyCode::Tab,
            KeyCodeSerde::BackTab => KeyCode::BackTab,
            KeyCodeSerde::Up => KeyCode::Up,
            KeyCodeSerde::Down => KeyCode::Down,
            KeyCodeSerde::Left => KeyCode::Left,
            KeyCodeSerde::Right => KeyCode::Right,
        };
        Ok(Hotkey {
            code,
            modifiers: helper.modifiers.into(),
        })
    }
}

/// Helper enum for serializing KeyCode.
///
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
enum KeyCodeSerde {
    Char,
    Esc,
    Enter,
    Backspace,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
}

impl From<KeyCode> for KeyCodeSerde {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Esc => KeyCodeSerde::Esc,
            KeyCode::Enter => KeyCodeSerde::Enter,
            KeyCode::Backspace => KeyCodeSerde::Backspace,
            KeyCode::Tab => KeyCodeSerde::Tab,
            KeyCode::BackTab => KeyCodeSerde::BackTab,
            KeyCode::Up => KeyCodeSerde::Up,
            KeyCode::Down => KeyCodeSerde::Down,
            KeyCode::Left => KeyCodeSerde::Left,
            KeyCode::Right => KeyCodeSerde::Right,
            _ => KeyCodeSerde::Char,
        }
    }
}

/// Helper struct for serializing KeyModifiers.
///
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct KeyModifiersSerde {
    #[serde(default)]
    control: bool,
    #[serde(default)]
    shift: bool,
    #[serde(default)]
    alt: bool,
}

impl From<KeyModifiers> for KeyModifiersSerde {
    fn from(modifiers: KeyModifiers) -> Self {
        KeyModifiersSerde {
            control: modifiers.contains(KeyModifiers::CONTROL),
            shift: modifiers.contains(KeyModifiers::SHIFT),
            alt: modifiers.contains(KeyModifiers::ALT),
        }
    }
}

impl From<KeyModifiersSerde> for KeyModifiers {
    fn from(serde: KeyModifiersSerde) -> Self {
        let mut result = KeyModifiers::empty();
        if serde.control {
            result |= KeyModifiers::CONTROL;
        }
        if serde.shift {
            result |= KeyModifiers::SHIFT;
        }
        if serde.alt {
            result |= KeyModifiers::ALT;
        }
        result
    }
}

/// Maps hotkey actions to their key bindings for each view and modal.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewHotkeys {
    #[serde(default = "default_form_hotkeys")]
    pub form: HashMap<HotkeyAction, Hotkey>,
    #[serde(default = "default_list_hotkeys")]
    pub list: HashMap<HotkeyAction, Hotkey>,
    #[serde(default = "default_delete_confirmation_hotkeys")]
    pub delete_confirmation: HashMap<HotkeyAction, Hotkey>,
    #[serde(default = "default_qr_popup_hotkeys")]
    pub qr_popup: HashMap<HotkeyAction, Hotkey>,
}

impl Default for ViewHotkeys {
    fn default() -> Self {
        default_hotkeys()
    }
}

/// Returns default hotkey mappings for all views.
///
pub fn default_hotkeys() -> ViewHotkeys {
    ViewHotkeys {
        form: default_form_hotkeys(),
        list: default_list_hotkeys(),
        delete_confirmation: default_delete_confirmation_hotkeys(),
        qr_popup: default_qr_popup_hotkeys(),
    }
}

// Printable keys are typed into fields while the form is open, so every
// form binding uses a non-printing key or Ctrl.
fn default_form_hotkeys() -> HashMap<HotkeyAction, Hotkey> {
    let mut form = HashMap::new();
    form.insert(HotkeyAction::NextField, Hotkey::plain(KeyCode::Down));
    form.insert(HotkeyAction::PreviousField, Hotkey::plain(KeyCode::Up));
    form.insert(HotkeyAction::ActivateField, Hotkey::plain(KeyCode::Enter));
    form.insert(HotkeyAction::SubmitForm, Hotkey::ctrl('s'));
    form.insert(HotkeyAction::DeleteRecord, Hotkey::ctrl('d'));
    form.insert(HotkeyAction::ToggleLog, Hotkey::ctrl('l'));
    form.insert(HotkeyAction::Cancel, Hotkey::plain(KeyCode::Esc));
    form
}

fn default_list_hotkeys() -> HashMap<HotkeyAction, Hotkey> {
    let mut list = HashMap::new();
    list.insert(HotkeyAction::NextRecord, Hotkey::plain(KeyCode::Char('j')));
    list.insert(HotkeyAction::PreviousRecord, Hotkey::plain(KeyCode::Char('k')));
    list.insert(HotkeyAction::EditRecord, Hotkey::plain(KeyCode::Enter));
    list.insert(HotkeyAction::NewForm, Hotkey::plain(KeyCode::Char('n')));
    list.insert(HotkeyAction::ShowQr, Hotkey::plain(KeyCode::Char('e')));
    list.insert(HotkeyAction::ToggleLog, Hotkey::plain(KeyCode::Char('l')));
    list.insert(HotkeyAction::Quit, Hotkey::plain(KeyCode::Char('q')));
    list
}

fn default_delete_confirmation_hotkeys() -> HashMap<HotkeyAction, Hotkey> {
    let mut delete_confirmation = HashMap::new();
    delete_confirmation.insert(HotkeyAction::DeleteConfirm, Hotkey::plain(KeyCode::Char('y')));
    delete_confirmation.insert(HotkeyAction::Cancel, Hotkey::plain(KeyCode::Char('n')));
    delete_confirmation
}

fn default_qr_popup_hotkeys() -> HashMap<HotkeyAction, Hotkey> {
    let mut qr_popup = HashMap::new();
    qr_popup.insert(HotkeyAction::CopyPayload, Hotkey::plain(KeyCode::Char('y')));
    qr_popup.insert(HotkeyAction::Cancel, Hotkey::plain(KeyCode::Esc));
    qr_popup
}

/// Checks if a KeyEvent matches a Hotkey.
///
pub fn matches_hotkey(event: &KeyEvent, hotkey: &Hotkey) -> bool {
    event.code == hotkey.code && event.modifiers == hotkey.modifiers
}

fn find_action(
    event: &KeyEvent,
    bindings: &HashMap<HotkeyAction, Hotkey>,
) -> Option<HotkeyAction> {
    bindings
        .iter()
        .find(|(_, hotkey)| matches_hotkey(event, hotkey))
        .map(|(action, _)| *action)
}

/// Gets the action for a KeyEvent in a specific view. The loading view has
/// no bindings.
///
pub fn get_action_for_event(
    event: &KeyEvent,
    view: &View,
    hotkeys: &ViewHotkeys,
) -> Option<HotkeyAction> {
    match view {
        View::Loading => None,
        View::Form => find_action(event, &hotkeys.form),
        View::List => find_action(event, &hotkeys.list),
    }
}

/// Gets the action for a KeyEvent in a special mode.
///
pub fn get_action_for_special_mode(
    event: &KeyEvent,
    mode: SpecialMode,
    hotkeys: &ViewHotkeys,
) -> Option<HotkeyAction> {
    match mode {
        SpecialMode::DeleteConfirmation => find_action(event, &hotkeys.delete_confirmation),
        SpecialMode::QrPopup => find_action(event, &hotkeys.qr_popup),
    }
}

/// Represents special modes that have their own hotkey configurations.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialMode {
    DeleteConfirmation,
    QrPopup,
}

/// Builds a footer text string from hotkey configurations.
/// Takes a list of tuples: (action, description, optional_second_action_for_paired_keys)
///
pub fn build_footer_text(
    hotkeys: &HashMap<HotkeyAction, Hotkey>,
    actions: &[(HotkeyAction, &str, Option<HotkeyAction>)],
) -> String {
    let parts: Vec<String> = actions
        .iter()
        .filter_map(|(action, description, paired_action)| {
            let hotkey = hotkeys.get(action)?;
            let paired = paired_action.as_ref().and_then(|paired| hotkeys.get(paired));
            Some(match paired {
                Some(paired_hotkey) => format!(
                    " {}/{}: {}",
                    format_hotkey_display(hotkey),
                    format_hotkey_display(paired_hotkey),
                    description
                ),
                None => format!(" {}: {}", format_hotkey_display(hotkey), description),
            })
        })
        .collect();
    parts.join(",")
}

/// Formats a hotkey for display in the footer.
///
pub fn format_hotkey_display(hotkey: &Hotkey) -> String {
    let mut parts = Vec::new();
    if hotkey.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if hotkey.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }
    if hotkey.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }

    let key_str = match &hotkey.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        _ => "Unknown".to_string(),
    };

    if parts.is_empty() {
        key_str
    } else {
        format!("{}+{}", parts.join("+"), key_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn test_matches_hotkey() {
        let hotkey = Hotkey::ctrl('s');
        assert!(matches_hotkey(
            &press(KeyCode::Char('s'), KeyModifiers::CONTROL),
            &hotkey
        ));
        assert!(!matches_hotkey(
            &press(KeyCode::Char('s'), KeyModifiers::empty()),
            &hotkey
        ));
    }

    #[test]
    fn test_get_action_for_event() {
        let hotkeys = default_hotkeys();
        let enter = press(KeyCode::Enter, KeyModifiers::empty());
        assert_eq!(
            get_action_for_event(&enter, &View::Form, &hotkeys),
            Some(HotkeyAction::ActivateField)
        );
        assert_eq!(
            get_action_for_event(&enter, &View::List, &hotkeys),
            Some(HotkeyAction::EditRecord)
        );
        assert_eq!(get_action_for_event(&enter, &View::Loading, &hotkeys), None);
    }

    #[test]
    fn test_form_has_no_printable_bindings() {
        let hotkeys = default_hotkeys();
        for hotkey in hotkeys.form.values() {
            let printable = matches!(hotkey.code, KeyCode::Char(_))
                && !hotkey.modifiers.contains(KeyModifiers::CONTROL);
            assert!(!printable, "{:?} would swallow typed text", hotkey);
        }
    }

    #[test]
    fn test_get_action_for_special_mode() {
        let hotkeys = default_hotkeys();
        let y = press(KeyCode::Char('y'), KeyModifiers::empty());
        assert_eq!(
            get_action_for_special_mode(&y, SpecialMode::DeleteConfirmation, &hotkeys),
            Some(HotkeyAction::DeleteConfirm)
        );
        assert_eq!(
            get_action_for_special_mode(&y, SpecialMode::QrPopup, &hotkeys),
            Some(HotkeyAction::CopyPayload)
        );
    }

    #[test]
    fn test_hotkey_serialization() {
        for hotkey in [Hotkey::plain(KeyCode::Char('j')), Hotkey::ctrl('s'), Hotkey::plain(KeyCode::Tab)] {
            let serialized = serde_yaml::to_string(&hotkey).unwrap();
            let deserialized: Hotkey = serde_yaml::from_str(&serialized).unwrap();
            assert_eq!(hotkey, deserialized);
        }
    }

    #[test]
    fn test_view_hotkeys_round_trip_and_defaults() {
        let hotkeys = default_hotkeys();
        let serialized = serde_yaml::to_string(&hotkeys).unwrap();
        let deserialized: ViewHotkeys = serde_yaml::from_str(&serialized).unwrap();
        assert_eq!(hotkeys, deserialized);

        let partial: ViewHotkeys = serde_yaml::from_str("list: {}").unwrap();
        assert!(partial.list.is_empty());
        assert_eq!(partial.form, default_form_hotkeys());
    }

    #[test]
    fn test_footer_text() {
        let hotkeys = default_hotkeys();
        let text = build_footer_text(
            &hotkeys.list,
            &[
                (HotkeyAction::NextRecord, "Move", Some(HotkeyAction::PreviousRecord)),
                (HotkeyAction::ShowQr, "QR", None),
            ],
        );
        assert_eq!(text, " j/k: Move, e: QR");
        assert_eq!(format_hotkey_display(&Hotkey::ctrl('s')), "Ctrl+s");
    }
}
