//! Keyboard handling for the file manager
//!
//! Maps key events to session actions in normal mode and drives the
//! prompt and confirmation dialogs.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    App, UIMode,
    dialog::{DialogResult, TextInput, handle_text_input, handle_yes_no_keys},
    ops::PendingDelete,
    session::{Action, Outcome, failure},
};

/// Key bindings shown in the help bar and the help overlay
pub const KEY_HELP: &[(&str, &str)] = &[
    ("↑↓/jk", "Move"),
    ("PgUp/PgDn", "Page"),
    ("Home/End", "First/last"),
    ("Tab/←→", "Switch pane"),
    ("Enter", "Open"),
    ("Bksp", "Parent dir"),
    ("F1/?", "Help"),
    ("F3", "View"),
    ("F4/e", "Edit"),
    ("F5/c", "Copy"),
    ("x", "Cut"),
    ("F6/r", "Rename"),
    ("F7", "Mkdir"),
    ("F8/Del", "Delete"),
    ("F9/H", "Hidden"),
    ("F10/q", "Quit"),
    ("F12/p", "Paste"),
];

/// Key presses only, releases and repeats are dropped
pub fn key_press(event: Event) -> Option<KeyEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
        _ => None,
    }
}

/// Normal-mode key binding table
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => Action::SwitchPane,
        KeyCode::Enter => Action::Activate,
        KeyCode::Backspace => Action::GoParent,
        KeyCode::F(1) | KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::F(3) => Action::View,
        KeyCode::F(4) | KeyCode::Char('e') => Action::Edit,
        KeyCode::F(5) | KeyCode::Char('c') => Action::MarkCopy,
        KeyCode::Char('x') => Action::MarkCut,
        KeyCode::F(6) | KeyCode::Char('r') => Action::Rename,
        KeyCode::F(7) => Action::MakeDirectory,
        KeyCode::F(8) | KeyCode::Delete => Action::Delete,
        KeyCode::F(9) | KeyCode::Char('H') => Action::ToggleHidden,
        KeyCode::F(10) | KeyCode::Char('q') => Action::Quit,
        KeyCode::F(12) | KeyCode::Char('p') => Action::Paste,
        _ => return None,
    };
    Some(action)
}

impl App {
    /// Main event handler - dispatches to mode-specific handlers
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // Any key press dismisses the previous message
        self.status = None;

        match std::mem::take(&mut self.ui_mode) {
            UIMode::Normal => {
                if let Some(action) = action_for(key) {
                    let outcome = self.session.dispatch(action);
                    self.apply_outcome(outcome);
                }
            }
            // Any key closes the help screen
            UIMode::Help => {}
            UIMode::MkdirInput { input } => self.handle_mkdir_input(key.code, input),
            UIMode::RenameInput { original, input } => self.handle_rename_input(key.code, original, input),
            UIMode::ConfirmDelete { pending } => self.handle_confirm_delete(key.code, pending),
        }
    }

    fn handle_mkdir_input(&mut self, key: KeyCode, mut input: String) {
        match handle_text_input(key, &mut input) {
            TextInput::Submit => {
                let outcome = match self.session.create_directory(&input) {
                    Ok(Some(path)) => Outcome::Info(format!("Created {}", path.display())),
                    Ok(None) => Outcome::Continue,
                    Err(e) => failure(e),
                };
                self.apply_outcome(outcome);
            }
            TextInput::Cancel => {}
            TextInput::Editing => self.ui_mode = UIMode::MkdirInput { input },
        }
    }

    fn handle_rename_input(&mut self, key: KeyCode, original: String, mut input: String) {
        match handle_text_input(key, &mut input) {
            TextInput::Submit => {
                let outcome = match self.session.rename(&input) {
                    Ok(Some(_)) => Outcome::Info(format!("Renamed {} to {}", original, input.trim())),
                    Ok(None) => Outcome::Continue,
                    Err(e) => failure(e),
                };
                self.apply_outcome(outcome);
            }
            TextInput::Cancel => {}
            TextInput::Editing => self.ui_mode = UIMode::RenameInput { original, input },
        }
    }

    fn handle_confirm_delete(&mut self, key: KeyCode, pending: PendingDelete) {
        match handle_yes_no_keys(key) {
            DialogResult::Accept => {
                let name = pending.name().to_owned();
                let outcome = match self.session.delete(pending) {
                    Ok(()) => Outcome::Info(format!("Deleted {}", name)),
                    Err(e) => failure(e),
                };
                self.apply_outcome(outcome);
            }
            DialogResult::Reject => {}
            DialogResult::Pending => self.ui_mode = UIMode::ConfirmDelete { pending },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn function_keys_follow_the_classic_layout() {
        assert_eq!(action_for(key(KeyCode::F(1))), Some(Action::ShowHelp));
        assert_eq!(action_for(key(KeyCode::F(3))), Some(Action::View));
        assert_eq!(action_for(key(KeyCode::F(4))), Some(Action::Edit));
        assert_eq!(action_for(key(KeyCode::F(5))), Some(Action::MarkCopy));
        assert_eq!(action_for(key(KeyCode::F(6))), Some(Action::Rename));
        assert_eq!(action_for(key(KeyCode::F(7))), Some(Action::MakeDirectory));
        assert_eq!(action_for(key(KeyCode::F(8))), Some(Action::Delete));
        assert_eq!(action_for(key(KeyCode::F(9))), Some(Action::ToggleHidden));
        assert_eq!(action_for(key(KeyCode::F(10))), Some(Action::Quit));
        assert_eq!(action_for(key(KeyCode::F(12))), Some(Action::Paste));
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(action_for(key(KeyCode::Up)), Some(Action::MoveUp));
        assert_eq!(action_for(key(KeyCode::Char('j'))), Some(Action::MoveDown));
        assert_eq!(action_for(key(KeyCode::Tab)), Some(Action::SwitchPane));
        assert_eq!(action_for(key(KeyCode::Left)), Some(Action::SwitchPane));
        assert_eq!(action_for(key(KeyCode::Enter)), Some(Action::Activate));
        assert_eq!(action_for(key(KeyCode::Backspace)), Some(Action::GoParent));
    }

    #[test]
    fn control_c_quits_instead_of_copying() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(ctrl_c), Some(Action::Quit));
        assert_eq!(action_for(key(KeyCode::Char('c'))), Some(Action::MarkCopy));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(action_for(key(KeyCode::Char('z'))), None);
        assert_eq!(action_for(key(KeyCode::F(11))), None);
    }

    #[test]
    fn only_presses_reach_the_bindings() {
        let press = key(KeyCode::F(8));
        assert_eq!(key_press(Event::Key(press)), Some(press));

        let mut release = press;
        release.kind = KeyEventKind::Release;
        assert_eq!(key_press(Event::Key(release)), None);

        let mut repeat = press;
        repeat.kind = KeyEventKind::Repeat;
        assert_eq!(key_press(Event::Key(repeat)), None);

        assert_eq!(key_press(Event::FocusGained), None);
    }
}
