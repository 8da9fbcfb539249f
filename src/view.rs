//! Single-slot view switcher for the main layout and its overlays.
//!
//! Exactly one view is interactive at a time. Entering an overlay records
//! which list held focus; confirm, submit and cancel are the only paths back
//! to `Main`, and they restore that focus.

use crate::lang::Language;
use crate::ui::form::ConnectionForm;

/// Which list owns keyboard input on the main screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Connections,
    Menu,
}

impl Focus {
    pub fn toggled(self) -> Self {
        match self {
            Focus::Connections => Focus::Menu,
            Focus::Menu => Focus::Connections,
        }
    }
}

/// Who currently consumes keyboard input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusContext {
    ConnectionsList,
    MenuList,
    Modal,
    Form,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKind {
    Connect,
    Edit,
    Delete,
    Add,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalButton {
    Confirm,
    Cancel,
}

impl ModalButton {
    pub fn toggled(self) -> Self {
        match self {
            ModalButton::Confirm => ModalButton::Cancel,
            ModalButton::Cancel => ModalButton::Confirm,
        }
    }
}

/// A confirmation modal: a prompt template bound to at most one profile and
/// exactly two buttons.
#[derive(Clone, Debug)]
pub struct ModalState {
    pub kind: ModalKind,
    /// Store index of the bound profile; `None` only for `Add`
    pub profile: Option<usize>,
    pub button: ModalButton,
    pub prev_focus: Focus,
}

impl ModalState {
    pub fn new(kind: ModalKind, profile: Option<usize>, prev_focus: Focus) -> Self {
        Self {
            kind,
            profile,
            button: ModalButton::Confirm,
            prev_focus,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormKind {
    Add,
    Edit { index: usize },
}

#[derive(Debug)]
pub struct FormState {
    pub kind: FormKind,
    pub form: ConnectionForm,
    pub prev_focus: Focus,
}

#[derive(Debug)]
pub struct LanguagePickerState {
    pub selected: usize,
    pub prev_focus: Focus,
}

impl LanguagePickerState {
    pub fn new(current: Language, prev_focus: Focus) -> Self {
        let selected = Language::ALL.iter().position(|l| *l == current).unwrap_or(0);
        Self {
            selected,
            prev_focus,
        }
    }

    pub fn move_next(&mut self) {
        self.selected = (self.selected + 1) % Language::ALL.len();
    }

    pub fn move_previous(&mut self) {
        self.selected = if self.selected == 0 {
            Language::ALL.len() - 1
        } else {
            self.selected - 1
        };
    }

    pub fn chosen(&self) -> Language {
        Language::ALL[self.selected]
    }
}

/// The current top-level view. Not a stack: only one view is ever shown.
#[derive(Debug, Default)]
pub enum View {
    #[default]
    Main,
    Modal(ModalState),
    Form(FormState),
    LanguagePicker(LanguagePickerState),
}

impl View {
    /// Map the view (plus the main-screen list focus) to the focus context
    /// the router dispatches on.
    pub fn focus_context(&self, focus: Focus) -> FocusContext {
        match self {
            View::Main => match focus {
                Focus::Connections => FocusContext::ConnectionsList,
                Focus::Menu => FocusContext::MenuList,
            },
            View::Modal(_) | View::LanguagePicker(_) => FocusContext::Modal,
            View::Form(_) => FocusContext::Form,
        }
    }

    /// The focus to restore when this overlay closes
    pub fn prev_focus(&self) -> Option<Focus> {
        match self {
            View::Main => None,
            View::Modal(state) => Some(state.prev_focus),
            View::Form(state) => Some(state.prev_focus),
            View::LanguagePicker(state) => Some(state.prev_focus),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_focus_context_follows_list_focus() {
        let view = View::Main;
        assert_eq!(
            view.focus_context(Focus::Connections),
            FocusContext::ConnectionsList
        );
        assert_eq!(view.focus_context(Focus::Menu), FocusContext::MenuList);
    }

    #[test]
    fn overlays_own_the_focus_context() {
        let modal = View::Modal(ModalState::new(ModalKind::Delete, Some(0), Focus::Connections));
        assert_eq!(modal.focus_context(Focus::Menu), FocusContext::Modal);

        let picker = View::LanguagePicker(LanguagePickerState::new(Language::En, Focus::Menu));
        assert_eq!(picker.focus_context(Focus::Connections), FocusContext::Modal);
    }

    #[test]
    fn overlay_records_previous_focus() {
        let modal = View::Modal(ModalState::new(ModalKind::Connect, Some(1), Focus::Menu));
        assert_eq!(modal.prev_focus(), Some(Focus::Menu));
        assert_eq!(View::Main.prev_focus(), None);
    }

    #[test]
    fn modal_button_toggles_between_two_options() {
        let mut state = ModalState::new(ModalKind::Add, None, Focus::Connections);
        assert_eq!(state.button, ModalButton::Confirm);
        state.button = state.button.toggled();
        assert_eq!(state.button, ModalButton::Cancel);
        state.button = state.button.toggled();
        assert_eq!(state.button, ModalButton::Confirm);
    }

    #[test]
    fn language_picker_wraps_over_supported_languages() {
        let mut picker = LanguagePickerState::new(Language::En, Focus::Menu);
        assert_eq!(picker.chosen(), Language::En);
        picker.move_next();
        assert_eq!(picker.chosen(), Language::Ru);
        picker.move_next();
        assert_eq!(picker.chosen(), Language::En);
        picker.move_previous();
        assert_eq!(picker.chosen(), Language::Ru);
    }
}
