use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::KeyFlow;
use crate::app::{App, ConnectionAction, MenuAction, PendingCommand};
use crate::view::{Focus, ModalKind};

/// Key handling for the main layout: global shortcuts plus navigation of
/// whichever list currently holds focus. The router performs no index
/// arithmetic itself; moves go through the focused controller.
pub fn handle_main_screen_key(app: &mut App, key: KeyEvent) -> KeyFlow {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyFlow::Quit;
        }
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.request_refresh();
        }
        KeyCode::Tab => {
            app.focus = app.focus.toggled();
        }
        KeyCode::Down => match app.focus {
            Focus::Connections => app.connections.move_next(),
            Focus::Menu => app.menu.move_next(),
        },
        KeyCode::Up => match app.focus {
            Focus::Connections => app.connections.move_previous(),
            Focus::Menu => app.menu.move_previous(),
        },
        KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if app.focus == Focus::Connections
                && let Some(index) = app.connections.selected()
            {
                app.open_modal(ModalKind::Edit, Some(index));
            }
        }
        KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.open_modal(ModalKind::Add, None);
        }
        KeyCode::Delete => {
            if app.focus == Focus::Connections
                && let Some(index) = app.connections.selected()
            {
                app.open_modal(ModalKind::Delete, Some(index));
            }
        }
        KeyCode::Enter => {
            return activate_current(app);
        }
        // Anything else falls through unconsumed
        _ => {}
    }
    KeyFlow::Continue
}

/// Activate the current row of the focused list; no-op when the list is
/// empty (the placeholder row is not activatable).
pub fn activate_current(app: &mut App) -> KeyFlow {
    match app.focus {
        Focus::Connections => {
            if let Some(ConnectionAction::Connect) = app.connections.activate().copied()
                && let Some(index) = app.connections.selected()
            {
                app.open_modal(ModalKind::Connect, Some(index));
            }
        }
        Focus::Menu => match app.menu.activate().copied() {
            Some(MenuAction::AddConnection) => app.open_modal(ModalKind::Add, None),
            Some(MenuAction::Language) => app.open_language_picker(),
            Some(MenuAction::EditConfig) => {
                app.pending = Some(PendingCommand::EditConfig);
            }
            Some(MenuAction::Quit) => return KeyFlow::Quit,
            None => {}
        },
    }
    KeyFlow::Continue
}
