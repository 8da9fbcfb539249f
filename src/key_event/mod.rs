use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::view::View;

pub mod form;
pub mod main_screen;
pub mod modal;

// Re-export commonly used items for convenience
pub use form::handle_form_key;
pub use main_screen::{activate_current, handle_main_screen_key};
pub use modal::{handle_language_picker_key, handle_modal_key};

/// Result of handling a key event
pub enum KeyFlow {
    Continue,
    Quit,
}

/// Top-level key event handler: error popup dismissal first, then dispatch
/// by the current view. Overlays own their key handling entirely; no global
/// shortcut fires while one is active.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> KeyFlow {
    // Only handle actual key presses (ignore repeats/releases)
    if key.kind != KeyEventKind::Press {
        return KeyFlow::Continue;
    }

    // If the error popup is visible, handle dismissal only
    if app.error.is_some() {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                app.error = None;
            }
            _ => {}
        }
        return KeyFlow::Continue;
    }

    match &app.view {
        View::Main => handle_main_screen_key(app, key),
        View::Modal(_) => handle_modal_key(app, key),
        View::Form(_) => handle_form_key(app, key),
        View::LanguagePicker(_) => handle_language_picker_key(app, key),
    }
}

/// A left click in a list pane focuses it, selects the clicked row and
/// activates it, same as Enter. Overlays ignore the mouse.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> KeyFlow {
    if !matches!(app.view, View::Main) || app.error.is_some() {
        return KeyFlow::Continue;
    }
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind
        && let Some((focus, index)) = app.list_row_at(mouse.column, mouse.row)
    {
        app.focus = focus;
        match focus {
            crate::view::Focus::Connections => app.connections.select(index),
            crate::view::Focus::Menu => app.menu.select(index),
        }
        app.mark_redraw();
        return activate_current(app);
    }
    KeyFlow::Continue
}
