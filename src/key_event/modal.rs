use crossterm::event::{KeyCode, KeyEvent};

use super::KeyFlow;
use crate::app::{App, PendingCommand};
use crate::view::{FormKind, ModalButton, ModalKind, View};

/// Key handling for confirmation modals. Two buttons, toggled with the
/// arrow keys or Tab; Enter presses the highlighted one, Esc cancels.
pub fn handle_modal_key(app: &mut App, key: KeyEvent) -> KeyFlow {
    let View::Modal(modal) = &mut app.view else {
        return KeyFlow::Continue;
    };

    match key.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
            modal.button = modal.button.toggled();
        }
        KeyCode::Esc => {
            app.close_overlay();
        }
        KeyCode::Enter => {
            let kind = modal.kind;
            let profile = modal.profile;
            let prev_focus = modal.prev_focus;
            let button = modal.button;

            if button == ModalButton::Cancel {
                app.close_overlay();
                return KeyFlow::Continue;
            }

            match kind {
                ModalKind::Connect => {
                    let target = profile
                        .and_then(|i| app.store.connections().get(i))
                        .cloned();
                    app.close_overlay();
                    if let Some(profile) = target {
                        app.pending = Some(PendingCommand::Connect(profile));
                    }
                }
                ModalKind::Edit => {
                    if let Some(index) = profile {
                        app.open_form(FormKind::Edit { index }, prev_focus);
                    } else {
                        app.close_overlay();
                    }
                }
                ModalKind::Add => {
                    app.open_form(FormKind::Add, prev_focus);
                }
                ModalKind::Delete => {
                    app.close_overlay();
                    if let Some(index) = profile
                        && let Err(err) = app.remove_profile(index)
                    {
                        app.set_error(err);
                    }
                }
            }
        }
        _ => {}
    }
    KeyFlow::Continue
}

/// Key handling for the language picker overlay
pub fn handle_language_picker_key(app: &mut App, key: KeyEvent) -> KeyFlow {
    let View::LanguagePicker(picker) = &mut app.view else {
        return KeyFlow::Continue;
    };

    match key.code {
        KeyCode::Down => picker.move_next(),
        KeyCode::Up => picker.move_previous(),
        KeyCode::Esc => app.close_overlay(),
        KeyCode::Enter => {
            let chosen = picker.chosen();
            app.close_overlay();
            if let Err(err) = app.set_language(chosen) {
                app.set_error(err);
            }
        }
        _ => {}
    }
    KeyFlow::Continue
}
