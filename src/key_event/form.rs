use crossterm::event::{KeyCode, KeyEvent};
use tui_textarea::Input;

use super::KeyFlow;
use crate::app::App;
use crate::error::AppError;
use crate::lang;
use crate::view::{FormKind, View};

/// Key handling for the add/edit form. Tab/arrows move between fields,
/// Enter submits, Esc cancels; everything else goes to the focused text
/// field. Store failures surface as inline text and keep the form open.
pub fn handle_form_key(app: &mut App, key: KeyEvent) -> KeyFlow {
    let language = app.store.language();
    let View::Form(state) = &mut app.view else {
        return KeyFlow::Continue;
    };

    match key.code {
        KeyCode::Esc => {
            app.close_overlay();
        }
        KeyCode::Tab | KeyCode::Down => {
            state.form.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.form.prev();
        }
        KeyCode::Enter => {
            let kind = state.kind;
            let values = match state.form.validate(language) {
                Ok(values) => values,
                Err(message) => {
                    state.form.error = Some(message);
                    return KeyFlow::Continue;
                }
            };

            let result = match kind {
                FormKind::Add => app.add_profile(values.into_profile()).map(|_| ()),
                FormKind::Edit { index } => app.update_profile(index, values.into_profile()),
            };

            match result {
                Ok(()) => {
                    app.close_overlay();
                }
                Err(err) => {
                    let message = match err {
                        AppError::DuplicateKey(_) => {
                            lang::text(language, "msg_conn_exists").to_string()
                        }
                        other => other.to_string(),
                    };
                    if let View::Form(state) = &mut app.view {
                        state.form.error = Some(message);
                    }
                }
            }
        }
        _ => {
            // The textarea's own input handling for all other keys
            state.form.focused_textarea_mut().input(Input::from(key));
            state.form.error = None;
        }
    }
    KeyFlow::Continue
}
