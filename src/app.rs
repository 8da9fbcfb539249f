use std::io::Write;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::layout::Rect;
use ratatui::prelude::Backend;

use crate::config::manager::{ConnectionProfile, ConnectionStore};
use crate::error::{AppError, Result};
use crate::lang::{self, Language};
use crate::launcher;
use crate::list::{ListController, ListRow};
use crate::ui::{
    ConnectionForm, draw_confirm_popup, draw_error_popup, draw_form_popup, draw_language_popup,
    draw_main,
};
use crate::view::{Focus, FormKind, FormState, ModalKind, ModalState, View};

/// Payload bound to a connections-list row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionAction {
    Connect,
}

/// Payload bound to a menu row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    AddConnection,
    Language,
    EditConfig,
    Quit,
}

/// An external command to run while the TUI is suspended. Set by the input
/// router, consumed by the run loop after the current event is fully
/// processed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingCommand {
    Connect(ConnectionProfile),
    EditConfig,
}

/// The application state: store, the two list controllers, the current view
/// and list focus. All mutations go through this single owner; the terminal
/// itself is passed into [`App::run`] so the state machine stays testable
/// without a backend.
pub struct App {
    pub store: ConnectionStore,
    pub connections: ListController<ConnectionAction>,
    pub menu: ListController<MenuAction>,
    pub view: View,
    pub focus: Focus,
    pub error: Option<AppError>,
    pub pending: Option<PendingCommand>,
    needs_redraw: bool,
    force_clear: bool,
    connections_area: Rect,
    menu_area: Rect,
}

impl App {
    pub fn new(store: ConnectionStore) -> Self {
        let mut app = Self {
            store,
            connections: ListController::new(),
            menu: ListController::new(),
            view: View::Main,
            focus: Focus::Connections,
            error: None,
            pending: None,
            needs_redraw: true,
            force_clear: false,
            connections_area: Rect::default(),
            menu_area: Rect::default(),
        };
        app.rebuild_connection_rows();
        app.rebuild_menu_rows();
        app
    }

    pub fn language(&self) -> Language {
        self.store.language()
    }

    /// Rebuild the connections rows from the store. Keeps the two in sync
    /// after a bulk change (startup, external config edit).
    pub fn rebuild_connection_rows(&mut self) {
        let rows = self
            .store
            .connections()
            .iter()
            .map(|p| ListRow::new(p.display_row(), ConnectionAction::Connect))
            .collect();
        self.connections.set_rows(rows);
    }

    /// Rebuild the menu rows with labels in the current language
    pub fn rebuild_menu_rows(&mut self) {
        let language = self.store.language();
        let rows = vec![
            ListRow::new(lang::text(language, "menu_add"), MenuAction::AddConnection),
            ListRow::new(lang::text(language, "menu_language"), MenuAction::Language),
            ListRow::new(lang::text(language, "menu_edit_config"), MenuAction::EditConfig),
            ListRow::new(lang::text(language, "menu_exit"), MenuAction::Quit),
        ];
        self.menu.set_rows(rows);
    }

    pub fn mark_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn should_redraw(&mut self) -> bool {
        let should = self.needs_redraw;
        self.needs_redraw = false;
        should
    }

    /// Schedule a full terminal clear before the next draw (Ctrl+R)
    pub fn request_refresh(&mut self) {
        self.force_clear = true;
        self.needs_redraw = true;
    }

    pub fn set_error(&mut self, error: AppError) {
        tracing::error!("{}", error);
        self.error = Some(error);
        self.needs_redraw = true;
    }

    // View transitions

    pub fn open_modal(&mut self, kind: ModalKind, profile: Option<usize>) {
        self.view = View::Modal(ModalState::new(kind, profile, self.focus));
        self.mark_redraw();
    }

    /// Open the add/edit form, carrying over the focus captured by the
    /// confirmation modal it replaces.
    pub fn open_form(&mut self, kind: FormKind, prev_focus: Focus) {
        let form = match kind {
            FormKind::Add => ConnectionForm::new(),
            FormKind::Edit { index } => match self.store.connections().get(index) {
                Some(profile) => ConnectionForm::from_profile(profile),
                None => return,
            },
        };
        self.view = View::Form(FormState {
            kind,
            form,
            prev_focus,
        });
        self.mark_redraw();
    }

    pub fn open_language_picker(&mut self) {
        self.view = View::LanguagePicker(crate::view::LanguagePickerState::new(
            self.store.language(),
            self.focus,
        ));
        self.mark_redraw();
    }

    /// Return to the main layout, restoring the focus the overlay captured.
    /// This is the only path out of any overlay.
    pub fn close_overlay(&mut self) {
        if let Some(prev) = self.view.prev_focus() {
            self.focus = prev;
        }
        self.view = View::Main;
        self.mark_redraw();
    }

    // Paired store + list mutations

    /// Append a profile to the store and its row to the list in one step.
    /// Returns the new row index.
    pub fn add_profile(&mut self, profile: ConnectionProfile) -> Result<usize> {
        let label = profile.display_row();
        self.store.add(profile)?;
        let index = self.store.connections().len() - 1;
        self.connections
            .insert_at(index, ListRow::new(label, ConnectionAction::Connect));
        self.connections.select(index);
        Ok(index)
    }

    /// Replace the profile at `index` in store and list together
    pub fn update_profile(&mut self, index: usize, profile: ConnectionProfile) -> Result<()> {
        let label = profile.display_row();
        self.store.update(index, profile)?;
        self.connections
            .replace_at(index, ListRow::new(label, ConnectionAction::Connect));
        self.connections.select(index);
        Ok(())
    }

    /// Remove the profile at `index` from store and list together
    pub fn remove_profile(&mut self, index: usize) -> Result<()> {
        self.store.remove(index)?;
        self.connections.remove_at(index);
        Ok(())
    }

    /// Switch the document language, persist it, and rebuild every label
    /// that lives in a controller. Frame-resolved labels pick the change up
    /// on the next draw.
    pub fn set_language(&mut self, language: Language) -> Result<()> {
        self.store.set_language(language)?;
        self.rebuild_menu_rows();
        Ok(())
    }

    pub fn selected_profile(&self) -> Option<(usize, &ConnectionProfile)> {
        let index = self.connections.selected()?;
        self.store.connections().get(index).map(|p| (index, p))
    }

    /// Which list pane (if any) contains the given screen position, plus
    /// the row index under it.
    pub fn list_row_at(&self, column: u16, row: u16) -> Option<(Focus, usize)> {
        for (focus, area, len, offset) in [
            (
                Focus::Connections,
                self.connections_area,
                self.connections.len(),
                self.connections.scroll_offset(),
            ),
            (
                Focus::Menu,
                self.menu_area,
                self.menu.len(),
                self.menu.scroll_offset(),
            ),
        ] {
            // Inside the block borders
            if area.width > 2
                && area.height > 2
                && column > area.x
                && column < area.x + area.width - 1
                && row > area.y
                && row < area.y + area.height - 1
            {
                let index = (row - area.y - 1) as usize + offset;
                if index < len {
                    return Some((focus, index));
                }
                return None;
            }
        }
        None
    }

    // Rendering

    fn draw_frame(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let language = self.store.language();

        let menu_height = self.menu.len() as u16 + 2;
        // Remember pane geometry for mouse hit testing
        self.connections_area = Rect {
            x: size.x,
            y: size.y,
            width: size.width,
            height: size.height.saturating_sub(menu_height + 7),
        };
        self.menu_area = Rect {
            x: size.x,
            y: self.connections_area.y + self.connections_area.height,
            width: size.width,
            height: menu_height,
        };

        draw_main(
            size,
            &mut self.connections,
            &mut self.menu,
            self.focus,
            language,
            frame,
        );

        match &mut self.view {
            View::Main => {}
            View::Modal(modal) => {
                let server = modal
                    .profile
                    .and_then(|i| self.store.connections().get(i))
                    .map(|p| p.server.as_str())
                    .unwrap_or_default();
                let prompt = match modal.kind {
                    ModalKind::Connect => lang::template(language, "dlg_connect", server),
                    ModalKind::Edit => lang::template(language, "dlg_edit", server),
                    ModalKind::Delete => lang::template(language, "dlg_delete", server),
                    ModalKind::Add => lang::text(language, "dlg_add").to_string(),
                };
                draw_confirm_popup(size, modal, &prompt, language, frame);
            }
            View::Form(state) => {
                let title = match state.kind {
                    FormKind::Add => lang::text(language, "title_add"),
                    FormKind::Edit { .. } => lang::text(language, "title_edit"),
                };
                draw_form_popup(size, &mut state.form, title, language, frame);
            }
            View::LanguagePicker(picker) => {
                draw_language_popup(size, picker, language, frame);
            }
        }

        // Error popup always on top
        if let Some(err) = &self.error {
            draw_error_popup(size, &err.to_string(), language, frame);
        }
    }

    // Run loop

    /// Single-threaded event loop: draw, block on the next terminal event,
    /// route it, then run any pending external command with the TUI
    /// suspended. One event is fully processed before the next is read.
    pub fn run<B: Backend + Write>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            if self.force_clear {
                terminal.clear()?;
                self.force_clear = false;
                self.needs_redraw = true;
            }
            if self.should_redraw() {
                terminal.draw(|f| self.draw_frame(f))?;
            }

            match event::read()? {
                Event::Key(key) => {
                    self.mark_redraw();
                    match crate::key_event::handle_key_event(self, key) {
                        crate::key_event::KeyFlow::Continue => {}
                        crate::key_event::KeyFlow::Quit => return Ok(()),
                    }
                }
                Event::Mouse(mouse) => {
                    match crate::key_event::handle_mouse_event(self, mouse) {
                        crate::key_event::KeyFlow::Continue => {}
                        crate::key_event::KeyFlow::Quit => return Ok(()),
                    }
                }
                Event::Resize(_, _) => self.mark_redraw(),
                _ => {}
            }

            if let Some(command) = self.pending.take() {
                self.run_external(terminal, command)?;
            }
        }
    }

    /// Leave the alternate screen, hand the terminal to an external process
    /// (ssh or the editor), then restore the TUI whatever the outcome.
    fn run_external<B: Backend + Write>(
        &mut self,
        terminal: &mut Terminal<B>,
        command: PendingCommand,
    ) -> Result<()> {
        let language = self.store.language();

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;

        let outcome = match &command {
            PendingCommand::Connect(profile) => {
                tracing::info!("Connecting to {}", profile.server);
                launcher::connect(profile)
            }
            PendingCommand::EditConfig => launcher::edit_config(self.store.path()),
        };

        enable_raw_mode()?;
        execute!(terminal.backend_mut(), EnterAlternateScreen, EnableMouseCapture)?;
        terminal.clear()?;
        self.mark_redraw();

        match (&command, outcome) {
            (PendingCommand::Connect(profile), Err(err)) => {
                tracing::error!("Connection to {} failed: {}", profile.server, err);
                self.set_error(AppError::ExternalProcess(format!(
                    "{}: {}",
                    lang::template(language, "msg_conn_error", &profile.server),
                    err
                )));
            }
            (PendingCommand::EditConfig, Err(err)) => {
                self.set_error(AppError::ExternalProcess(format!(
                    "{}: {}",
                    lang::text(language, "msg_config_open_error"),
                    err
                )));
            }
            (PendingCommand::EditConfig, Ok(())) => {
                // Pick up whatever the user changed on disk
                match self.store.reload() {
                    Ok(()) => self.rebuild_connection_rows(),
                    Err(err) => self.set_error(err),
                }
            }
            (PendingCommand::Connect(_), Ok(())) => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let store = ConnectionStore::with_path(dir.path().join("sshman.json")).unwrap();
        (dir, App::new(store))
    }

    fn profile(server: &str, comment: &str) -> ConnectionProfile {
        ConnectionProfile::new(server.into(), comment.into(), String::new(), String::new())
    }

    #[test]
    fn add_keeps_store_and_list_in_sync() {
        let (_dir, mut app) = test_app();
        assert!(app.connections.is_empty());

        let index = app.add_profile(profile("h1", "c1")).unwrap();
        assert_eq!(index, 0);
        assert_eq!(app.store.connections().len(), 1);
        assert_eq!(app.connections.len(), 1);
        assert_eq!(app.connections.rows()[0].label, "h1 - c1");
        assert_eq!(app.connections.selected(), Some(0));
    }

    #[test]
    fn remove_at_tail_repairs_selection() {
        let (_dir, mut app) = test_app();
        app.add_profile(profile("a", "c1")).unwrap();
        app.add_profile(profile("b", "c2")).unwrap();
        app.add_profile(profile("c", "c3")).unwrap();
        app.connections.select(2);

        app.remove_profile(2).unwrap();
        assert_eq!(app.store.connections().len(), 2);
        assert_eq!(app.connections.len(), 2);
        assert_eq!(app.connections.selected(), Some(1));
        assert_eq!(app.store.connections()[1].server, "b");
    }

    #[test]
    fn update_changes_row_without_reordering() {
        let (_dir, mut app) = test_app();
        app.add_profile(profile("a", "c1")).unwrap();
        app.add_profile(profile("b", "c2")).unwrap();

        app.update_profile(0, profile("a2", "c1")).unwrap();
        assert_eq!(app.store.connections()[0].server, "a2");
        assert_eq!(app.connections.rows()[0].label, "a2 - c1");
        assert_eq!(app.connections.rows()[1].label, "b - c2");
    }

    #[test]
    fn failed_add_leaves_list_untouched() {
        let (_dir, mut app) = test_app();
        app.add_profile(profile("h1", "c1")).unwrap();

        let err = app.add_profile(profile("h1", "again")).unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));
        assert_eq!(app.store.connections().len(), 1);
        assert_eq!(app.connections.len(), 1);
    }

    #[test]
    fn language_switch_relabels_menu_and_persists() {
        let (dir, mut app) = test_app();
        assert_eq!(app.menu.rows()[0].label, "Add connection");

        app.set_language(Language::Ru).unwrap();
        assert_eq!(app.menu.rows()[0].label, "Добавить соединение");

        let content =
            std::fs::read_to_string(dir.path().join("sshman.json")).unwrap();
        assert!(content.contains("\"language\": \"ru\""));
    }

    #[test]
    fn close_overlay_restores_captured_focus() {
        let (_dir, mut app) = test_app();
        app.add_profile(profile("h1", "c1")).unwrap();
        app.focus = Focus::Menu;

        app.open_modal(ModalKind::Add, None);
        app.close_overlay();
        assert_eq!(app.focus, Focus::Menu);
        assert!(matches!(app.view, View::Main));
    }
}
