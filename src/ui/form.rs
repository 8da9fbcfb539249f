use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tui_textarea::TextArea;

use crate::config::manager::ConnectionProfile;
use crate::lang::{self, Language};
use crate::ui::centered_rect;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FocusField {
    Server,
    Port,
    Comment,
    Username,
}

/// Typed values read out of a submitted form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormValues {
    pub server: String,
    pub port: String,
    pub comment: String,
    pub username: String,
}

impl FormValues {
    pub fn into_profile(self) -> ConnectionProfile {
        ConnectionProfile::new(self.server, self.comment, self.port, self.username)
    }
}

/// The add/edit connection form. Four single-line text fields plus an
/// inline validation message that keeps the form open until corrected.
#[derive(Debug)]
pub struct ConnectionForm {
    pub server: TextArea<'static>,
    pub port: TextArea<'static>,
    pub comment: TextArea<'static>,
    pub username: TextArea<'static>,
    pub focus: FocusField,
    pub error: Option<String>,
}

fn field(placeholder: &str, initial: &str) -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(placeholder);
    textarea.set_cursor_line_style(Style::default());
    if !initial.is_empty() {
        textarea.insert_str(initial);
    }
    textarea
}

impl ConnectionForm {
    pub fn new() -> Self {
        Self {
            server: field("host or IP", ""),
            port: field("22", ""),
            comment: field("", ""),
            username: field("", ""),
            focus: FocusField::Server,
            error: None,
        }
    }

    pub fn from_profile(profile: &ConnectionProfile) -> Self {
        Self {
            server: field("host or IP", &profile.server),
            port: field("22", &profile.port),
            comment: field("", &profile.comment),
            username: field("", &profile.username),
            focus: FocusField::Server,
            error: None,
        }
    }

    pub fn next(&mut self) {
        self.focus = match self.focus {
            FocusField::Server => FocusField::Port,
            FocusField::Port => FocusField::Comment,
            FocusField::Comment => FocusField::Username,
            FocusField::Username => FocusField::Server,
        };
    }

    pub fn prev(&mut self) {
        self.focus = match self.focus {
            FocusField::Server => FocusField::Username,
            FocusField::Port => FocusField::Server,
            FocusField::Comment => FocusField::Port,
            FocusField::Username => FocusField::Comment,
        };
    }

    pub fn focused_textarea_mut(&mut self) -> &mut TextArea<'static> {
        match self.focus {
            FocusField::Server => &mut self.server,
            FocusField::Port => &mut self.port,
            FocusField::Comment => &mut self.comment,
            FocusField::Username => &mut self.username,
        }
    }

    /// Read the current field values, trimmed
    pub fn values(&self) -> FormValues {
        FormValues {
            server: self.server.lines()[0].trim().to_string(),
            port: self.port.lines()[0].trim().to_string(),
            comment: self.comment.lines()[0].trim().to_string(),
            username: self.username.lines()[0].trim().to_string(),
        }
    }

    /// Field-level validation with localized messages. Uniqueness against
    /// the store is the caller's concern.
    pub fn validate(&self, language: Language) -> std::result::Result<FormValues, String> {
        let values = self.values();
        if values.server.is_empty() {
            return Err(lang::text(language, "msg_enter_server").to_string());
        }
        if values.comment.is_empty() {
            return Err(lang::text(language, "msg_enter_comment").to_string());
        }
        if !values.port.is_empty() && values.port.parse::<u16>().is_err() {
            return Err(lang::text(language, "msg_port_numeric").to_string());
        }
        Ok(values)
    }
}

impl Default for ConnectionForm {
    fn default() -> Self {
        Self::new()
    }
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(Span::styled(title.to_string(), style))
}

/// Centered form popup over the main layout
pub fn draw_form_popup(
    area: Rect,
    form: &mut ConnectionForm,
    title: &str,
    language: Language,
    frame: &mut ratatui::Frame<'_>,
) {
    let popup = centered_rect(area, 60, 17);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // server
            Constraint::Length(3), // port
            Constraint::Length(3), // comment
            Constraint::Length(3), // username
            Constraint::Length(1), // error
            Constraint::Length(1), // hint
        ])
        .split(inner);

    let fields: [(&mut TextArea<'static>, &str, FocusField); 4] = [
        (&mut form.server, "form_server", FocusField::Server),
        (&mut form.port, "form_port", FocusField::Port),
        (&mut form.comment, "form_comment", FocusField::Comment),
        (&mut form.username, "form_username", FocusField::Username),
    ];
    for (i, (textarea, label_key, focus)) in fields.into_iter().enumerate() {
        let focused = form.focus == focus;
        textarea.set_block(field_block(lang::text(language, label_key), focused));
        frame.render_widget(&*textarea, rows[i]);
    }

    if let Some(error) = &form.error {
        let error_line = Paragraph::new(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error_line, rows[4]);
    }

    let hint = Paragraph::new(Line::from(Span::styled(
        format!(
            "Enter: {}   Esc: {}   Tab: →",
            lang::text(language, "btn_save"),
            lang::text(language, "btn_cancel"),
        ),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )));
    frame.render_widget(hint, rows[5]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_trimmed() {
        let mut form = ConnectionForm::new();
        form.server.insert_str("  host1  ");
        form.comment.insert_str("web server");
        let values = form.values();
        assert_eq!(values.server, "host1");
        assert_eq!(values.comment, "web server");
    }

    #[test]
    fn validation_requires_server_and_comment() {
        let form = ConnectionForm::new();
        assert_eq!(
            form.validate(Language::En).unwrap_err(),
            "Enter server address"
        );

        let mut form = ConnectionForm::new();
        form.server.insert_str("host1");
        assert_eq!(form.validate(Language::En).unwrap_err(), "Enter comment");
        assert_eq!(form.validate(Language::Ru).unwrap_err(), "Введите комментарий");
    }

    #[test]
    fn validation_rejects_non_numeric_port() {
        let mut form = ConnectionForm::new();
        form.server.insert_str("host1");
        form.comment.insert_str("c");
        form.port.insert_str("abc");
        assert_eq!(
            form.validate(Language::En).unwrap_err(),
            "Port must be a number"
        );
    }

    #[test]
    fn focus_cycles_through_all_fields() {
        let mut form = ConnectionForm::new();
        let order = [
            FocusField::Port,
            FocusField::Comment,
            FocusField::Username,
            FocusField::Server,
        ];
        for expected in order {
            form.next();
            assert_eq!(form.focus, expected);
        }
        form.prev();
        assert_eq!(form.focus, FocusField::Username);
    }

    #[test]
    fn from_profile_prefills_fields() {
        let profile = ConnectionProfile::new(
            "host1".into(),
            "prod".into(),
            "2222".into(),
            "deploy".into(),
        );
        let form = ConnectionForm::from_profile(&profile);
        let values = form.validate(Language::En).unwrap();
        assert_eq!(values.into_profile(), profile);
    }
}
