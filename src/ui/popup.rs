use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use crate::lang::{self, Language};
use crate::ui::centered_rect;
use crate::view::{LanguagePickerState, ModalButton, ModalState};

fn button_span(label: &str, selected: bool) -> Span<'_> {
    if selected {
        Span::styled(
            format!("[ {} ]", label),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!("[ {} ]", label), Style::default().fg(Color::White))
    }
}

/// Confirmation modal: a prompt and exactly two buttons
pub fn draw_confirm_popup(
    area: Rect,
    modal: &ModalState,
    prompt: &str,
    language: Language,
    frame: &mut ratatui::Frame<'_>,
) {
    let popup_w =
        (prompt.chars().count() as u16 + 8).clamp(40, area.width.saturating_sub(4).max(40));
    let popup = centered_rect(area, popup_w, 7);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, popup);

    let inner = popup.inner(Margin::new(1, 1));
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // prompt
            Constraint::Length(1),
            Constraint::Length(1), // buttons
            Constraint::Length(1),
            Constraint::Length(1), // hint
        ])
        .split(inner);

    let question = Paragraph::new(Line::from(Span::styled(
        prompt.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(question, layout[0]);

    let buttons = Paragraph::new(Line::from(vec![
        button_span(
            lang::text(language, "btn_ok"),
            modal.button == ModalButton::Confirm,
        ),
        Span::raw("   "),
        button_span(
            lang::text(language, "btn_cancel"),
            modal.button == ModalButton::Cancel,
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(buttons, layout[2]);

    let hint = Paragraph::new(Line::from(Span::styled(
        "←→/Tab   Enter   Esc",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hint, layout[4]);
}

/// Language picker: one row per supported locale
pub fn draw_language_popup(
    area: Rect,
    picker: &LanguagePickerState,
    language: Language,
    frame: &mut ratatui::Frame<'_>,
) {
    let popup = centered_rect(area, 30, Language::ALL.len() as u16 + 2);
    frame.render_widget(Clear, popup);

    let items: Vec<ListItem> = Language::ALL
        .iter()
        .map(|l| ListItem::new(Line::from(l.display_name())))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(Span::styled(
                    lang::text(language, "title_language"),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(
        list,
        popup,
        &mut ListState::default().with_selected(Some(picker.selected)),
    );
}

/// Error popup, always rendered on top of everything else
pub fn draw_error_popup(
    area: Rect,
    message: &str,
    language: Language,
    frame: &mut ratatui::Frame<'_>,
) {
    let popup_w = area.width.saturating_sub(10).clamp(30, 80);
    let inner_w = popup_w.saturating_sub(2).max(1);
    let estimated_lines: u16 = message
        .lines()
        .map(|l| {
            let len = l.chars().count() as u16;
            if len == 0 { 1 } else { len.div_ceil(inner_w) }
        })
        .sum();
    let popup_h = (estimated_lines.max(1) + 4).min(area.height.saturating_sub(2));
    let popup = centered_rect(area, popup_w, popup_h);

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(Span::styled(
            lang::text(language, "title_error"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    let body = Paragraph::new(vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        )),
        Line::from(Span::raw("")),
        Line::from(Span::styled(
            lang::text(language, "msg_dismiss_hint"),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::DIM),
        )),
    ])
    .wrap(ratatui::widgets::Wrap { trim: true })
    .block(block);
    frame.render_widget(body, popup);
}
