use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::lang::{self, Language};
use crate::list::ListController;
use crate::view::Focus;

const HELP_LINES: u16 = 5;

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
}

fn draw_list_pane<A>(
    area: Rect,
    controller: &mut ListController<A>,
    title: &str,
    focused: bool,
    placeholder: Option<&str>,
    frame: &mut ratatui::Frame<'_>,
) {
    let block = pane_block(title, focused);
    let inner_height = area.height.saturating_sub(2) as usize;
    controller.set_viewport(inner_height.max(1));

    let items: Vec<ListItem> = if controller.is_empty() {
        // Exactly one non-activatable placeholder row
        placeholder
            .into_iter()
            .map(|text| {
                ListItem::new(Line::from(Span::styled(
                    text.to_string(),
                    Style::default().fg(Color::DarkGray),
                )))
            })
            .collect()
    } else {
        controller
            .rows()
            .iter()
            .map(|row| ListItem::new(Line::from(row.label.clone())))
            .collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default().with_offset(controller.scroll_offset());
    if focused {
        state.select(controller.selected());
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// The main three-pane layout: connections, menu, help
pub fn draw_main<A, B>(
    area: Rect,
    connections: &mut ListController<A>,
    menu: &mut ListController<B>,
    focus: Focus,
    language: Language,
    frame: &mut ratatui::Frame<'_>,
) {
    let menu_height = menu.len() as u16 + 2;
    let help_height = HELP_LINES + 2;
    let panes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(menu_height),
            Constraint::Length(help_height),
        ])
        .split(area);

    draw_list_pane(
        panes[0],
        connections,
        lang::text(language, "connections_title"),
        focus == Focus::Connections,
        Some(lang::text(language, "msg_no_connections")),
        frame,
    );

    draw_list_pane(
        panes[1],
        menu,
        lang::text(language, "menu_title"),
        focus == Focus::Menu,
        None,
        frame,
    );

    let help = Paragraph::new(
        lang::text(language, "help_text")
            .lines()
            .map(Line::from)
            .collect::<Vec<_>>(),
    )
    .block(pane_block(lang::text(language, "help_title"), false))
    .style(Style::default().fg(Color::White).add_modifier(Modifier::DIM));
    frame.render_widget(help, panes[2]);
}
