use super::body::{NOTHING_FOUND_TEXT, SERVER_ERROR_TEXT, SliceBody, body, placeholder};
use super::card::FilmCard;
use super::centered_rect;
use crate::app::App;
use crate::store::FilmSlot;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const PROMPT: &str = " Search: ";

/// Search modal drawn over the current view.
pub fn render(app: &App, frame: &mut Frame) {
    let area = centered_rect(80, 80, frame.area());
    frame.render_widget(Clear, area);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Find a film ")
        .title_bottom(
            Line::from(" ↑↓ Select  Enter Open  Ctrl+U Clear  Esc Close ")
                .style(Style::default().fg(Color::DarkGray)),
        );
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    // ── Input ──
    let input = Paragraph::new(Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(Color::Yellow)),
        Span::raw(app.search.query()),
    ]));
    frame.render_widget(input, chunks[0]);
    let cursor_x = chunks[0].x + (PROMPT.width() + app.search.query().width()) as u16;
    frame.set_cursor_position((cursor_x.min(chunks[0].right().saturating_sub(1)), chunks[0].y));

    // ── Results ──
    let slice = app.store.films(FilmSlot::Search);
    let films = match body(slice, SERVER_ERROR_TEXT, Some(NOTHING_FOUND_TEXT)) {
        SliceBody::Items(films) => films,
        other => {
            if let Some(message) = placeholder(&other) {
                frame.render_widget(message, chunks[2]);
            }
            return;
        }
    };

    let items: Vec<ListItem> = films
        .iter()
        .map(|film| {
            let card = FilmCard::new(film, &app.assets);
            ListItem::new(vec![card.headline(), card.badges_line(), card.route_line()])
        })
        .collect();

    let list_widget = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▸ ");
    let mut list_state = ListState::default();
    list_state.select(Some(app.search.selected()));
    frame.render_stateful_widget(list_widget, chunks[2], &mut list_state);

    let count = Paragraph::new(format!("{} found ", films.len()))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right);
    frame.render_widget(count, chunks[1]);
}
