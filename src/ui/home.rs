use super::{list, slider};
use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + slider(9) + lists(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(9),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let header = Paragraph::new(" Film Explorer")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, chunks[0]);

    slider::render(app, frame, chunks[1]);

    // ── Popular | Genres ──
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[2]);
    list::render_popular(app, frame, columns[0]);
    list::render_genres(app, frame, columns[1]);

    // ── Status bar ──
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };
    let status_line = Line::from(vec![
        key(" ←→"),
        Span::raw(" Slide  "),
        key("Tab"),
        Span::raw(" Focus  "),
        key("Enter"),
        Span::raw(" Open  "),
        key("/"),
        Span::raw(" Search  "),
        key("r"),
        Span::raw(" Reload  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[3]);
}
