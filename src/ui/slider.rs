use super::body::{SLIDER_ERROR_TEXT, SliceBody, body, placeholder};
use super::card::FilmCard;
use crate::app::{App, Focus};
use crate::store::FilmSlot;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Main slider: one film at a time, ←/→ to move.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let slice = app.store.films(FilmSlot::Main);
    let border = if app.focus == Focus::Slider {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Featured ");

    let body = body(slice, SLIDER_ERROR_TEXT, None);
    let films = match body {
        SliceBody::Items(films) => films,
        other => {
            if let Some(message) = placeholder(&other) {
                frame.render_widget(message.block(block), area);
            }
            return;
        }
    };

    let Some(film) = films.get(app.slide) else {
        frame.render_widget(block, area);
        return;
    };

    block = block.title_bottom(
        Line::from(format!(" ‹ {}/{} › ", app.slide + 1, films.len())).alignment(Alignment::Right),
    );

    let card = FilmCard::new(film, &app.assets);
    let mut lines = vec![card.headline(), card.badges_line()];
    if let Some(poster) = &card.poster {
        lines.push(Line::from(vec![
            Span::styled("Poster: ", Style::default().fg(Color::DarkGray)),
            Span::styled(poster.clone(), Style::default().fg(Color::Blue)),
        ]));
    }
    if let Some(description) = &film.description {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            description.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(card.route_line());

    let slide = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(slide, area);
}
