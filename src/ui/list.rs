use super::body::{SERVER_ERROR_TEXT, SliceBody, body, placeholder};
use super::card::{FilmCard, badge_spans, rating_spans};
use super::truncate_str;
use crate::app::{App, Focus};
use crate::assets::{AssetCategory, Badge, capitalize_first};
use crate::store::FilmSlot;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

const NO_POPULAR_TEXT: &str = "No popular films yet";
const NO_GENRES_TEXT: &str = "No genres";

pub fn render_popular(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == Focus::Popular;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::DarkGray }))
        .title(" Popular ");

    let films = match body(app.store.films(FilmSlot::Popular), SERVER_ERROR_TEXT, Some(NO_POPULAR_TEXT)) {
        SliceBody::Items(films) => films,
        other => {
            if let Some(message) = placeholder(&other) {
                frame.render_widget(message.block(block), area);
            }
            return;
        }
    };

    let title_width = (area.width as usize).saturating_sub(30);
    let items: Vec<ListItem> = films
        .iter()
        .map(|film| {
            let card = FilmCard::new(film, &app.assets);
            let mut spans = vec![
                Span::styled(
                    format!("{:>4} ", card.year.map(|y| y.to_string()).unwrap_or_default()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(truncate_str(&card.title, title_width)),
            ];
            spans.extend(rating_spans(&card.ratings));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let page_info = format!(
        " {} of {} ",
        if films.is_empty() { 0 } else { app.popular_selected + 1 },
        films.len()
    );

    let list_widget = List::new(items)
        .block(block.title_bottom(Line::from(page_info).alignment(Alignment::Right)))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(app.popular_selected));
    }
    frame.render_stateful_widget(list_widget, area, &mut list_state);
}

pub fn render_genres(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Genres ");

    let genres = match body(app.store.genres(), SERVER_ERROR_TEXT, Some(NO_GENRES_TEXT)) {
        SliceBody::Items(genres) => genres,
        other => {
            if let Some(message) = placeholder(&other) {
                frame.render_widget(message.block(block), area);
            }
            return;
        }
    };

    let items: Vec<ListItem> = genres
        .iter()
        .map(|genre| {
            let badge = Badge {
                label: capitalize_first(&genre.name),
                icon: app.assets.resolve(AssetCategory::Genres, &genre.name),
            };
            ListItem::new(Line::from(badge_spans(&[badge], Color::Magenta)))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Film, Genre};
    use crate::store::{FetchOutcome, FetchRequest};
    use crate::test_support::{screen, terminal};
    use crate::ui::tests::test_app;

    #[test]
    fn test_popular_loading_then_items() {
        let mut app = test_app();
        let ticket = app.store.dispatch(FetchRequest::PopularFilms);
        let mut term = terminal(50, 8);
        term.draw(|f| render_popular(&app, f, f.area())).unwrap();
        let text = screen(&term);
        assert_eq!(text.matches("Loading...").count(), 1);

        app.store.apply(FetchOutcome::Films {
            slot: FilmSlot::Popular,
            seq: ticket.seq,
            result: Ok(vec![Film {
                id: 9,
                name: Some("Heat".to_string()),
                year: Some(1995),
                ..Default::default()
            }]),
        });
        term.draw(|f| render_popular(&app, f, f.area())).unwrap();
        let text = screen(&term);
        assert!(text.contains("1995 Heat"));
        assert!(text.contains("1 of 1"));
        assert!(!text.contains("Loading..."));
    }

    #[test]
    fn test_genres_text_only_without_assets() {
        let mut app = test_app();
        let ticket = app.store.dispatch(FetchRequest::Genres);
        app.store.apply(FetchOutcome::Genres {
            seq: ticket.seq,
            result: Ok(vec![Genre {
                name: "драма".to_string(),
                slug: None,
            }]),
        });
        let mut term = terminal(30, 5);
        term.draw(|f| render_genres(&app, f, f.area())).unwrap();
        let text = screen(&term);
        assert!(text.contains("Драма"));
        assert!(!text.contains("◆"));
    }

    #[test]
    fn test_genres_error() {
        let mut app = test_app();
        let ticket = app.store.dispatch(FetchRequest::Genres);
        app.store.apply(FetchOutcome::Genres {
            seq: ticket.seq,
            result: Err("timeout".to_string()),
        });
        let mut term = terminal(30, 5);
        term.draw(|f| render_genres(&app, f, f.area())).unwrap();
        assert!(screen(&term).contains(SERVER_ERROR_TEXT));
    }
}
