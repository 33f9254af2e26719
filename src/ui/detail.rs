use super::card::{FilmCard, badge_spans, rating_spans};
use crate::app::App;
use crate::assets::AssetCategory;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let film = match &app.detail {
        Some(f) => f,
        None => return,
    };
    let card = FilmCard::new(film, &app.assets);

    // Layout: header(7) + description(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Metadata header ──
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));

    let mut title = vec![Span::styled(
        format!(" {}", card.title),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    let original = [&film.en_name, &film.alternative_name]
        .into_iter()
        .filter_map(|n| n.as_deref())
        .find(|n| !n.trim().is_empty() && *n != card.title);
    if let Some(original) = original {
        title.push(Span::styled(
            format!("  {original}"),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        ));
    }
    title.extend(rating_spans(&card.ratings));

    let mut facts = vec![label(" Year: ")];
    facts.push(Span::raw(
        card.year.map(|y| y.to_string()).unwrap_or_else(|| "n/a".to_string()),
    ));
    if let Some(minutes) = film.movie_length {
        facts.push(Span::raw("   "));
        facts.push(label("Length: "));
        facts.push(Span::raw(format!("{minutes} min")));
    }

    let genres = app
        .assets
        .badges(AssetCategory::Genres, &film.genres, film.genres.len());
    let countries = app
        .assets
        .badges(AssetCategory::Countries, &film.countries, film.countries.len());
    let mut genre_line = vec![label(" Genres: ")];
    genre_line.extend(badge_spans(&genres, Color::Magenta));
    let mut country_line = vec![label(" Countries: ")];
    country_line.extend(badge_spans(&countries, Color::Green));

    let mut poster_line = vec![label(" Poster: ")];
    match &card.poster {
        Some(url) => poster_line.push(Span::styled(url.clone(), Style::default().fg(Color::Blue))),
        None => poster_line.push(label("none")),
    }

    let meta_lines = vec![
        Line::from(title),
        Line::from(facts),
        Line::from(genre_line),
        Line::from(country_line),
        Line::from(poster_line),
    ];

    let meta_block = Paragraph::new(meta_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", card.route)),
    );
    frame.render_widget(meta_block, chunks[0]);

    // ── Description ──
    let description = film
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or("No description.");
    let content = Paragraph::new(description)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Description ")
                .title_bottom(
                    Line::from(format!(" scroll: {} ", app.detail_scroll))
                        .alignment(Alignment::Right),
                ),
        );
    frame.render_widget(content, chunks[1]);

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
        key(" ↑↓"),
        Span::raw(" Scroll  "),
        key("/"),
        Span::raw(" Search  "),
        key("Esc"),
        Span::raw(" Back  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Film, NameItem, Rating};
    use crate::test_support::{screen, terminal};
    use crate::ui::tests::test_app;

    #[test]
    fn test_detail_shows_film() {
        let mut app = test_app();
        app.open_detail(Film {
            id: 111543,
            name: Some("Тёмный рыцарь".to_string()),
            en_name: Some("The Dark Knight".to_string()),
            rating: Some([("imdb", Some(9.0)), ("kp", None)].into_iter().collect::<Rating>()),
            genres: vec![
                NameItem {
                    name: "фантастика".to_string(),
                },
                NameItem {
                    name: "боевик".to_string(),
                },
                NameItem {
                    name: "триллер".to_string(),
                },
            ],
            year: Some(2008),
            movie_length: Some(152),
            description: Some("Batman raises the stakes.".to_string()),
            ..Default::default()
        });

        let mut term = terminal(90, 20);
        term.draw(|f| render(&app, f)).unwrap();
        let text = screen(&term);
        assert!(text.contains("/films/111543"));
        assert!(text.contains("Тёмный рыцарь"));
        assert!(text.contains("The Dark Knight"));
        assert!(text.contains("IMDb 9.0"));
        assert!(text.contains("Year: 2008"));
        assert!(text.contains("152 min"));
        // Every genre is listed here, not just the card's first two.
        assert!(text.contains("Триллер"));
        assert!(text.contains("Batman raises the stakes."));
    }

    #[test]
    fn test_detail_without_film_draws_nothing() {
        let app = test_app();
        let mut term = terminal(40, 10);
        term.draw(|f| render(&app, f)).unwrap();
        assert!(screen(&term).trim().is_empty());
    }
}
