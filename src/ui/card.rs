use crate::assets::{AssetCategory, AssetStore, Badge};
use crate::model::Film;
use crate::rating::{self, PREFERRED_PROVIDERS, RatingEntry};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Tags shown per category on a card.
const BADGE_LIMIT: usize = 2;
const ICON: &str = "◆ ";

/// Everything a film item displays, resolved up front.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmCard {
    pub route: String,
    pub title: String,
    pub poster: Option<String>,
    pub ratings: Vec<RatingEntry>,
    pub genres: Vec<Badge>,
    pub countries: Vec<Badge>,
    pub year: Option<u32>,
}

impl FilmCard {
    pub fn new(film: &Film, assets: &AssetStore) -> Self {
        Self {
            route: film.route(),
            title: film.display_name().to_string(),
            poster: film.poster_url().map(str::to_string),
            ratings: rating::resolve(film.rating.as_ref(), &PREFERRED_PROVIDERS),
            genres: assets.badges(AssetCategory::Genres, &film.genres, BADGE_LIMIT),
            countries: assets.badges(AssetCategory::Countries, &film.countries, BADGE_LIMIT),
            year: film.year,
        }
    }

    /// Title line followed by the ratings, if any.
    pub fn headline(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            self.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )];
        if let Some(year) = self.year {
            spans.push(Span::styled(
                format!(" ({year})"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.extend(rating_spans(&self.ratings));
        Line::from(spans)
    }

    /// Genre and country badges on one line.
    pub fn badges_line(&self) -> Line<'static> {
        let mut spans = badge_spans(&self.genres, Color::Magenta);
        if !self.genres.is_empty() && !self.countries.is_empty() {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.extend(badge_spans(&self.countries, Color::Green));
        Line::from(spans)
    }

    pub fn route_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled("→ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.route.clone(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            ),
        ])
    }
}

pub fn rating_spans(ratings: &[RatingEntry]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for entry in ratings {
        let Some(value) = entry.value else { continue };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} ", entry.label()),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::styled(
            format!("{value:.1}"),
            Style::default().fg(rating_color(value)).add_modifier(Modifier::BOLD),
        ));
    }
    spans
}

fn rating_color(value: f64) -> Color {
    if value >= 7.0 {
        Color::Green
    } else if value >= 5.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Icon only when the asset exists; otherwise the label stands alone.
pub fn badge_spans(badges: &[Badge], color: Color) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, badge) in badges.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        if badge.icon.is_found() {
            spans.push(Span::styled(ICON, Style::default().fg(color)));
        }
        spans.push(Span::styled(badge.label.clone(), Style::default().fg(color)));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetLookup;
    use crate::model::{NameItem, Rating};

    fn tags(names: &[&str]) -> Vec<NameItem> {
        names
            .iter()
            .map(|n| NameItem {
                name: n.to_string(),
            })
            .collect()
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_card_from_film() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("genres")).unwrap();
        std::fs::write(dir.path().join("genres").join("драма.png"), b"png").unwrap();
        let assets = AssetStore::new(dir.path());

        let film = Film {
            id: 42,
            en_name: Some("Heat".to_string()),
            rating: Some([("imdb", Some(0.0)), ("kp", Some(7.5))].into_iter().collect::<Rating>()),
            genres: tags(&["драма", "криминал", "триллер"]),
            countries: tags(&["США"]),
            year: Some(1995),
            ..Default::default()
        };
        let card = FilmCard::new(&film, &assets);

        assert_eq!(card.route, "/films/42");
        assert_eq!(card.title, "Heat");
        assert_eq!(card.ratings.len(), 1);
        assert_eq!(card.ratings[0].provider, "kp");
        assert_eq!(card.genres.len(), 2);
        assert!(card.genres[0].icon.is_found());
        assert_eq!(card.genres[1].icon, AssetLookup::NotFound);

        let headline = line_text(&card.headline());
        assert!(headline.contains("Heat (1995)"));
        assert!(headline.contains("KP 7.5"));
        assert!(!headline.contains("IMDb"));
    }

    #[test]
    fn test_missing_asset_renders_label_only() {
        let badges = vec![Badge {
            label: "Франция".to_string(),
            icon: AssetLookup::NotFound,
        }];
        let spans = badge_spans(&badges, Color::Green);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "Франция");
        assert!(spans.iter().all(|s| s.content != ICON));
    }

    #[test]
    fn test_found_asset_gets_icon() {
        let badges = vec![Badge {
            label: "Драма".to_string(),
            icon: AssetLookup::Found("assets/genres/драма.png".into()),
        }];
        let spans = badge_spans(&badges, Color::Magenta);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, ICON);
    }

    #[test]
    fn test_badges_line_separator() {
        let card = FilmCard {
            route: "/films/1".to_string(),
            title: "X".to_string(),
            poster: None,
            ratings: Vec::new(),
            genres: vec![Badge {
                label: "Драма".to_string(),
                icon: AssetLookup::NotFound,
            }],
            countries: vec![Badge {
                label: "США".to_string(),
                icon: AssetLookup::NotFound,
            }],
            year: None,
        };
        assert_eq!(line_text(&card.badges_line()), "Драма │ США");
    }
}
