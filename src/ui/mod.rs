mod body;
mod card;
mod detail;
mod help;
mod home;
mod list;
mod search;
mod slider;

use crate::app::{App, View};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthChar;

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    match app.view {
        View::Home => home::render(app, frame),
        View::Detail => detail::render(app, frame),
    }

    if app.search.is_open() {
        search::render(app, frame);
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

/// Create a centered rectangle using percentage of parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    let width: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        used += w;
        result.push(c);
    }
    result.push('…');
    result
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::assets::AssetStore;
    use crate::config::Config;
    use std::time::Duration;

    /// App wired to an unreachable API; tests fill the store by hand.
    pub fn test_app() -> App {
        let client = ApiClient::from_config(&Config::for_tests("http://127.0.0.1:9/")).unwrap();
        App::new(client, AssetStore::new("assets"), Duration::ZERO)
    }

    #[test]
    fn test_render_layers() {
        let mut app = test_app();
        let mut term = crate::test_support::terminal(100, 30);
        term.draw(|f| render(&app, f)).unwrap();
        let text = crate::test_support::screen(&term);
        assert!(text.contains("Film Explorer"));
        assert!(!text.contains("Find a film"));

        app.search.open();
        app.show_help = true;
        term.draw(|f| render(&app, f)).unwrap();
        let text = crate::test_support::screen(&term);
        assert!(text.contains("Keybindings"));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Alien", 10), "Alien");
        assert_eq!(truncate_str("Alien Resurrection", 8), "Alien R…");
        assert_eq!(truncate_str("Тёмный рыцарь", 7), "Тёмный…");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK character takes two columns.
        assert_eq!(truncate_str("千と千尋の神隠し", 7), "千と千…");
    }
}
