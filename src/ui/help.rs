use super::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("?", "Toggle this help"),
            ("Ctrl+C", "Quit from anywhere"),
            ("/", "Open search"),
        ],
    ),
    (
        "Home",
        &[
            ("←/h →/l", "Previous/next featured film"),
            ("Tab", "Switch focus between slider and popular list"),
            ("↑/k ↓/j", "Move in the popular list"),
            ("Enter", "Open the focused film"),
            ("r", "Reload the catalog"),
            ("q", "Quit application"),
        ],
    ),
    (
        "Search",
        &[
            ("type", "Edit the query"),
            ("Ctrl+U", "Clear the query"),
            ("↑/↓", "Select a result"),
            ("Enter", "Open the selected film"),
            ("Esc", "Close search"),
        ],
    ),
    (
        "Detail",
        &[
            ("↑/k ↓/j", "Scroll description"),
            ("Esc/q", "Back to home"),
        ],
    ),
];

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let mut help_text = vec![Line::from("")];
    for (title, keys) in SECTIONS {
        help_text.push(Line::from(Span::styled(
            format!("  {title}"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for (key, action) in *keys {
            help_text.push(Line::from(vec![
                Span::styled(format!("    {key:<10}"), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ]));
        }
        help_text.push(Line::from(""));
    }

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help: Keybindings ")
                .title_bottom(Line::from(" Press ? or Esc to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{screen, terminal};

    #[test]
    fn test_quit_listed_under_home_only() {
        let mut term = terminal(100, 50);
        term.draw(render).unwrap();
        let text = screen(&term);
        let home = text.find("  Home").unwrap();
        let search = text.find("  Search").unwrap();
        let quit = text.find("Quit application").unwrap();
        assert!(home < quit && quit < search);
        assert_eq!(text.matches("Quit application").count(), 1);
        assert!(text.find("Quit from anywhere").unwrap() < home);
    }
}
