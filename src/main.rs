mod api;
mod app;
mod assets;
mod config;
mod logging;
mod model;
mod rating;
mod search;
mod store;
#[cfg(test)]
mod test_support;
mod ui;

use api::ApiClient;
use app::{App, Focus, View};
use assets::AssetStore;
use clap::Parser;
use config::{Config, ConfigArgs};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// Upper bound on how long the loop waits for input between frames.
const TICK: Duration = Duration::from_millis(100);

/// Terminal browser for a remote movie catalog
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match Config::from_args(cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };

    logging::init(&config.log_level, config.log_path().as_deref());
    tracing::info!(
        base = %config.api_base,
        assets = %config.assets_dir.display(),
        debounce_ms = config.debounce.as_millis() as u64,
        "starting film-explorer"
    );

    let client = match ApiClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };
    let assets = AssetStore::new(config.assets_dir.clone());
    if !assets.root().is_dir() {
        tracing::warn!(dir = %assets.root().display(), "assets directory missing, badges show text only");
    }

    let mut app = App::new(client, assets, config.debounce);
    app.init();

    // Init terminal
    let mut terminal = ratatui::init();

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    ratatui::restore();

    if let Err(e) = result {
        tracing::error!(error = %e, "terminal loop failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    tracing::info!("bye");
    Ok(())
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.drain_outcomes();
        app.tick(Instant::now());

        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Wake up early when a debounced search falls due.
        let timeout = app
            .search
            .deadline()
            .map(|due| due.saturating_duration_since(Instant::now()))
            .unwrap_or(TICK)
            .min(TICK);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_key(app, key, Instant::now());
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Help toggle, except while typing a query
    if key.code == KeyCode::Char('?') && !app.search.is_open() {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.search.is_open() {
        handle_search_key(app, key, now);
        return;
    }
    match app.view {
        View::Home => handle_home_key(app, key),
        View::Detail => handle_detail_key(app, key),
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Esc => app.close_search(),
        KeyCode::Enter => app.choose_search_result(),
        KeyCode::Down => app.search_next(),
        KeyCode::Up => app.search_prev(),
        KeyCode::Backspace => app.search_backspace(now),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_clear(now)
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_push(c, now)
        }
        _ => {}
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => {
            app.open_search();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.slide_next();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.slide_prev();
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = app.focus.toggle();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.focus == Focus::Popular {
                app.popular_next();
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if app.focus == Focus::Popular {
                app.popular_prev();
            }
        }
        KeyCode::Enter => {
            app.open_focused();
        }
        KeyCode::Char('r') => {
            app.reload();
        }
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.close_detail();
        }
        KeyCode::Char('/') => {
            app.open_search();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_down();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_up();
        }
        _ => {}
    }
}
