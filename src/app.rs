use crate::api::ApiClient;
use crate::assets::AssetStore;
use crate::model::Film;
use crate::search::SearchOrchestrator;
use crate::store::{FetchOutcome, FetchRequest, FilmSlot, Store, Ticket};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Which screen is currently active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    Detail,
}

/// Which home panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Slider,
    Popular,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Self::Slider => Self::Popular,
            Self::Popular => Self::Slider,
        }
    }
}

/// Main application state.
pub struct App {
    pub store: Store,
    pub search: SearchOrchestrator,
    pub assets: AssetStore,
    client: ApiClient,
    outcome_tx: UnboundedSender<FetchOutcome>,
    outcome_rx: UnboundedReceiver<FetchOutcome>,

    pub should_quit: bool,
    pub view: View,
    pub show_help: bool,
    pub focus: Focus,

    // Home state
    pub slide: usize,
    pub popular_selected: usize,

    // Detail state
    pub detail: Option<Film>,
    pub detail_scroll: u16,

    pub status_msg: String,
}

impl App {
    pub fn new(client: ApiClient, assets: AssetStore, debounce: Duration) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            store: Store::default(),
            search: SearchOrchestrator::new(debounce),
            assets,
            client,
            outcome_tx,
            outcome_rx,

            should_quit: false,
            view: View::Home,
            show_help: false,
            focus: Focus::Slider,

            slide: 0,
            popular_selected: 0,

            detail: None,
            detail_scroll: 0,

            status_msg: "Loading catalog...".to_string(),
        }
    }

    /// Initial fetches, once per home slice that is still empty.
    pub fn init(&mut self) {
        if self.store.films(FilmSlot::Main).data().is_empty() {
            self.dispatch(FetchRequest::MainFilms);
        }
        if self.store.films(FilmSlot::Popular).data().is_empty() {
            self.dispatch(FetchRequest::PopularFilms);
        }
        if self.store.genres().data().is_empty() {
            self.dispatch(FetchRequest::Genres);
        }
    }

    /// User-triggered refetch of the home slices.
    pub fn reload(&mut self) {
        self.dispatch(FetchRequest::MainFilms);
        self.dispatch(FetchRequest::PopularFilms);
        self.dispatch(FetchRequest::Genres);
        self.status_msg = "Reloading...".to_string();
    }

    /// Mark the slice as loading and start the fetch in the background.
    pub fn dispatch(&mut self, request: FetchRequest) {
        let ticket = self.store.dispatch(request);
        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = run_fetch(&client, ticket).await;
            // Receiver gone means the app is shutting down.
            let _ = tx.send(outcome);
        });
    }

    /// Apply every fetch that resolved since the last frame.
    pub fn drain_outcomes(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply(outcome);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, outcome: FetchOutcome) {
        self.store.apply(outcome);
        self.clamp_selection();
        // Detail keeps its route in the status line.
        if self.view == View::Home {
            self.status_msg = self.summary();
        }
    }

    /// Fire the debounced search if it is due.
    pub fn tick(&mut self, now: Instant) {
        if let Some(query) = self.search.poll(now) {
            self.dispatch(FetchRequest::SearchFilms(query));
        }
    }

    pub fn open_search(&mut self) {
        if let Some(query) = self.search.open() {
            self.dispatch(FetchRequest::SearchFilms(query));
        }
    }

    pub fn close_search(&mut self) {
        self.search.close();
    }

    pub fn search_push(&mut self, c: char, now: Instant) {
        if let Some(query) = self.search.push_char(c, now) {
            self.dispatch(FetchRequest::SearchFilms(query));
        }
    }

    pub fn search_backspace(&mut self, now: Instant) {
        if let Some(query) = self.search.backspace(now) {
            self.dispatch(FetchRequest::SearchFilms(query));
        }
    }

    pub fn search_clear(&mut self, now: Instant) {
        if let Some(query) = self.search.clear(now) {
            self.dispatch(FetchRequest::SearchFilms(query));
        }
    }

    pub fn search_next(&mut self) {
        let len = self.store.films(FilmSlot::Search).data().len();
        self.search.select_next(len);
    }

    pub fn search_prev(&mut self) {
        self.search.select_prev();
    }

    /// Follow the selected result's link: close the modal, clear the query
    /// and show the film.
    pub fn choose_search_result(&mut self) {
        let Some(film) = self
            .store
            .films(FilmSlot::Search)
            .data()
            .get(self.search.selected())
            .cloned()
        else {
            return;
        };
        self.search.close();
        self.search.clear(Instant::now());
        self.open_detail(film);
    }

    pub fn current_slide(&self) -> Option<&Film> {
        self.store.films(FilmSlot::Main).data().get(self.slide)
    }

    /// Infinite slider: wraps at both ends.
    pub fn slide_next(&mut self) {
        let len = self.store.films(FilmSlot::Main).data().len();
        if len > 0 {
            self.slide = (self.slide + 1) % len;
        }
    }

    pub fn slide_prev(&mut self) {
        let len = self.store.films(FilmSlot::Main).data().len();
        if len > 0 {
            self.slide = (self.slide + len - 1) % len;
        }
    }

    pub fn popular_next(&mut self) {
        let len = self.store.films(FilmSlot::Popular).data().len();
        if self.popular_selected + 1 < len {
            self.popular_selected += 1;
        }
    }

    pub fn popular_prev(&mut self) {
        self.popular_selected = self.popular_selected.saturating_sub(1);
    }

    /// Open the film under the focused panel.
    pub fn open_focused(&mut self) {
        let film = match self.focus {
            Focus::Slider => self.current_slide().cloned(),
            Focus::Popular => self
                .store
                .films(FilmSlot::Popular)
                .data()
                .get(self.popular_selected)
                .cloned(),
        };
        if let Some(film) = film {
            self.open_detail(film);
        }
    }

    pub fn open_detail(&mut self, film: Film) {
        self.status_msg = film.route();
        self.detail = Some(film);
        self.detail_scroll = 0;
        self.view = View::Detail;
    }

    pub fn close_detail(&mut self) {
        self.view = View::Home;
        self.detail = None;
        self.status_msg = self.summary();
    }

    pub fn scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let slides = self.store.films(FilmSlot::Main).data().len();
        if self.slide >= slides {
            self.slide = 0;
        }
        let popular = self.store.films(FilmSlot::Popular).data().len();
        if self.popular_selected >= popular {
            self.popular_selected = popular.saturating_sub(1);
        }
        let results = self.store.films(FilmSlot::Search).data().len();
        self.search.clamp(results);
    }

    fn summary(&self) -> String {
        let counts = format!(
            "{} films, {} popular, {} genres",
            self.store.films(FilmSlot::Main).data().len(),
            self.store.films(FilmSlot::Popular).data().len(),
            self.store.genres().data().len()
        );
        let error = self
            .store
            .films(FilmSlot::Main)
            .error()
            .or_else(|| self.store.films(FilmSlot::Popular).error())
            .or_else(|| self.store.genres().error());
        match error {
            Some(e) => format!("{counts} (last error: {e})"),
            None => counts,
        }
    }
}

/// Run one fetch; failures become the slice's error message.
async fn run_fetch(client: &ApiClient, ticket: Ticket) -> FetchOutcome {
    let seq = ticket.seq;
    let films = |slot, result: Result<Vec<Film>, crate::api::ApiError>| FetchOutcome::Films {
        slot,
        seq,
        result: result.map_err(|e| e.to_string()),
    };
    match ticket.request {
        FetchRequest::MainFilms => films(FilmSlot::Main, client.films().await),
        FetchRequest::PopularFilms => films(FilmSlot::Popular, client.popular_films().await),
        FetchRequest::SearchFilms(query) => {
            films(FilmSlot::Search, client.search_films(&query).await)
        }
        FetchRequest::Genres => FetchOutcome::Genres {
            seq,
            result: client.genres().await.map_err(|e| e.to_string()),
        },
    }
}
