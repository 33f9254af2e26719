use crate::model::{Film, Genre};

/// Fetch lifecycle of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Fetch status and payload for one entity type.
#[derive(Debug, Clone)]
pub struct Slice<T> {
    status: LoadingStatus,
    data: Vec<T>,
    error: Option<String>,
    dispatched: u64,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            status: LoadingStatus::Idle,
            data: Vec::new(),
            error: None,
            dispatched: 0,
        }
    }
}

impl<T> Slice<T> {
    pub fn status(&self) -> LoadingStatus {
        self.status
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of fetches dispatched so far; the latest ticket.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Restart from `loading`, whatever the previous state.
    fn begin(&mut self) -> u64 {
        self.dispatched += 1;
        self.status = LoadingStatus::Loading;
        self.data.clear();
        self.error = None;
        self.dispatched
    }

    /// Last resolved wins: the outcome is applied even if a newer fetch
    /// was dispatched after this one.
    fn resolve(&mut self, result: Result<Vec<T>, String>) {
        match result {
            Ok(data) => {
                self.status = LoadingStatus::Success;
                self.data = data;
                self.error = None;
            }
            Err(message) => {
                self.status = LoadingStatus::Error;
                self.data.clear();
                self.error = Some(message);
            }
        }
    }
}

/// Which film slice a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilmSlot {
    Main,
    Popular,
    Search,
}

impl FilmSlot {
    pub fn label(self) -> &'static str {
        match self {
            Self::Main => "films",
            Self::Popular => "popular",
            Self::Search => "search",
        }
    }
}

/// A fetch to run against the catalog API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    MainFilms,
    PopularFilms,
    SearchFilms(String),
    Genres,
}

impl FetchRequest {
    pub fn film_slot(&self) -> Option<FilmSlot> {
        match self {
            FetchRequest::MainFilms => Some(FilmSlot::Main),
            FetchRequest::PopularFilms => Some(FilmSlot::Popular),
            FetchRequest::SearchFilms(_) => Some(FilmSlot::Search),
            FetchRequest::Genres => None,
        }
    }
}

/// A dispatch ticket: the request plus its per-slice sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub request: FetchRequest,
    pub seq: u64,
}

/// Resolution of a fetch, sent back to the UI loop.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Films {
        slot: FilmSlot,
        seq: u64,
        result: Result<Vec<Film>, String>,
    },
    Genres {
        seq: u64,
        result: Result<Vec<Genre>, String>,
    },
}

/// All fetched application state. Written only through [`Store::dispatch`]
/// and [`Store::apply`]; everything else reads.
#[derive(Debug, Default)]
pub struct Store {
    films: Slice<Film>,
    popular: Slice<Film>,
    search: Slice<Film>,
    genres: Slice<Genre>,
}

impl Store {
    pub fn films(&self, slot: FilmSlot) -> &Slice<Film> {
        match slot {
            FilmSlot::Main => &self.films,
            FilmSlot::Popular => &self.popular,
            FilmSlot::Search => &self.search,
        }
    }

    pub fn genres(&self) -> &Slice<Genre> {
        &self.genres
    }

    fn films_mut(&mut self, slot: FilmSlot) -> &mut Slice<Film> {
        match slot {
            FilmSlot::Main => &mut self.films,
            FilmSlot::Popular => &mut self.popular,
            FilmSlot::Search => &mut self.search,
        }
    }

    /// Move the target slice to `loading` and hand out a ticket.
    pub fn dispatch(&mut self, request: FetchRequest) -> Ticket {
        let seq = match request.film_slot() {
            Some(slot) => self.films_mut(slot).begin(),
            None => self.genres.begin(),
        };
        tracing::debug!(?request, seq, "fetch dispatched");
        Ticket { request, seq }
    }

    pub fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Films { slot, seq, result } => {
                let slice = self.films_mut(slot);
                log_resolution(slot.label(), seq, slice.dispatched, &result);
                slice.resolve(result);
            }
            FetchOutcome::Genres { seq, result } => {
                log_resolution("genres", seq, self.genres.dispatched, &result);
                self.genres.resolve(result);
            }
        }
    }
}

fn log_resolution<T>(slice: &str, seq: u64, latest: u64, result: &Result<Vec<T>, String>) {
    if seq < latest {
        tracing::debug!(slice, seq, latest, "stale fetch resolved; applying anyway");
    }
    match result {
        Ok(items) => tracing::debug!(slice, seq, count = items.len(), "fetch succeeded"),
        Err(message) => tracing::warn!(slice, seq, %message, "fetch failed"),
    }
}
