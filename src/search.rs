use std::time::{Duration, Instant};

/// Whether `query` may be sent while the modal is `is_open`.
///
/// Real text and a fully cleared query both qualify; whitespace alone does not.
pub fn should_search(query: &str, is_open: bool) -> bool {
    is_open && (query.is_empty() || !query.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    due: Instant,
    query: String,
}

/// Search modal state: query text, visibility and the debounced dispatch.
///
/// Methods return `Some(query)` when a search fetch must be dispatched now.
#[derive(Debug, Clone)]
pub struct SearchOrchestrator {
    query: String,
    is_open: bool,
    debounce: Duration,
    pending: Option<Pending>,
    selected: usize,
}

impl SearchOrchestrator {
    pub fn new(debounce: Duration) -> Self {
        Self {
            query: String::new(),
            is_open: false,
            debounce,
            pending: None,
            selected: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// When the next debounced dispatch is due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Opening always re-evaluates the current query, without debounce.
    pub fn open(&mut self) -> Option<String> {
        if self.is_open {
            return None;
        }
        self.is_open = true;
        self.pending = None;
        self.trigger_now()
    }

    /// Hide the modal. In-flight fetches are not cancelled.
    pub fn close(&mut self) {
        self.is_open = false;
        self.pending = None;
    }

    pub fn set_query(&mut self, query: String, now: Instant) -> Option<String> {
        if query == self.query {
            return None;
        }
        self.query = query;
        if !should_search(&self.query, self.is_open) {
            if self.pending.take().is_some() {
                tracing::debug!(query = %self.query, "pending search dropped");
            }
            return None;
        }
        if self.debounce.is_zero() {
            self.pending = None;
            return self.trigger_now();
        }
        self.pending = Some(Pending {
            due: now + self.debounce,
            query: self.query.clone(),
        });
        None
    }

    pub fn push_char(&mut self, c: char, now: Instant) -> Option<String> {
        let mut query = self.query.clone();
        query.push(c);
        self.set_query(query, now)
    }

    pub fn backspace(&mut self, now: Instant) -> Option<String> {
        let mut query = self.query.clone();
        query.pop();
        self.set_query(query, now)
    }

    pub fn clear(&mut self, now: Instant) -> Option<String> {
        self.set_query(String::new(), now)
    }

    /// Release the pending search once its debounce has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if self.deadline()? > now {
            return None;
        }
        let pending = self.pending.take()?;
        self.selected = 0;
        Some(pending.query)
    }

    pub fn select_next(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection inside a result list of `len` items.
    pub fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn trigger_now(&mut self) -> Option<String> {
        if should_search(&self.query, self.is_open) {
            self.selected = 0;
            Some(self.query.clone())
        } else {
            None
        }
    }
}
