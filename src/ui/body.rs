use crate::store::{LoadingStatus, Slice};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
};

pub const LOADING_TEXT: &str = "Loading...";
pub const SERVER_ERROR_TEXT: &str = "Server error";
pub const SLIDER_ERROR_TEXT: &str = "Error";
pub const NOTHING_FOUND_TEXT: &str = "Nothing found";

/// What a slice-backed component shows, decided from slice state alone.
#[derive(Debug, PartialEq)]
pub enum SliceBody<'a, T> {
    Loading,
    Failed(&'static str),
    Empty(&'static str),
    Items(&'a [T]),
}

/// Pick the body for `slice`. `empty` is the message for a successful
/// fetch with no items; without one an empty item list is shown.
pub fn body<'a, T>(
    slice: &'a Slice<T>,
    error: &'static str,
    empty: Option<&'static str>,
) -> SliceBody<'a, T> {
    match slice.status() {
        // Home slices dispatch on start-up, so idle is only ever momentary.
        LoadingStatus::Idle | LoadingStatus::Loading => SliceBody::Loading,
        LoadingStatus::Error => SliceBody::Failed(error),
        LoadingStatus::Success => match empty {
            Some(message) if slice.data().is_empty() => SliceBody::Empty(message),
            _ => SliceBody::Items(slice.data()),
        },
    }
}

/// Single-message widget for the non-item bodies.
pub fn placeholder<T>(body: &SliceBody<'_, T>) -> Option<Paragraph<'static>> {
    let (text, style) = match body {
        SliceBody::Loading => (
            LOADING_TEXT,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        ),
        SliceBody::Failed(message) => (*message, Style::default().fg(Color::Red)),
        SliceBody::Empty(message) => (*message, Style::default().fg(Color::DarkGray)),
        SliceBody::Items(_) => return None,
    };
    Some(Paragraph::new(text).style(style).alignment(Alignment::Center))
}
