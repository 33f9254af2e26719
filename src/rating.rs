use crate::model::Rating;

/// Providers shown on film cards, most preferred first.
pub const PREFERRED_PROVIDERS: [&str; 2] = ["imdb", "kp"];

/// One provider score selected for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingEntry {
    pub provider: String,
    pub value: Option<f64>,
}

impl RatingEntry {
    pub fn label(&self) -> &str {
        match self.provider.as_str() {
            "imdb" => "IMDb",
            "kp" => "KP",
            "filmCritics" => "Critics",
            "russianFilmCritics" => "RU Critics",
            "await" => "Await",
            other => other,
        }
    }
}

/// Entries whose key is present in `rating`, in `preferred` order.
/// Values are kept as-is, including null and zero.
pub fn present_in_order(rating: &Rating, preferred: &[&str]) -> Vec<RatingEntry> {
    preferred
        .iter()
        .filter_map(|&provider| {
            rating.get(provider).map(|value| RatingEntry {
                provider: provider.to_string(),
                value,
            })
        })
        .collect()
}

/// Scores to render: present keys in preference order, then only truthy
/// values. A zero, null or NaN score is never shown.
pub fn resolve(rating: Option<&Rating>, preferred: &[&str]) -> Vec<RatingEntry> {
    let Some(rating) = rating else {
        return Vec::new();
    };
    present_in_order(rating, preferred)
        .into_iter()
        .filter(|entry| entry.value.is_some_and(|v| v != 0.0 && !v.is_nan()))
        .collect()
}
