use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// A film record as returned by the catalog API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Film {
    pub id: u64,
    pub name: Option<String>,
    pub en_name: Option<String>,
    pub alternative_name: Option<String>,
    pub poster: Option<Poster>,
    pub rating: Option<Rating>,
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<NameItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub countries: Vec<NameItem>,
    pub year: Option<u32>,
    pub description: Option<String>,
    pub movie_length: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Poster {
    pub url: Option<String>,
    pub preview_url: Option<String>,
}

/// A genre or country tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NameItem {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Entry of the genres endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Genre {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub slug: Option<String>,
}

/// Provider key → score. A key can be missing, present with `null`, or
/// present with a number; the three cases stay distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Rating(BTreeMap<String, Option<f64>>);

impl Rating {
    /// `None` when the provider key is absent, `Some(None)` when it is null.
    pub fn get(&self, provider: &str) -> Option<Option<f64>> {
        self.0.get(provider).copied()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<f64>)> for Rating {
    fn from_iter<I: IntoIterator<Item = (K, Option<f64>)>>(iter: I) -> Self {
        Rating(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Film {
    /// First non-blank of `name`, `en_name`, `alternative_name`.
    pub fn display_name(&self) -> &str {
        first_filled([&self.name, &self.en_name, &self.alternative_name]).unwrap_or("Untitled")
    }

    /// Preview image when available, otherwise the full poster.
    pub fn poster_url(&self) -> Option<&str> {
        let poster = self.poster.as_ref()?;
        first_filled([&poster.preview_url, &poster.url])
    }

    /// Route of the per-film detail page.
    pub fn route(&self) -> String {
        format!("/films/{}", self.id)
    }
}

/// `null` reads like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn first_filled<'a, const N: usize>(candidates: [&'a Option<String>; N]) -> Option<&'a str> {
    candidates
        .into_iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.trim().is_empty())
}
