use crate::model::NameItem;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Tag categories with their own icon directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    Genres,
    Countries,
}

impl AssetCategory {
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Genres => "genres",
            Self::Countries => "countries",
        }
    }
}

/// Outcome of an icon lookup. Never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLookup {
    Found(PathBuf),
    NotFound,
}

impl AssetLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// A tag ready for display: label plus optional icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub icon: AssetLookup,
}

/// Read-only directory of `{category}/{name}.png` icons.
///
/// Lookups are remembered for the life of the store, so rendering the same
/// tag every frame touches the filesystem once.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
    seen: RefCell<HashMap<(AssetCategory, String), AssetLookup>>,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            seen: RefCell::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, category: AssetCategory, name: &str) -> AssetLookup {
        let key = (category, name.to_string());
        if let Some(hit) = self.seen.borrow().get(&key) {
            return hit.clone();
        }
        let lookup = self.lookup(category, name);
        self.seen.borrow_mut().insert(key, lookup.clone());
        lookup
    }

    fn lookup(&self, category: AssetCategory, name: &str) -> AssetLookup {
        // Names come from the API; keep lookups inside the category dir.
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return AssetLookup::NotFound;
        }
        let path = self
            .root
            .join(category.dir_name())
            .join(format!("{name}.png"));
        if path.is_file() {
            AssetLookup::Found(path)
        } else {
            AssetLookup::NotFound
        }
    }

    /// Badges for the first `limit` tags of a list.
    pub fn badges(&self, category: AssetCategory, tags: &[NameItem], limit: usize) -> Vec<Badge> {
        tags.iter()
            .filter(|tag| !tag.name.trim().is_empty())
            .take(limit)
            .map(|tag| Badge {
                label: capitalize_first(&tag.name),
                icon: self.resolve(category, &tag.name),
            })
            .collect()
    }
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str) -> NameItem {
        NameItem {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_found_and_not_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("genres")).unwrap();
        std::fs::write(dir.path().join("genres").join("драма.png"), b"png").unwrap();

        let store = AssetStore::new(dir.path());
        assert_eq!(
            store.resolve(AssetCategory::Genres, "драма"),
            AssetLookup::Found(dir.path().join("genres").join("драма.png"))
        );
        assert_eq!(store.resolve(AssetCategory::Genres, "комедия"), AssetLookup::NotFound);
        assert_eq!(store.resolve(AssetCategory::Countries, "драма"), AssetLookup::NotFound);
    }

    #[test]
    fn test_missing_root_is_not_an_error() {
        let store = AssetStore::new("/definitely/not/here");
        assert_eq!(store.resolve(AssetCategory::Countries, "США"), AssetLookup::NotFound);
    }

    #[test]
    fn test_path_like_names_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("secret.png"), b"png").unwrap();
        let store = AssetStore::new(dir.path());
        assert_eq!(store.resolve(AssetCategory::Genres, "../secret"), AssetLookup::NotFound);
        assert_eq!(store.resolve(AssetCategory::Genres, ""), AssetLookup::NotFound);
    }

    #[test]
    fn test_badges_limit_and_labels() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("countries")).unwrap();
        std::fs::write(dir.path().join("countries").join("франция.png"), b"png").unwrap();
        let store = AssetStore::new(dir.path());

        let tags = [tag("франция"), tag("италия"), tag("германия")];
        let badges = store.badges(AssetCategory::Countries, &tags, 2);
        assert_eq!(badges.len(), 2);
        assert_eq!(badges[0].label, "Франция");
        assert!(badges[0].icon.is_found());
        assert_eq!(badges[1].label, "Италия");
        assert!(!badges[1].icon.is_found());
    }

    #[test]
    fn test_lookups_are_remembered() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        assert_eq!(store.resolve(AssetCategory::Genres, "драма"), AssetLookup::NotFound);

        // Appearing later does not flip an answer already given.
        std::fs::create_dir_all(dir.path().join("genres")).unwrap();
        std::fs::write(dir.path().join("genres").join("драма.png"), b"png").unwrap();
        assert_eq!(store.resolve(AssetCategory::Genres, "драма"), AssetLookup::NotFound);

        // A different category is its own entry.
        std::fs::create_dir_all(dir.path().join("countries")).unwrap();
        std::fs::write(dir.path().join("countries").join("драма.png"), b"png").unwrap();
        assert!(store.resolve(AssetCategory::Countries, "драма").is_found());
        assert_eq!(store.seen.borrow().len(), 2);
    }

    #[test]
    fn test_blank_tags_skipped() {
        let store = AssetStore::new("/definitely/not/here");
        let tags = [tag(""), tag(" "), tag("драма")];
        let badges = store.badges(AssetCategory::Genres, &tags, 2);
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].label, "Драма");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("драма"), "Драма");
        assert_eq!(capitalize_first("x"), "X");
        assert_eq!(capitalize_first(""), "");
    }
}
