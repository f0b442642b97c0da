//! Movie records with a derived, order-defining title key.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel release year for titles without a parsable trailing year.
pub const UNKNOWN_YEAR: i32 = 9999;

/// Matches a trailing 4-digit year, `"Heat (1995)"` or `"Heat 1995"`.
static TITLE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+)\s\(?(\d{4})\)?$").unwrap());

/// One catalog entry.
///
/// The sort key is derived once at construction by appending ` - <id>` to the
/// raw title, so identical titles stay distinguishable in the search tree.
/// Identity (equality, hashing) is governed by `id` alone; ordering is
/// governed by the sort key alone.
#[derive(Debug, Clone)]
pub struct Movie {
    id: u32,
    title: String,
    sort_key: String,
    year: i32,
    genres: Vec<String>,
}

impl Movie {
    pub fn new(id: u32, raw_title: &str, genre_field: &str) -> Self {
        let sort_key = format!("{} - {}", raw_title, id);
        // Year extraction is best-effort: an unmatched title is not an error.
        let year = TITLE_YEAR
            .captures(raw_title.trim())
            .and_then(|caps| caps[2].parse().ok())
            .unwrap_or(UNKNOWN_YEAR);
        let genres = genre_field.split('|').map(str::to_string).collect();
        Self {
            id,
            title: raw_title.to_string(),
            sort_key,
            year,
            genres,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Raw title field as it appeared in the input.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Genre tags in input order, repeats preserved.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// The key used for all ordering and range comparisons.
    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    /// Three-way lexicographic comparison of sort keys.
    ///
    /// Not exposed as `Ord`: equality is by id while ordering is by key, and
    /// implementing both would break the `Ord`/`Eq` consistency contract.
    pub fn cmp_key(&self, other: &Movie) -> Ordering {
        self.sort_key.cmp(&other.sort_key)
    }

    /// True iff `low <= sort_key <= high` (inclusive lexicographic bounds).
    pub fn is_within_range(&self, low: &str, high: &str) -> bool {
        self.sort_key.as_str() >= low && self.sort_key.as_str() <= high
    }
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Movie {}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sort_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[ctor::ctor]
    fn init() {
        crate::util::testing::init_test_setup();
    }

    #[test]
    fn test_sort_key_appends_id() {
        let movie = Movie::new(7, "Heat (1995)", "Action|Crime|Thriller");
        assert_eq!(movie.sort_key(), "Heat (1995) - 7");
        assert_eq!(movie.title(), "Heat (1995)");
    }

    #[test]
    fn test_genres_split_on_pipe() {
        let movie = Movie::new(1, "Toy Story (1995)", "Adventure|Animation|Children");
        assert_eq!(movie.genres(), ["Adventure", "Animation", "Children"]);
    }

    #[test]
    fn test_equality_by_id_only() {
        let a = Movie::new(5, "Heat (1995)", "Action");
        let b = Movie::new(5, "Sabrina (1995)", "Comedy");
        let c = Movie::new(6, "Heat (1995)", "Action");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
