use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::{
    config::ScoringConfig,
    models::{HistoryEntry, ReadingStatus, UserPreferences},
};

/// A preferred value range derived from reading history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreferredRange {
    pub min: f64,
    pub max: f64,
}

impl PreferredRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Midpoint of the range, the anchor for distance scoring
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Derived, immutable taste snapshot for one reader
///
/// Recomputed on demand from history and stated preferences; never persisted.
/// An empty history produces a valid, maximally uninformative profile.
#[derive(Debug, Clone, PartialEq)]
pub struct TasteProfile {
    /// Genre name to affinity in [0, 1]
    pub genre_affinities: HashMap<String, f64>,
    /// Author name to affinity in [0, 1]
    pub author_affinities: HashMap<String, f64>,
    /// Rating band the reader tends to enjoy; full scale when underinformed
    pub rating_range: PreferredRange,
    /// Page-count band the reader tends to finish; `None` when no data
    pub page_range: Option<PreferredRange>,
    /// Genres the reader has already spent time with
    pub experienced_genres: HashSet<String>,
    /// Authors the reader has already spent time with
    pub experienced_authors: HashSet<String>,
    /// Books the reader is reading or has completed
    pub experienced_books: HashSet<Uuid>,
}

/// Builds a taste profile from a reading history and stated preferences
///
/// Affinities are rating-weighted normalized frequencies: a disliked genre
/// read often does not outrank a loved genre read rarely. Unrated entries
/// count toward the experienced sets but carry no affinity weight. Stated
/// favorites get a fixed additive boost so an unread favorite is still
/// visible to scoring.
pub fn build_profile(
    history: &[HistoryEntry],
    preferences: &UserPreferences,
    config: &ScoringConfig,
) -> TasteProfile {
    let experienced: Vec<&HistoryEntry> = history
        .iter()
        .filter(|entry| entry.status.is_experienced())
        .collect();

    let mut genre_weights: HashMap<String, f64> = HashMap::new();
    let mut author_weights: HashMap<String, f64> = HashMap::new();
    let mut experienced_genres = HashSet::new();
    let mut experienced_authors = HashSet::new();
    let mut experienced_books = HashSet::new();
    let mut ratings = Vec::new();
    let mut page_counts = Vec::new();

    for entry in &experienced {
        experienced_books.insert(entry.book.id);
        for genre in &entry.book.genres {
            experienced_genres.insert(genre.clone());
        }
        for author in &entry.book.authors {
            experienced_authors.insert(author.clone());
        }

        if let Some(rating) = entry.rating {
            ratings.push(rating);
            let weight = config.normalize_rating(rating);
            for genre in &entry.book.genres {
                *genre_weights.entry(genre.clone()).or_insert(0.0) += weight;
            }
            for author in &entry.book.authors {
                *author_weights.entry(author.clone()).or_insert(0.0) += weight;
            }
        }

        if entry.status == ReadingStatus::Completed {
            if let Some(pages) = entry.book.page_count {
                page_counts.push(f64::from(pages));
            }
        }
    }

    let mut genre_affinities = normalize_weights(genre_weights);
    let mut author_affinities = normalize_weights(author_weights);

    // Stated favorites are merged in even when never read
    for genre in &preferences.favorite_genres {
        boost_affinity(&mut genre_affinities, genre, config.preference_boost);
    }
    for author in &preferences.favorite_authors {
        boost_affinity(&mut author_affinities, author, config.preference_boost);
    }

    let rating_range = if ratings.len() >= 2 {
        let (mean, stddev) = mean_and_stddev(&ratings);
        PreferredRange::new(
            (mean - stddev).max(config.rating_min),
            (mean + stddev).min(config.rating_max),
        )
    } else {
        PreferredRange::new(config.rating_min, config.rating_max)
    };

    let page_range = if page_counts.is_empty() {
        None
    } else {
        let (mean, stddev) = mean_and_stddev(&page_counts);
        Some(PreferredRange::new((mean - stddev).max(0.0), mean + stddev))
    };

    TasteProfile {
        genre_affinities,
        author_affinities,
        rating_range,
        page_range,
        experienced_genres,
        experienced_authors,
        experienced_books,
    }
}

/// Divides each accumulated weight by the total across all buckets
fn normalize_weights(weights: HashMap<String, f64>) -> HashMap<String, f64> {
    let total: f64 = weights.values().sum();
    if total <= f64::EPSILON {
        return HashMap::new();
    }
    weights
        .into_iter()
        .map(|(name, weight)| (name, weight / total))
        .collect()
}

fn boost_affinity(affinities: &mut HashMap<String, f64>, name: &str, boost: f64) {
    let entry = affinities.entry(name.to_string()).or_insert(0.0);
    *entry = (*entry + boost).min(1.0);
}

/// Mean and population standard deviation
fn mean_and_stddev(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Book;

    fn book(title: &str, genres: &[&str], authors: &[&str]) -> Book {
        Book::new(
            title,
            genres.iter().map(|g| g.to_string()).collect(),
            authors.iter().map(|a| a.to_string()).collect(),
        )
    }

    fn entry(book: Book, rating: Option<f64>, status: ReadingStatus) -> HistoryEntry {
        HistoryEntry::new(book, rating, status)
    }

    #[test]
    fn test_empty_history_yields_uninformative_profile() {
        let config = ScoringConfig::default();
        let profile = build_profile(&[], &UserPreferences::default(), &config);

        assert!(profile.genre_affinities.is_empty());
        assert!(profile.author_affinities.is_empty());
        assert_eq!(profile.rating_range.min, config.rating_min);
        assert_eq!(profile.rating_range.max, config.rating_max);
        assert!(profile.page_range.is_none());
        assert!(profile.experienced_genres.is_empty());
        assert!(profile.experienced_books.is_empty());
    }

    #[test]
    fn test_loved_genre_read_rarely_outranks_disliked_genre_read_often() {
        let config = ScoringConfig::default();
        let history = vec![
            entry(
                book("A", &["fantasy"], &["Author A"]),
                Some(5.0),
                ReadingStatus::Completed,
            ),
            entry(
                book("B", &["thriller"], &["Author B"]),
                Some(2.0),
                ReadingStatus::Completed,
            ),
            entry(
                book("C", &["thriller"], &["Author C"]),
                Some(2.0),
                ReadingStatus::Completed,
            ),
        ];
        let profile = build_profile(&history, &UserPreferences::default(), &config);

        let fantasy = profile.genre_affinities["fantasy"];
        let thriller = profile.genre_affinities["thriller"];
        assert!(
            fantasy > thriller,
            "fantasy {} should outrank thriller {}",
            fantasy,
            thriller
        );
    }

    #[test]
    fn test_unrated_entries_feed_experienced_sets_but_not_affinities() {
        let config = ScoringConfig::default();
        let history = vec![entry(
            book("A", &["horror"], &["Shirley Jackson"]),
            None,
            ReadingStatus::Completed,
        )];
        let profile = build_profile(&history, &UserPreferences::default(), &config);

        assert!(profile.genre_affinities.is_empty());
        assert!(profile.experienced_genres.contains("horror"));
        assert!(profile.experienced_authors.contains("Shirley Jackson"));
    }

    #[test]
    fn test_want_to_read_entries_are_invisible() {
        let config = ScoringConfig::default();
        let history = vec![entry(
            book("A", &["fantasy"], &["Author A"]),
            Some(5.0),
            ReadingStatus::WantToRead,
        )];
        let profile = build_profile(&history, &UserPreferences::default(), &config);

        assert!(profile.genre_affinities.is_empty());
        assert!(profile.experienced_genres.is_empty());
        assert!(profile.experienced_books.is_empty());
    }

    #[test]
    fn test_stated_favorites_get_boost_without_being_read() {
        let config = ScoringConfig::default();
        let preferences = UserPreferences {
            favorite_genres: vec!["poetry".to_string()],
            favorite_authors: vec!["Mary Oliver".to_string()],
            ..Default::default()
        };
        let profile = build_profile(&[], &preferences, &config);

        assert_eq!(profile.genre_affinities["poetry"], config.preference_boost);
        assert_eq!(
            profile.author_affinities["Mary Oliver"],
            config.preference_boost
        );
        // Stated-but-unread is not the same as experienced
        assert!(!profile.experienced_genres.contains("poetry"));
    }

    #[test]
    fn test_boost_is_clamped_to_one() {
        let config = ScoringConfig {
            preference_boost: 0.9,
            ..Default::default()
        };
        let history = vec![entry(
            book("A", &["fantasy"], &[]),
            Some(5.0),
            ReadingStatus::Completed,
        )];
        let preferences = UserPreferences {
            favorite_genres: vec!["fantasy".to_string()],
            ..Default::default()
        };
        let profile = build_profile(&history, &preferences, &config);

        assert_eq!(profile.genre_affinities["fantasy"], 1.0);
    }

    #[test]
    fn test_single_rating_falls_back_to_full_scale() {
        let config = ScoringConfig::default();
        let history = vec![entry(
            book("A", &["fantasy"], &[]),
            Some(4.0),
            ReadingStatus::Completed,
        )];
        let profile = build_profile(&history, &UserPreferences::default(), &config);

        assert_eq!(profile.rating_range.min, config.rating_min);
        assert_eq!(profile.rating_range.max, config.rating_max);
    }

    #[test]
    fn test_rating_range_is_mean_plus_minus_stddev() {
        let config = ScoringConfig::default();
        let history = vec![
            entry(book("A", &["a"], &[]), Some(4.0), ReadingStatus::Completed),
            entry(book("B", &["b"], &[]), Some(5.0), ReadingStatus::Completed),
        ];
        let profile = build_profile(&history, &UserPreferences::default(), &config);

        // mean 4.5, population stddev 0.5
        assert!((profile.rating_range.min - 4.0).abs() < 1e-9);
        assert!((profile.rating_range.max - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_page_range_only_uses_completed_books() {
        let config = ScoringConfig::default();
        let mut long_book = book("A", &["fantasy"], &[]);
        long_book.page_count = Some(800);
        let mut short_book = book("B", &["fantasy"], &[]);
        short_book.page_count = Some(200);

        let history = vec![
            entry(short_book, Some(4.0), ReadingStatus::Completed),
            entry(long_book, Some(4.0), ReadingStatus::Reading),
        ];
        let profile = build_profile(&history, &UserPreferences::default(), &config);

        let range = profile.page_range.unwrap();
        assert_eq!(range.center(), 200.0);
    }

    #[test]
    fn test_affinities_are_normalized() {
        let config = ScoringConfig::default();
        let history = vec![
            entry(book("A", &["fantasy"], &[]), Some(5.0), ReadingStatus::Completed),
            entry(book("B", &["romance"], &[]), Some(3.0), ReadingStatus::Completed),
        ];
        let profile = build_profile(&history, &UserPreferences::default(), &config);

        let total: f64 = profile.genre_affinities.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(profile.genre_affinities["fantasy"] > profile.genre_affinities["romance"]);
    }
}
