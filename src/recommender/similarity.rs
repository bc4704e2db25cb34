use crate::{
    config::ScoringConfig,
    models::{Book, SimilarityScores},
};

use super::profile::TasteProfile;

/// Sub-score used when there is no data to compare against
///
/// Neutral by construction: an unknown page count or an unbounded preferred
/// range neither penalizes nor favors a candidate.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Scores one candidate book against a taste profile
///
/// Produces four independent sub-scores in [0, 1]. Pure and deterministic;
/// weighting and novelty are the comfort engine's concern.
pub fn score_similarity(
    book: &Book,
    profile: &TasteProfile,
    config: &ScoringConfig,
) -> SimilarityScores {
    SimilarityScores {
        genre: best_affinity(&book.genres, &profile.genre_affinities),
        author: best_affinity(&book.authors, &profile.author_affinities),
        rating: rating_score(book, profile, config),
        page_count: page_count_score(book, profile),
    }
}

/// Best match wins: a book matching one strongly-loved genre among several
/// unrelated ones still scores well
fn best_affinity(names: &[String], affinities: &std::collections::HashMap<String, f64>) -> f64 {
    names
        .iter()
        .filter_map(|name| affinities.get(name).copied())
        .fold(0.0, f64::max)
}

fn rating_score(book: &Book, profile: &TasteProfile, config: &ScoringConfig) -> f64 {
    let Some(rating) = book.average_rating else {
        return NEUTRAL_SCORE;
    };
    let distance = (rating - profile.rating_range.center()).abs() / config.rating_span();
    (1.0 - distance).clamp(0.0, 1.0)
}

fn page_count_score(book: &Book, profile: &TasteProfile) -> f64 {
    let (Some(range), Some(pages)) = (profile.page_range, book.page_count) else {
        return NEUTRAL_SCORE;
    };
    let center = range.center();
    if center <= 0.0 {
        return NEUTRAL_SCORE;
    }
    let distance = (f64::from(pages) - center).abs() / center;
    (1.0 - distance).clamp(0.0, 1.0)
}
