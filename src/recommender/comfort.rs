use crate::models::{Book, ComfortLevel, ScoreBreakdown, SimilarityScores};

use super::profile::TasteProfile;

/// Fraction of the book's genres and authors the reader has never touched
///
/// Pools genres and authors into one count. `None` when the book carries
/// neither, which scores as neutral.
pub fn novel_fraction(book: &Book, profile: &TasteProfile) -> Option<f64> {
    let total = book.genres.len() + book.authors.len();
    if total == 0 {
        return None;
    }
    let novel = book
        .genres
        .iter()
        .filter(|genre| !profile.experienced_genres.contains(*genre))
        .count()
        + book
            .authors
            .iter()
            .filter(|author| !profile.experienced_authors.contains(*author))
            .count();
    Some(novel as f64 / total as f64)
}

/// Applies a comfort level's weight vector and novelty term to sub-scores
///
/// The composite is `Σ weight_i × sub_score_i + adjustment`, where the
/// adjustment interpolates linearly between the mirror of the level's novelty
/// coefficient (fully familiar) and the coefficient itself (fully novel). The
/// result is an unclamped, relative ranking signal.
pub fn apply_comfort(
    scores: &SimilarityScores,
    comfort_level: ComfortLevel,
    profile: &TasteProfile,
    book: &Book,
) -> ScoreBreakdown {
    let weights = comfort_level.weights();

    let novelty = match novel_fraction(book, profile) {
        Some(fraction) => weights.novelty * (2.0 * fraction - 1.0),
        None => 0.0,
    };

    let composite = weights.genre * scores.genre
        + weights.author * scores.author
        + weights.rating * scores.rating
        + weights.page_count * scores.page_count
        + novelty;

    ScoreBreakdown {
        genre: scores.genre,
        author: scores.author,
        rating: scores.rating,
        page_count: scores.page_count,
        novelty,
        composite,
    }
}
