use std::cmp::Ordering;

use crate::{
    config::ScoringConfig,
    error::AppResult,
    models::{
        Book, ComfortComparison, ComfortLevel, Recommendation, RecommendationRequest,
        ScoreBreakdown, SimilarityScores,
    },
};

use super::{comfort::apply_comfort, profile::TasteProfile, similarity::score_similarity};

/// Ranks a candidate pool for one comfort level
///
/// Hard filters exclude first, every survivor is scored with a full
/// breakdown, and the list is sorted by composite score with a deterministic
/// tie-break. A filter matching nothing yields an empty list, not an error.
pub fn recommend(
    pool: &[Book],
    profile: &TasteProfile,
    request: &RecommendationRequest,
    config: &ScoringConfig,
) -> AppResult<Vec<Recommendation>> {
    request.validate(config)?;

    let mut ranked: Vec<Recommendation> = pool
        .iter()
        .filter(|book| request.filters.matches(book))
        .filter(|book| !(request.exclude_read && profile.experienced_books.contains(&book.id)))
        .map(|book| score_candidate(book, profile, request.comfort_level, config))
        .collect();

    ranked.sort_by(rank_ordering);
    ranked.truncate(request.effective_count(config));
    Ok(ranked)
}

/// "Similar to book X" variant
///
/// Restricts the pool to books sharing at least one genre or author with the
/// reference before running the normal pipeline. The reference itself is
/// never returned.
pub fn similar_to(
    pool: &[Book],
    reference: &Book,
    profile: &TasteProfile,
    request: &RecommendationRequest,
    config: &ScoringConfig,
) -> AppResult<Vec<Recommendation>> {
    let restricted: Vec<Book> = pool
        .iter()
        .filter(|book| book.id != reference.id)
        .filter(|book| shares_genre_or_author(book, reference))
        .cloned()
        .collect();

    recommend(&restricted, profile, request, config)
}

/// Runs the ranker once per comfort level for side-by-side comparison
///
/// Same pool, same filters, only the comfort level varies. The runs are
/// independent; output order follows the level table from most familiar to
/// most novel.
pub fn compare_all_levels(
    pool: &[Book],
    profile: &TasteProfile,
    request: &RecommendationRequest,
    config: &ScoringConfig,
) -> AppResult<Vec<ComfortComparison>> {
    ComfortLevel::ALL
        .iter()
        .map(|&comfort_level| {
            let level_request = RecommendationRequest {
                comfort_level,
                ..request.clone()
            };
            recommend(pool, profile, &level_request, config).map(|recommendations| {
                ComfortComparison {
                    comfort_level,
                    recommendations,
                }
            })
        })
        .collect()
}

fn score_candidate(
    book: &Book,
    profile: &TasteProfile,
    comfort_level: ComfortLevel,
    config: &ScoringConfig,
) -> Recommendation {
    let scores = score_similarity(book, profile, config);
    let breakdown = apply_comfort(&scores, comfort_level, profile, book);
    let reasons = build_reasons(book, profile, &scores, &breakdown);

    Recommendation {
        book: book.clone(),
        breakdown,
        reasons,
    }
}

/// Composite descending, then average rating descending, then title
///
/// Books without an average rating sort after rated ones at equal composite.
fn rank_ordering(a: &Recommendation, b: &Recommendation) -> Ordering {
    b.breakdown
        .composite
        .total_cmp(&a.breakdown.composite)
        .then_with(|| {
            let a_rating = a.book.average_rating.unwrap_or(f64::NEG_INFINITY);
            let b_rating = b.book.average_rating.unwrap_or(f64::NEG_INFINITY);
            b_rating.total_cmp(&a_rating)
        })
        .then_with(|| a.book.title.cmp(&b.book.title))
}

fn shares_genre_or_author(book: &Book, reference: &Book) -> bool {
    reference.genres.iter().any(|genre| book.has_genre(genre))
        || reference
            .authors
            .iter()
            .any(|author| book.has_author(author))
}

fn build_reasons(
    book: &Book,
    profile: &TasteProfile,
    scores: &SimilarityScores,
    breakdown: &ScoreBreakdown,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if scores.genre > 0.0 {
        if let Some(genre) = best_matching(&book.genres, &profile.genre_affinities) {
            reasons.push(format!("Matches a genre you enjoy: {}", genre));
        }
    }
    if scores.author > 0.0 {
        if let Some(author) = best_matching(&book.authors, &profile.author_affinities) {
            reasons.push(format!("By an author you've read: {}", author));
        }
    }
    if book.average_rating.is_some_and(|rating| rating >= 4.0) {
        reasons.push("Highly rated by other readers".to_string());
    }
    if breakdown.novelty > 0.0 {
        let new_genres: Vec<&str> = book
            .genres
            .iter()
            .filter(|genre| !profile.experienced_genres.contains(*genre))
            .map(String::as_str)
            .collect();
        if !new_genres.is_empty() {
            reasons.push(format!("Explores new genres: {}", new_genres.join(", ")));
        }
    }

    reasons
}

fn best_matching<'a>(
    names: &'a [String],
    affinities: &std::collections::HashMap<String, f64>,
) -> Option<&'a str> {
    names
        .iter()
        .filter(|name| affinities.contains_key(*name))
        .max_by(|a, b| affinities[*a].total_cmp(&affinities[*b]))
        .map(String::as_str)
}
