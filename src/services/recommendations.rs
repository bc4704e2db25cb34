use std::time::Instant;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    config::ScoringConfig,
    error::AppResult,
    models::{ComfortLevel, Recommendation, RecommendationRequest},
    recommender::{build_profile, compare_all_levels, recommend, similar_to},
    store::Library,
};

/// One comfort level's ranked list with its reader-facing explanation
#[derive(Debug, Clone, Serialize)]
pub struct RankedRecommendations {
    pub comfort_level: ComfortLevel,
    pub explanation: String,
    pub recommendations: Vec<Recommendation>,
}

/// Produces personalized recommendations for one reader
///
/// Pulls history, preferences, and the candidate pool from the library in one
/// synchronous sweep, then hands everything to the pure core. Insufficient
/// data never fails: a reader the store does not know gets filter-only,
/// neutral-scored results.
pub async fn recommend_for_user(
    library: &dyn Library,
    user_id: Uuid,
    request: &RecommendationRequest,
    config: &ScoringConfig,
) -> AppResult<RankedRecommendations> {
    request.validate(config)?;
    let start = Instant::now();

    let history = library.fetch_history(user_id).await?;
    let preferences = library.fetch_preferences(user_id).await?;
    let profile = build_profile(&history, &preferences, config);

    let pool = library.fetch_candidate_pool(&request.filters).await?;
    let pool_size = pool.len();
    let recommendations = recommend(&pool, &profile, request, config)?;

    tracing::info!(
        user_id = %user_id,
        comfort_level = %request.comfort_level,
        history_len = history.len(),
        pool_size,
        returned = recommendations.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Recommendations ranked"
    );

    Ok(RankedRecommendations {
        comfort_level: request.comfort_level,
        explanation: level_explanation(request.comfort_level, mean_score(&recommendations)),
        recommendations,
    })
}

/// Books similar to a reference book, ranked for the reader
pub async fn similar_books(
    library: &dyn Library,
    user_id: Uuid,
    book_id: Uuid,
    request: &RecommendationRequest,
    config: &ScoringConfig,
) -> AppResult<Vec<Recommendation>> {
    request.validate(config)?;

    let reference = library.fetch_book(book_id).await?;
    let history = library.fetch_history(user_id).await?;
    let preferences = library.fetch_preferences(user_id).await?;
    let profile = build_profile(&history, &preferences, config);

    let pool = library.fetch_candidate_pool(&request.filters).await?;
    let recommendations = similar_to(&pool, &reference, &profile, request, config)?;

    tracing::info!(
        user_id = %user_id,
        reference = %reference.title,
        returned = recommendations.len(),
        "Similar books ranked"
    );

    Ok(recommendations)
}

/// Runs the ranker once per comfort level over one shared snapshot
pub async fn compare_comfort_levels(
    library: &dyn Library,
    user_id: Uuid,
    request: &RecommendationRequest,
    config: &ScoringConfig,
) -> AppResult<Vec<RankedRecommendations>> {
    request.validate(config)?;
    let start = Instant::now();

    let history = library.fetch_history(user_id).await?;
    let preferences = library.fetch_preferences(user_id).await?;
    let profile = build_profile(&history, &preferences, config);
    let pool = library.fetch_candidate_pool(&request.filters).await?;

    let comparisons = compare_all_levels(&pool, &profile, request, config)?;

    tracing::info!(
        user_id = %user_id,
        levels = comparisons.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Comfort levels compared"
    );

    Ok(comparisons
        .into_iter()
        .map(|comparison| RankedRecommendations {
            comfort_level: comparison.comfort_level,
            explanation: level_explanation(
                comparison.comfort_level,
                mean_score(&comparison.recommendations),
            ),
            recommendations: comparison.recommendations,
        })
        .collect())
}

/// Mean composite over a ranked list, clamped into [0, 1] for display
fn mean_score(recommendations: &[Recommendation]) -> f64 {
    if recommendations.is_empty() {
        return 0.0;
    }
    let total: f64 = recommendations
        .iter()
        .map(|r| r.score().clamp(0.0, 1.0))
        .sum();
    total / recommendations.len() as f64
}

fn level_explanation(comfort_level: ComfortLevel, mean_score: f64) -> String {
    let similarity = format!("{:.0}%", mean_score * 100.0);
    match comfort_level {
        ComfortLevel::SameOld => format!(
            "Very close to your previous reads (similarity {}). More of what you love.",
            similarity
        ),
        ComfortLevel::ComfortZone => format!(
            "Close to your preferences (similarity {}) with some gentle variety.",
            similarity
        ),
        ComfortLevel::Balanced => format!(
            "A mix of familiar and new (similarity {}).",
            similarity
        ),
        ComfortLevel::Adventurous => format!(
            "Ventures into new territory (similarity {}) while keeping a thread to your interests.",
            similarity
        ),
        ComfortLevel::CompletelyNew => format!(
            "Something completely different (similarity {}) to stretch your shelves.",
            similarity
        ),
    }
}
