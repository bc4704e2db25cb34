use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{ComfortLevel, Recommendation, RecommendationFilters, RecommendationRequest},
    services,
};

use super::AppState;

/// Wire form of a recommendation request
///
/// The comfort level arrives as a plain string so an unknown value is
/// rejected as `InvalidComfortLevel` before any scoring, rather than as a
/// generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub comfort_level: Option<String>,
    pub genre: Option<String>,
    pub author: Option<String>,
    pub min_rating: Option<f64>,
    pub min_page_count: Option<u32>,
    pub max_page_count: Option<u32>,
    pub count: Option<usize>,
    pub exclude_read: Option<bool>,
}

impl RecommendParams {
    fn into_request(self) -> AppResult<RecommendationRequest> {
        let comfort_level = match self.comfort_level.as_deref() {
            Some(raw) => raw.parse::<ComfortLevel>()?,
            None => ComfortLevel::default(),
        };
        Ok(RecommendationRequest {
            comfort_level,
            filters: RecommendationFilters {
                genre: self.genre,
                author: self.author,
                min_rating: self.min_rating,
                min_page_count: self.min_page_count,
                max_page_count: self.max_page_count,
            },
            count: self.count,
            exclude_read: self.exclude_read.unwrap_or(true),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    pub count: Option<usize>,
    pub exclude_read: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct SimilarParams {
    pub count: Option<usize>,
}

/// Ranked recommendations for one comfort level, with explanation
pub async fn recommend(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(params): Json<RecommendParams>,
) -> AppResult<Json<services::RankedRecommendations>> {
    state.library.get_user(user_id).await?;
    let request = params.into_request()?;
    let ranked = services::recommend_for_user(
        state.library.as_ref(),
        user_id,
        &request,
        &state.scoring,
    )
    .await?;
    Ok(Json(ranked))
}

/// Recommendations with full per-book score breakdowns
pub async fn detailed(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<RecommendParams>,
) -> AppResult<Json<Vec<Recommendation>>> {
    state.library.get_user(user_id).await?;
    let request = params.into_request()?;
    let ranked = services::recommend_for_user(
        state.library.as_ref(),
        user_id,
        &request,
        &state.scoring,
    )
    .await?;
    Ok(Json(ranked.recommendations))
}

/// One ranked list per comfort level, for side-by-side comparison
pub async fn compare_levels(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<CompareParams>,
) -> AppResult<Json<Vec<services::RankedRecommendations>>> {
    state.library.get_user(user_id).await?;
    let request = RecommendationRequest {
        count: params.count,
        exclude_read: params.exclude_read.unwrap_or(true),
        ..Default::default()
    };
    let compared = services::compare_comfort_levels(
        state.library.as_ref(),
        user_id,
        &request,
        &state.scoring,
    )
    .await?;
    Ok(Json(compared))
}

/// Books similar to a reference book, ranked for the user
pub async fn similar(
    State(state): State<AppState>,
    Path((user_id, book_id)): Path<(Uuid, Uuid)>,
    Query(params): Query<SimilarParams>,
) -> AppResult<Json<Vec<Recommendation>>> {
    state.library.get_user(user_id).await?;
    let request = RecommendationRequest {
        count: params.count,
        ..Default::default()
    };
    let recommendations = services::similar_books(
        state.library.as_ref(),
        user_id,
        book_id,
        &request,
        &state.scoring,
    )
    .await?;
    Ok(Json(recommendations))
}
