use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{ReadingEntry, ReadingStatus, User, UserPreferences},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ReadingRequest {
    pub book_id: Uuid,
    pub rating: Option<f64>,
    #[serde(default = "default_status")]
    pub status: ReadingStatus,
}

fn default_status() -> ReadingStatus {
    ReadingStatus::WantToRead
}

#[derive(Debug, Deserialize)]
pub struct ReadingListQuery {
    pub status: Option<ReadingStatus>,
}

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    if request.username.trim().is_empty() || request.email.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "username and email must not be empty".to_string(),
        ));
    }
    let user = state
        .library
        .create_user(request.username.trim(), request.email.trim())
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<User>> {
    let user = state.library.get_user(user_id).await?;
    Ok(Json(user))
}

/// Add a book to the user's reading log
pub async fn add_reading(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<ReadingRequest>,
) -> AppResult<(StatusCode, Json<ReadingEntry>)> {
    validate_rating(&state, request.rating)?;
    let entry = state
        .library
        .add_reading(user_id, request.book_id, request.rating, request.status)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// List the user's reading log, optionally narrowed by status
pub async fn list_readings(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ReadingListQuery>,
) -> AppResult<Json<Vec<ReadingEntry>>> {
    let readings = state.library.list_readings(user_id, query.status).await?;
    Ok(Json(readings))
}

/// Update the rating and status of a reading entry
pub async fn update_reading(
    State(state): State<AppState>,
    Path((user_id, reading_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<ReadingRequest>,
) -> AppResult<Json<ReadingEntry>> {
    validate_rating(&state, request.rating)?;
    let entry = state
        .library
        .update_reading(user_id, reading_id, request.rating, request.status)
        .await?;
    Ok(Json(entry))
}

/// Get the user's stated preferences
pub async fn get_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<UserPreferences>> {
    let preferences = state.library.get_preferences(user_id).await?;
    Ok(Json(preferences))
}

/// Create or replace the user's stated preferences
pub async fn put_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(preferences): Json<UserPreferences>,
) -> AppResult<Json<UserPreferences>> {
    if let (Some(min), Some(max)) = (preferences.min_page_count, preferences.max_page_count) {
        if max < min {
            return Err(AppError::InvalidInput(format!(
                "max_page_count {} is below min_page_count {}",
                max, min
            )));
        }
    }
    let stored = state
        .library
        .upsert_preferences(user_id, preferences)
        .await?;
    Ok(Json(stored))
}

fn validate_rating(state: &AppState, rating: Option<f64>) -> AppResult<()> {
    if let Some(rating) = rating {
        if !state.scoring.rating_in_scale(rating) {
            return Err(AppError::InvalidInput(format!(
                "rating {} is outside the {}..{} scale",
                rating, state.scoring.rating_min, state.scoring.rating_max
            )));
        }
    }
    Ok(())
}
